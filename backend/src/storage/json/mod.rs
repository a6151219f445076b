//! # JSON Storage Module
//!
//! File-based storage of the whole registry in a single JSON document
//! (`children.json` in the data directory).
//!
//! ## File Format
//!
//! ```json
//! {
//!   "schemaVersion": 2,
//!   "children": [
//!     {
//!       "id": "6f1c...",
//!       "name": "Maya",
//!       "themeColor": "pastelMint",
//!       "avatar": "girl",
//!       "avatarData": "iVBORw0...",
//!       "transactions": [
//!         { "id": "0b9e...", "amount": 4.0, "description": "Candy",
//!           "date": "2025-11-12T09:30:00Z", "type": "outcome" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Documents written as a bare array of children (schema version 1) are read
//! and upgraded transparently.

pub mod connection;
pub mod document;
pub mod registry_repository;

pub use connection::JsonConnection;
pub use document::{DocumentFormat, CURRENT_SCHEMA_VERSION};
pub use registry_repository::JsonRegistryRepository;
