//! # Storage Module
//!
//! Persistence of the child registry.
//!
//! The domain layer only sees the [`RegistryStorage`] port: load the whole
//! registry, save the whole registry. Two implementations are provided:
//!
//! - **JSON file** ([`JsonRegistryRepository`]): the registry as one document
//!   in the data directory, written via temp file + rename
//! - **Memory** ([`MemoryRegistryStorage`]): in-process storage with failure
//!   switches, for tests and embedding
//!
//! A missing document is an empty registry, not an error.

pub mod json;
pub mod memory;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use json::{DocumentFormat, JsonConnection, JsonRegistryRepository};
pub use memory::MemoryRegistryStorage;
pub use traits::{RegistryStorage, StorageError};
