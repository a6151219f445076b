//! # Storage Traits
//!
//! The persistence port the domain layer depends on. Implementations load and
//! save the whole registry at once; there are no partial or incremental writes.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::registry::{ChildRegistry, RegistryError};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("Malformed registry document: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Failed to encode registry: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Unsupported schema version {found} (newest supported is {supported})")]
    UnsupportedSchemaVersion { found: u64, supported: u64 },
    #[error("Invalid registry document: {0}")]
    InvalidRegistry(#[from] RegistryError),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Whole-registry persistence
pub trait RegistryStorage: Send + Sync {
    /// Load the registry; a store that has never been written yields an
    /// empty registry
    fn load(&self) -> Result<ChildRegistry, StorageError>;

    /// Replace the stored registry with `registry`
    fn save(&self, registry: &ChildRegistry) -> Result<(), StorageError>;
}

impl<T: RegistryStorage + ?Sized> RegistryStorage for Arc<T> {
    fn load(&self) -> Result<ChildRegistry, StorageError> {
        (**self).load()
    }

    fn save(&self, registry: &ChildRegistry) -> Result<(), StorageError> {
        (**self).save(registry)
    }
}

impl<T: RegistryStorage + ?Sized> RegistryStorage for Box<T> {
    fn load(&self) -> Result<ChildRegistry, StorageError> {
        (**self).load()
    }

    fn save(&self, registry: &ChildRegistry) -> Result<(), StorageError> {
        (**self).save(registry)
    }
}
