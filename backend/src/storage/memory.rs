use log::debug;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::domain::registry::ChildRegistry;
use crate::storage::{RegistryStorage, StorageError};

/// In-process registry storage with switchable failures
#[derive(Debug, Default)]
pub struct MemoryRegistryStorage {
    registry: Mutex<ChildRegistry>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    save_count: AtomicUsize,
}

impl MemoryRegistryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: ChildRegistry) -> Self {
        Self {
            registry: Mutex::new(registry),
            ..Default::default()
        }
    }

    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    /// Snapshot of the last saved (or seeded) registry
    pub fn saved_registry(&self) -> ChildRegistry {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, ChildRegistry> {
        self.registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RegistryStorage for MemoryRegistryStorage {
    fn load(&self) -> Result<ChildRegistry, StorageError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("load disabled".to_string()));
        }
        Ok(self.lock().clone())
    }

    fn save(&self, registry: &ChildRegistry) -> Result<(), StorageError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("save disabled".to_string()));
        }
        *self.lock() = registry.clone();
        let count = self.save_count.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Stored {} children in memory (save #{})", registry.len(), count);
        Ok(())
    }
}
