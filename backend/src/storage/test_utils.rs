/// Test utilities for filesystem-backed storage tests
///
/// `TestEnvironment` owns a temporary data directory that is removed when the
/// environment is dropped, even if the test panics.
use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use super::json::{DocumentFormat, JsonConnection, JsonRegistryRepository};

pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub connection: JsonConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = JsonConnection::in_directory(&base_path);
        Ok(Self {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn repository(&self) -> JsonRegistryRepository {
        JsonRegistryRepository::new(self.connection.clone())
    }

    pub fn repository_with_format(&self, format: DocumentFormat) -> JsonRegistryRepository {
        JsonRegistryRepository::with_format(self.connection.clone(), format)
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        if std::env::var("KIDSBANK_DEBUG_TESTS").is_ok() {
            println!("Cleaning up test environment: {:?}", self.base_path);
        }
    }
}
