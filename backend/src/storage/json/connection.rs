use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::StorageError;

pub const DEFAULT_FILE_NAME: &str = "children.json";

/// JsonConnection owns the location of the registry document
#[derive(Debug, Clone, PartialEq)]
pub struct JsonConnection {
    base_directory: PathBuf,
    file_name: String,
}

impl JsonConnection {
    /// Create a connection for `file_name` inside `base_directory`.
    /// The directory is created lazily on the first write.
    pub fn new<P: AsRef<Path>>(base_directory: P, file_name: impl Into<String>) -> Self {
        Self {
            base_directory: base_directory.as_ref().to_path_buf(),
            file_name: file_name.into(),
        }
    }

    /// Connection to `children.json` inside `base_directory`
    pub fn in_directory<P: AsRef<Path>>(base_directory: P) -> Self {
        Self::new(base_directory, DEFAULT_FILE_NAME)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn registry_file_path(&self) -> PathBuf {
        self.base_directory.join(&self.file_name)
    }

    /// Sibling path used for the write-then-rename pattern
    pub fn temp_file_path(&self) -> PathBuf {
        self.base_directory.join(format!("{}.tmp", self.file_name))
    }

    /// Where an unreadable document is copied before it can be overwritten
    pub fn unreadable_copy_path(&self) -> PathBuf {
        self.base_directory.join(format!("{}.unreadable", self.file_name))
    }

    pub fn ensure_base_directory(&self) -> Result<(), StorageError> {
        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory).map_err(|source| StorageError::Write {
                path: self.base_directory.clone(),
                source,
            })?;
            info!("Created data directory: {:?}", self.base_directory);
        }
        Ok(())
    }
}
