//! # Configuration
//!
//! Application settings read from a YAML file:
//!
//! ```yaml
//! data_directory: "/Users/dana/Documents/KidsBank"
//! file_name: "children.json"
//! document_format: "versioned"   # or "legacy"
//! log_level: "info"
//! ```
//!
//! Every key is optional. Without a config file the defaults apply: the
//! registry lives in `KidsBank/children.json` under the user's documents
//! directory.

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::json::connection::DEFAULT_FILE_NAME;
use crate::storage::{DocumentFormat, JsonConnection};

const APP_DIRECTORY_NAME: &str = "KidsBank";
const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub data_directory: PathBuf,
    pub file_name: String,
    pub document_format: DocumentFormat,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            document_format: DocumentFormat::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load settings from `path`, or from the default config location when
    /// no path is given. An explicit path must exist; a missing default
    /// config file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("No config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_yaml(&yaml).with_context(|| format!("Invalid config file {:?}", path))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn connection(&self) -> JsonConnection {
        JsonConnection::new(&self.data_directory, self.file_name.clone())
    }

    pub fn registry_file_path(&self) -> PathBuf {
        self.data_directory.join(&self.file_name)
    }
}

/// `<documents>/KidsBank`, falling back to the home directory and then the
/// working directory
pub fn default_data_directory() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIRECTORY_NAME)
}

/// `<config dir>/KidsBank/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIRECTORY_NAME).join(CONFIG_FILE_NAME))
}
