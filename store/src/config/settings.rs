// Store settings, loaded from an optional JSON file and overridden on the command line
use crate::error::StoreError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StoreSettings {
    /// Directory holding one `<key>.json` file per collection.
    pub data_dir: PathBuf,
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub log_filter: String,
    pub pretty_json: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            data_dir: PathBuf::from("./ledger_data"),
            log_filter: "info".to_string(),
            pretty_json: false,
        }
    }
}

impl StoreSettings {
    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        serde_json::from_str(raw).map_err(|e| StoreError::ConfigError(format!("invalid settings: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| StoreError::ConfigError(format!("cannot read '{}': {}", path.display(), e)))?;
        Self::from_json(&raw)
    }
}
