use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{DepchainError, Result};

/// Configuration for a resolution run.
///
/// Controls which file extensions are treated as source files and which
/// directories are searched when resolving non-explicit references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepchainConfig {
    /// Extensions (no dot) of files that may carry directives. Listed in
    /// registration order; extensions registered later are probed first.
    pub extensions: Vec<String>,
    /// Load paths searched in precedence order for non-explicit references.
    pub load_paths: Vec<String>,
}

impl Default for DepchainConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["js".to_string()],
            load_paths: vec![".".to_string()],
        }
    }
}

/// Loads a configuration from a JSON file.
///
/// A missing file yields the default configuration.
pub fn load_config(path: &Path) -> Result<DepchainConfig> {
    if !path.exists() {
        return Ok(DepchainConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| DepchainError::Config {
        message: format!("failed to read config file '{}': {}", path.display(), e),
    })?;

    let config: DepchainConfig =
        serde_json::from_str(&contents).map_err(|e| DepchainError::Config {
            message: format!("failed to parse config file '{}': {}", path.display(), e),
        })?;

    Ok(config)
}

/// Saves a configuration to a JSON file using an atomic write.
///
/// Writes to a temporary file first and then renames it into place, so a
/// partial write never corrupts an existing configuration.
pub fn save_config(path: &Path, config: &DepchainConfig) -> Result<()> {
    let tmp_path = path.with_extension("tmp");

    let json = serde_json::to_string_pretty(config).map_err(|e| DepchainError::Config {
        message: format!("failed to serialize config: {}", e),
    })?;

    fs::write(&tmp_path, &json).map_err(|e| DepchainError::Config {
        message: format!(
            "failed to write temporary config file '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    fs::rename(&tmp_path, path).map_err(|e| DepchainError::Config {
        message: format!(
            "failed to rename temporary config file '{}' to '{}': {}",
            tmp_path.display(),
            path.display(),
            e
        ),
    })?;

    Ok(())
}
