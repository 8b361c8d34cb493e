//! Surface configuration.
//!
//! Loadable from TOML files or strings, with sensible defaults for every
//! field so partial configs work.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file error: {0}")]
    File(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Initial window/surface settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Enables backend developer tooling where the platform supports it.
    pub debug: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "webframe".to_string(),
            width: 800,
            height: 600,
            debug: false,
        }
    }
}

impl WindowConfig {
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
