//! View configuration
//!
//! Configuration is plain serde data loaded from JSON. Every field has a
//! default, so an empty object is a valid configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for a commit view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    /// Report executable files as 0755 instead of 0644
    pub surface_executable_bit: bool,
    /// Owner uid reported for every node
    pub uid: u32,
    /// Owner gid reported for every node
    pub gid: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            surface_executable_bit: false,
            uid: 0,
            gid: 0,
        }
    }
}

impl ViewConfig {
    /// Parses configuration from JSON text
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Renders configuration as pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sets the reported owner
    pub fn with_owner(mut self, uid: u32, gid: u32) -> Self {
        self.uid = uid;
        self.gid = gid;
        self
    }

    /// Sets whether executable files report 0755
    pub fn with_executable_bit(mut self, surface: bool) -> Self {
        self.surface_executable_bit = surface;
        self
    }
}
