//! Pipeline configuration.
//!
//! Read from a TOML file:
//!
//! ```toml
//! composite_type = "GsaModel"
//! include_set_prefix = true
//! require_records = true
//! warn_on_collision = true
//! ```
//!
//! Every key is optional.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Configuration for a conversion pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Type name of the composite object produced on send.
    pub composite_type: String,
    /// Emit `SET` lines when re-serializing.
    pub include_set_prefix: bool,
    /// Treat a load that yields no records as fatal.
    pub require_records: bool,
    /// Log cache key collisions at warn level instead of debug.
    pub warn_on_collision: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            composite_type: "GsaModel".to_string(),
            include_set_prefix: true,
            require_records: true,
            warn_on_collision: true,
        }
    }
}

impl PipelineConfig {
    /// Parses configuration TOML; missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Loads configuration from `path`, falling back to defaults if the file
    /// is absent, unreadable or malformed.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No pipeline config at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(config) => {
                info!("Loaded pipeline config from {:?}", path);
                config
            }
            Err(e) => {
                warn!(
                    "Failed to load pipeline config {:?}: {}. Falling back to defaults.",
                    path, e
                );
                Self::default()
            }
        }
    }
}
