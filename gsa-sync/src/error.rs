//! Error types for the sync layer.

use gsa_gwa::GwaError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// A converter could not transform one record or object.
///
/// Always recoverable: the pipeline records it against the failing key and
/// carries on with the rest of the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ConversionError {
    /// The converter has no conversion for this type.
    #[error("no conversion for {type_name}")]
    Unsupported { type_name: String },

    /// A required property is absent.
    #[error("missing property '{property}'")]
    MissingProperty { property: String },

    /// A property holds a value the converter cannot use.
    #[error("invalid value for '{property}': {reason}")]
    InvalidValue { property: String, reason: String },

    /// A declared reference points at nothing in the batch or the cache.
    #[error("unresolved reference '{key}' in property '{property}'")]
    UnresolvedReference { property: String, key: String },

    /// The cache refused the converted record.
    #[error("cache rejected record: {0}")]
    Rejected(String),

    /// Any other converter failure.
    #[error("{0}")]
    Other(String),
}

/// The dependency graph could not be ordered at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Every remaining type sits on or behind a cycle, with no acyclic root.
    #[error("no acyclic root in type graph; cyclic types: {}", types.join(", "))]
    Cyclic { types: Vec<String> },
}

/// Failures that abort a whole pipeline pass.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The load phase produced no records.
    #[error("no records loaded ({errored} failed to decode, {skipped} skipped)")]
    NothingLoaded { errored: usize, skipped: usize },

    /// Generations could not be built.
    #[error("dependency resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    /// Re-serialization failed.
    #[error("encode failed: {0}")]
    Encode(#[from] GwaError),
}

/// Errors from strict configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid configuration TOML.
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
