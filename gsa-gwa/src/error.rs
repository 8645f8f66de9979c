//! Error types for the record codec.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for registry-level operations.
pub type GwaResult<T> = Result<T, GwaError>;

/// A line's tokens did not satisfy the grammar of its keyword and version.
///
/// `token_index` counts from the header token (index 0), ignoring a leading
/// `SET` token.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{keyword}: token {token_index} ('{token}'): {reason}")]
pub struct DecodeError {
    pub keyword: String,
    pub token_index: usize,
    pub token: String,
    pub reason: String,
}

impl DecodeError {
    pub fn new(
        keyword: impl Into<String>,
        token_index: usize,
        token: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            token_index,
            token: token.into(),
            reason: reason.into(),
        }
    }
}

/// A record could not be written without producing a malformed line.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{keyword}: field '{field}': {reason}")]
pub struct EncodeError {
    pub keyword: String,
    pub field: String,
    pub reason: String,
}

impl EncodeError {
    pub fn new(keyword: impl Into<String>, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the registry when dispatching a line or record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GwaError {
    /// No codec is registered for the keyword. Callers skip the line.
    #[error("unknown keyword '{keyword}'")]
    UnknownKeyword { keyword: String },

    /// The keyword is registered for a different schema version. Callers skip the line.
    #[error("unsupported version {keyword}.{version} (registered version {registered})")]
    UnsupportedVersion {
        keyword: String,
        version: u32,
        registered: u32,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl GwaError {
    /// True for outcomes that warrant a skip-with-warning rather than an error tally.
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::UnknownKeyword { .. } | Self::UnsupportedVersion { .. })
    }
}
