//! Batch reports.
//!
//! Per-record problems are collected here instead of being returned as
//! errors; only the conditions in [`PipelineError`](crate::PipelineError)
//! abort a pass.

use crate::cache::CacheCollision;
use crate::error::ConversionError;
use gsa_gwa::{DecodeError, Keyword, NativeRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// What a failed conversion was keyed by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKey {
    /// A native record on send.
    Native { keyword: Keyword, index: u32 },
    /// A generic object on receive, by application id or id.
    Generic { speckle_type: String, key: String },
}

impl fmt::Display for FailureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native { keyword, index } => write!(f, "{keyword} {index}"),
            Self::Generic { speckle_type, key } => write!(f, "{speckle_type} '{key}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionFailure {
    pub key: FailureKey,
    pub error: ConversionError,
}

/// Outcome of one conversion pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Records or objects converted successfully.
    pub converted: usize,
    pub failures: Vec<ConversionFailure>,
    /// Inputs the converter declined.
    pub skipped: usize,
    /// The pass stopped early at a generation boundary.
    pub cancelled: bool,
}

impl ConversionReport {
    /// True when nothing failed and the pass ran to completion.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub(crate) fn fail(&mut self, key: FailureKey, error: ConversionError) {
        self.failures.push(ConversionFailure { key, error });
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.failures.is_empty() {
            write!(f, "all {} records converted", self.converted)?;
        } else {
            write!(
                f,
                "{} records converted, {} failed",
                self.converted,
                self.failures.len()
            )?;
        }
        if self.skipped > 0 {
            write!(f, ", {} skipped", self.skipped)?;
        }
        if self.cancelled {
            f.write_str(" (cancelled)")?;
        }
        Ok(())
    }
}

/// A line the loader skipped without counting it as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    pub line_number: usize,
    pub reason: String,
}

/// Outcome of the load phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Records stored in the cache.
    pub loaded: usize,
    /// Decode failures by 1-based line number.
    pub errored: BTreeMap<usize, DecodeError>,
    /// Unknown keywords and unsupported versions.
    pub skipped: Vec<SkippedLine>,
    /// Decoded records the cache refused to key.
    pub rejected: Vec<NativeRecord>,
    /// Key collisions raised while loading.
    pub collisions: Vec<CacheCollision>,
}

impl LoadReport {
    pub fn error_count(&self) -> usize {
        self.errored.len()
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} loaded, {} errored, {} skipped",
            self.loaded,
            self.errored.len(),
            self.skipped.len()
        )
    }
}
