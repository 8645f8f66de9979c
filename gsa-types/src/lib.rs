//! Core type definitions for the GSA sync core.
//!
//! This crate defines the small, format-agnostic types shared by the record
//! codec, the generic object model and the synchronization cache:
//! - Generic object identifiers (UUID v7)
//! - The SID tag carried in a GWA header token (`stream_id` + `application_id`)
//!
//! Record grammars and property bags live in their own crates.

mod ids;
mod sid;

pub use ids::ObjectId;
pub use sid::SidTag;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid SID tag: {0}")]
    InvalidSid(String),
}
