//! Synchronization core for the GSA connector.
//!
//! Moves engineering records between the GWA text format and a generic
//! property-bag document tree, converting types in dependency order so that
//! composite objects are only built after their constituents exist.
//!
//! # Components
//!
//! - **Cache**: native records and generic objects for one send-or-receive cycle
//! - **Resolver**: partitions types into dependency generations
//! - **Converter**: the per-record conversion seam supplied by the host
//! - **Pipeline**: orchestrates load, send and receive passes
//!
//! # Passes
//!
//! 1. **Load**: raw lines are decoded by the registry into the cache
//! 2. **Send**: each generation's native records are converted to generic objects
//!    and collected into one composite
//! 3. **Receive**: an incoming composite is flattened and cached, then converted
//!    back generation by generation and re-serialized
//!
//! Per-record problems land in reports; only an empty load or an unorderable
//! type graph fails a pass.
//!
//! # Example
//!
//! ```
//! use gsa_sync::build_generations;
//!
//! let types = ["Element", "Property", "Material"];
//! let generations = build_generations(&types, |t| match *t {
//!     "Element" => vec!["Property"],
//!     "Property" => vec!["Material"],
//!     _ => vec![],
//! })
//! .unwrap();
//! assert_eq!(generations, vec![vec!["Material"], vec!["Property"], vec!["Element"]]);
//! ```

pub mod cache;
pub mod config;
mod converter;
mod error;
pub mod flatten;
mod pipeline;
pub mod report;
pub mod resolver;

pub use cache::{CacheCollision, StreamState, SyncCache};
pub use config::PipelineConfig;
pub use converter::Converter;
pub use error::{ConfigError, ConversionError, PipelineError, PipelineResult, ResolveError};
pub use flatten::flatten;
pub use pipeline::{ConversionPipeline, ReceiveOutput, SendOutput};
pub use report::{ConversionFailure, ConversionReport, FailureKey, LoadReport, SkippedLine};
pub use resolver::{build_generations, type_generations, KeywordOrdering};
