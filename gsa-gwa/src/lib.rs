//! GWA record codec.
//!
//! GWA is a pipe-delimited, line-oriented text format. Each line carries one
//! engineering entity:
//!
//! ```text
//! [SET|]KEYWORD.VERSION[:{stream_id:application_id}]|index|field|...
//! ```
//!
//! # Components
//!
//! - **Grammar**: tokenizing and typed field access shared by every record
//! - **Records**: one strongly-typed struct per keyword, implementing [`GwaRecord`]
//! - **Registry**: keyword dispatch and declarative metadata
//!
//! # Example
//!
//! ```
//! use gsa_gwa::{GwaRegistry, PercentOrAbsolute, PropMass};
//!
//! let registry = GwaRegistry::with_defaults();
//! let line = "PROP_MASS.3|7|MyMass|NO_RGB|10|1|1|1|0|0|0|NO|10%|10%|10%";
//! let record = registry.decode(line).unwrap();
//!
//! let mass = record.as_record::<PropMass>().unwrap();
//! assert_eq!(mass.mod_x, Some(PercentOrAbsolute::Percentage(10.0)));
//! assert_eq!(registry.encode(&record, false).unwrap(), vec![line.to_string()]);
//! ```

mod error;
pub mod fields;
pub mod grammar;
mod keyword;
pub mod list;
pub mod profile;
mod record;
pub mod records;
mod registry;

pub use error::{DecodeError, EncodeError, GwaError, GwaResult};
pub use fields::{Colour, PercentOrAbsolute};
pub use keyword::Keyword;
pub use list::{EntityList, ListItem};
pub use profile::{PathCommand, PerimeterPoint, Profile, StandardShape};
pub use record::{BodyVariant, GwaRecord, NativeRecord, RecordBody};
pub use records::*;
pub use registry::{DecodedLine, GwaRegistry, RecordCodec, Registration, TypedCodec};
