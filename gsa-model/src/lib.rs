//! Generic object model for the GSA sync core.
//!
//! Defines the interchange side of every conversion:
//! - [`GenericObject`]: a typed property bag correlated to native records by key
//! - [`PropertyValue`]: the dynamic values a property can hold, including
//!   references and nested objects
//! - [`PropertyBag`]: get/set-by-name capability used by converters
//! - [`TypeSchema`] / [`TypeCatalog`]: the explicit list of reference-typed
//!   properties per type, used for dependency-edge discovery
//!
//! Nothing here inspects values at runtime to discover references; a property
//! is a reference only when its type's schema declares it so.

mod bag;
mod object;
mod schema;
mod value;

pub use bag::PropertyBag;
pub use object::GenericObject;
pub use schema::{Cardinality, ReferenceProperty, TypeCatalog, TypeSchema};
pub use value::PropertyValue;
