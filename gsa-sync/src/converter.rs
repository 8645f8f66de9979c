//! The conversion seam supplied by the host connector.

use crate::cache::SyncCache;
use crate::error::ConversionError;
use gsa_gwa::{Keyword, NativeRecord};
use gsa_model::{GenericObject, TypeCatalog};

/// Converts between native records and generic objects.
///
/// The pipeline owns ordering, caching and failure isolation; a converter only
/// transforms one record or object at a time. It gets read access to the
/// cache so it can resolve references to anything converted in an earlier
/// generation.
pub trait Converter {
    /// Generic types this converter produces and consumes.
    fn catalog(&self) -> &TypeCatalog;

    /// Native keywords whose records are converted while producing
    /// `speckle_type` on send.
    fn native_sources(&self, speckle_type: &str) -> Vec<Keyword>;

    fn can_convert_to_generic(&self, record: &NativeRecord) -> bool;

    fn can_convert_to_native(&self, object: &GenericObject) -> bool;

    /// One native record may expand into several generic objects.
    fn convert_to_generic(
        &self,
        record: &NativeRecord,
        cache: &SyncCache,
    ) -> Result<Vec<GenericObject>, ConversionError>;

    /// The returned record may leave `index` unset; the pipeline assigns one.
    fn convert_to_native(
        &self,
        object: &GenericObject,
        cache: &SyncCache,
    ) -> Result<NativeRecord, ConversionError>;
}
