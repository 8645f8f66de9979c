//! The conversion pipeline.
//!
//! One pipeline value is the whole context of a send-or-receive cycle: the
//! registry, the converter, the cache and the configuration. Each direction is
//! a single linear pass over the dependency generations.
//!
//! ```text
//! send:    lines → load_native → cache → convert_all_to_generic → composite
//! receive: composite → flatten_and_cache → convert_all_to_native → encode_native → lines
//! ```

use crate::cache::SyncCache;
use crate::config::PipelineConfig;
use crate::converter::Converter;
use crate::error::{ConversionError, PipelineError, PipelineResult};
use crate::flatten::flatten;
use crate::report::{ConversionReport, FailureKey, LoadReport, SkippedLine};
use crate::resolver::{type_generations, KeywordOrdering};
use gsa_gwa::{GwaError, GwaRegistry, Keyword, NativeRecord};
use gsa_model::{GenericObject, PropertyValue, TypeSchema};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of a send pass.
#[derive(Debug, Clone)]
pub struct SendOutput {
    /// Generic objects grouped by type name, in generation order.
    pub composite: GenericObject,
    pub report: ConversionReport,
}

/// Result of a receive pass.
#[derive(Debug, Clone)]
pub struct ReceiveOutput {
    /// Converted records, ordered by keyword dependency.
    pub records: Vec<NativeRecord>,
    pub report: ConversionReport,
}

/// Orchestrates bulk conversion in both directions.
pub struct ConversionPipeline {
    registry: GwaRegistry,
    converter: Box<dyn Converter>,
    config: PipelineConfig,
    cache: SyncCache,
    cancelled: Arc<AtomicBool>,
}

impl ConversionPipeline {
    pub fn new(
        registry: GwaRegistry,
        converter: impl Converter + 'static,
        config: PipelineConfig,
    ) -> Self {
        let cache = SyncCache::with_collision_warnings(config.warn_on_collision);
        Self {
            registry,
            converter: Box::new(converter),
            config,
            cache,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn registry(&self) -> &GwaRegistry {
        &self.registry
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn cache(&self) -> &SyncCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut SyncCache {
        &mut self.cache
    }

    /// Flag polled between generations; set it to stop a pass early.
    pub fn cancellation_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Ends the cycle: empties the cache and clears the cancellation flag.
    pub fn reset(&mut self) {
        self.cache.clear();
        self.cancelled.store(false, Ordering::SeqCst);
    }

    // ── Load ─────────────────────────────────────────────────────

    /// Decodes raw lines into the cache.
    ///
    /// Bad lines are tallied in the report. Fails only when no record at all
    /// was loaded and the configuration requires records.
    pub fn load_native<'l, I>(&mut self, lines: I) -> PipelineResult<LoadReport>
    where
        I: IntoIterator<Item = &'l str>,
    {
        let collisions_before = self.cache.collisions().len();
        let mut report = LoadReport::default();

        for decoded in self.registry.decode_lines(lines) {
            let line_number = decoded.line_number;
            match decoded.outcome {
                Ok(record) => {
                    if self.cache.upsert_native(record.clone()) {
                        report.loaded += 1;
                    } else {
                        warn!("Line {}: cache refused {} record", line_number, record.keyword());
                        report.rejected.push(record);
                    }
                }
                Err(GwaError::Decode(e)) => {
                    warn!("Line {}: decode failed: {}", line_number, e);
                    report.errored.insert(line_number, e);
                }
                Err(e) => {
                    warn!("Line {}: skipped: {}", line_number, e);
                    report.skipped.push(SkippedLine {
                        line_number,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report.collisions = self.cache.collisions()[collisions_before..].to_vec();
        info!("Loaded GWA: {}", report);

        if report.loaded == 0 && self.config.require_records {
            return Err(PipelineError::NothingLoaded {
                errored: report.errored.len(),
                skipped: report.skipped.len(),
            });
        }
        Ok(report)
    }

    // ── Send ─────────────────────────────────────────────────────

    /// Converts cached native records to generic objects, generation by
    /// generation, and assembles the composite output.
    pub fn convert_all_to_generic(&mut self) -> PipelineResult<SendOutput> {
        let generations = type_generations(self.converter.catalog())?;
        let mut report = ConversionReport::default();
        let mut seen: HashSet<(Keyword, u32)> = HashSet::new();
        let mut produced: IndexMap<String, Vec<PropertyValue>> = IndexMap::new();

        for (g, generation) in generations.iter().enumerate() {
            if self.is_cancelled() {
                info!("Send cancelled before generation {}", g);
                report.cancelled = true;
                break;
            }
            debug!("Send generation {}: {:?}", g, generation);

            for speckle_type in generation {
                for keyword in self.converter.native_sources(speckle_type) {
                    let records: Vec<NativeRecord> =
                        self.cache.get_native(keyword).into_iter().cloned().collect();
                    for record in records {
                        let Some(index) = record.index else {
                            continue;
                        };
                        if !seen.insert((keyword, index)) {
                            continue;
                        }
                        if !self.converter.can_convert_to_generic(&record) {
                            debug!("Converter declined {} {}", keyword, index);
                            report.skipped += 1;
                            continue;
                        }

                        match self.converter.convert_to_generic(&record, &self.cache) {
                            Ok(objects) => {
                                let mut by_key = IndexMap::new();
                                for object in objects {
                                    produced
                                        .entry(object.speckle_type.clone())
                                        .or_default()
                                        .push(PropertyValue::Object(Box::new(object.clone())));
                                    by_key.insert(object.key().to_string(), object);
                                }
                                self.cache.set_speckle(&record, by_key);
                                report.converted += 1;
                            }
                            Err(e) => {
                                warn!("Failed to convert {} {}: {}", keyword, index, e);
                                report.fail(FailureKey::Native { keyword, index }, e);
                            }
                        }
                    }
                }
            }
        }

        let mut composite = GenericObject::new(self.config.composite_type.clone());
        for (type_name, objects) in produced {
            composite
                .properties
                .insert(type_name, PropertyValue::List(objects));
        }

        info!("Send: {}", report);
        Ok(SendOutput { composite, report })
    }

    // ── Receive ──────────────────────────────────────────────────

    /// Flattens an incoming composite and caches every object in it by
    /// application id, falling back to id. The composite container itself is
    /// not cached. Returns the number of objects cached.
    pub fn flatten_and_cache(&mut self, composite: &GenericObject) -> usize {
        let objects: IndexMap<String, GenericObject> = flatten(composite, self.converter.catalog())
            .into_iter()
            .filter(|o| o.speckle_type != self.config.composite_type)
            .map(|o| (o.key().to_string(), o))
            .collect();
        let count = objects.len();
        if !self.cache.upsert_generic(objects) {
            warn!("Some flattened objects had no usable key");
        }
        debug!("Cached {} flattened objects", count);
        count
    }

    /// Converts cached generic objects to native records, generation by
    /// generation, assigning indices and upserting each record.
    pub fn convert_all_to_native(&mut self) -> PipelineResult<ReceiveOutput> {
        let catalog = self.converter.catalog();
        let generations = type_generations(catalog)?;
        let mut report = ConversionReport::default();
        let mut records = Vec::new();

        for (g, generation) in generations.iter().enumerate() {
            if self.is_cancelled() {
                info!("Receive cancelled before generation {}", g);
                report.cancelled = true;
                break;
            }
            debug!("Receive generation {}: {:?}", g, generation);

            for speckle_type in generation {
                let objects: Vec<GenericObject> = self
                    .cache
                    .generic_of_type(speckle_type)
                    .into_iter()
                    .cloned()
                    .collect();
                let schema = catalog.get(speckle_type);

                for object in objects {
                    let key = FailureKey::Generic {
                        speckle_type: speckle_type.clone(),
                        key: object.key().to_string(),
                    };
                    if !self.converter.can_convert_to_native(&object) {
                        debug!("Converter declined {}", key);
                        report.skipped += 1;
                        continue;
                    }
                    if let Some((property, target)) =
                        schema.and_then(|s| unresolved_reference(&object, s, &self.cache))
                    {
                        let error = ConversionError::UnresolvedReference {
                            property,
                            key: target,
                        };
                        warn!("Failed to convert {}: {}", key, error);
                        report.fail(key, error);
                        continue;
                    }

                    match self.converter.convert_to_native(&object, &self.cache) {
                        Ok(mut record) => {
                            if record.application_id().is_none()
                                && let Some(app_id) = object.application_id.as_deref()
                            {
                                record.sid.set_application_id(Some(app_id.to_string()));
                            }
                            if record.index.is_none() {
                                record.index = Some(assign_index(&self.cache, &record));
                            }
                            let keyword = record.keyword();
                            if self.cache.upsert_native(record.clone()) {
                                report.converted += 1;
                                records.push(record);
                            } else {
                                let error = ConversionError::Rejected(format!(
                                    "{keyword} cannot be stored as a top-level record"
                                ));
                                warn!("Failed to convert {}: {}", key, error);
                                report.fail(key, error);
                            }
                        }
                        Err(e) => {
                            warn!("Failed to convert {}: {}", key, e);
                            report.fail(key, e);
                        }
                    }
                }
            }
        }

        let order: HashMap<Keyword, usize> = self
            .registry
            .keyword_generations()?
            .into_iter()
            .flatten()
            .enumerate()
            .map(|(i, keyword)| (keyword, i))
            .collect();
        records.sort_by_key(|r| order.get(&r.keyword()).copied().unwrap_or(usize::MAX));

        info!("Receive: {}", report);
        Ok(ReceiveOutput { records, report })
    }

    /// Re-serializes records through the registry.
    pub fn encode_native(&self, records: &[NativeRecord]) -> PipelineResult<Vec<String>> {
        Ok(self
            .registry
            .encode_all(records, self.config.include_set_prefix)?)
    }
}

/// Reuses the index of a cached record with the same application id,
/// otherwise takes the next free index.
fn assign_index(cache: &SyncCache, record: &NativeRecord) -> u32 {
    let keyword = record.keyword();
    record
        .application_id()
        .and_then(|app_id| cache.native_by_application_id(keyword, app_id))
        .and_then(|existing| existing.index)
        .unwrap_or_else(|| cache.next_free_index(keyword))
}

/// The first declared reference of `object` that resolves to nothing in the
/// cache, as `(property, key)`.
fn unresolved_reference(
    object: &GenericObject,
    schema: &TypeSchema,
    cache: &SyncCache,
) -> Option<(String, String)> {
    for reference in &schema.references {
        let Some(value) = object.properties.get(&reference.property) else {
            continue;
        };
        let keys: Vec<&str> = match value {
            PropertyValue::List(items) => items.iter().filter_map(PropertyValue::as_reference).collect(),
            other => other.as_reference().into_iter().collect(),
        };
        for key in keys {
            if !is_resolvable(cache, key) {
                return Some((reference.property.clone(), key.to_string()));
            }
        }
    }
    None
}

fn is_resolvable(cache: &SyncCache, key: &str) -> bool {
    cache.generic(key).is_some()
        || cache
            .native_keywords()
            .into_iter()
            .any(|keyword| cache.native_by_application_id(keyword, key).is_some())
}
