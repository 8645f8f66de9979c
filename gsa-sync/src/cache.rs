//! The synchronization cache.
//!
//! Holds both sides of one send-or-receive cycle: native records keyed by
//! `(keyword, index)` and generic objects keyed by `(type, key)`, where key is
//! the application id falling back to `id`. Upserts are last-writer-wins, with
//! one exception: [`StreamState`] flags are merged by logical OR.
//!
//! The cache is not synchronized. All mutation happens from a single pipeline
//! pass.

use gsa_gwa::{Keyword, NativeRecord};
use gsa_model::GenericObject;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Whether a stream is being sent and/or received in this document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamState {
    pub stream_id: String,
    pub is_sending: bool,
    pub is_receiving: bool,
}

impl StreamState {
    pub fn new(stream_id: impl Into<String>, is_sending: bool, is_receiving: bool) -> Self {
        Self {
            stream_id: stream_id.into(),
            is_sending,
            is_receiving,
        }
    }

    pub fn sending(stream_id: impl Into<String>) -> Self {
        Self::new(stream_id, true, false)
    }

    pub fn receiving(stream_id: impl Into<String>) -> Self {
        Self::new(stream_id, false, true)
    }
}

/// An upsert replaced a different value stored under the same key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheCollision {
    /// Native keyword or generic type name.
    pub type_name: String,
    pub key: String,
}

impl fmt::Display for CacheCollision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' replaced", self.type_name, self.key)
    }
}

/// In-memory store for one open document.
#[derive(Debug, Default)]
pub struct SyncCache {
    natives: IndexMap<Keyword, IndexMap<u32, NativeRecord>>,
    /// Generic objects produced from each native record.
    speckle: IndexMap<(Keyword, u32), IndexMap<String, GenericObject>>,
    generics: IndexMap<String, IndexMap<String, GenericObject>>,
    streams: IndexMap<String, StreamState>,
    collisions: Vec<CacheCollision>,
    quiet_collisions: bool,
}

impl SyncCache {
    /// Creates an empty cache that logs collisions at warn level.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collision_warnings(warn_on_collision: bool) -> Self {
        Self {
            quiet_collisions: !warn_on_collision,
            ..Self::default()
        }
    }

    fn record_collision(&mut self, type_name: &str, key: &str) {
        if !self.quiet_collisions {
            warn!("Cache key collision: {} '{}' replaced", type_name, key);
        } else {
            debug!("Cache key collision: {} '{}' replaced", type_name, key);
        }
        self.collisions.push(CacheCollision {
            type_name: type_name.to_string(),
            key: key.to_string(),
        });
    }

    // ── Native side ──────────────────────────────────────────────

    /// Stores or replaces a native record at `(keyword, index)`.
    ///
    /// Returns `false` for records that cannot be keyed: embedded-only
    /// records and records without an index.
    pub fn upsert_native(&mut self, record: NativeRecord) -> bool {
        if !record.is_self_contained() {
            debug!("Refusing embedded-only {} record", record.keyword());
            return false;
        }
        let Some(index) = record.index else {
            debug!("Refusing {} record without an index", record.keyword());
            return false;
        };

        let keyword = record.keyword();
        let previous = self
            .natives
            .entry(keyword)
            .or_default()
            .insert(index, record.clone());
        if previous.is_some_and(|p| p != record) {
            self.record_collision(keyword.as_str(), &index.to_string());
        }
        true
    }

    /// All cached records of a keyword, in insertion order.
    pub fn get_native(&self, keyword: Keyword) -> Vec<&NativeRecord> {
        self.natives
            .get(&keyword)
            .map(|records| records.values().collect())
            .unwrap_or_default()
    }

    pub fn native(&self, keyword: Keyword, index: u32) -> Option<&NativeRecord> {
        self.natives.get(&keyword)?.get(&index)
    }

    pub fn native_by_application_id(
        &self,
        keyword: Keyword,
        application_id: &str,
    ) -> Option<&NativeRecord> {
        self.natives
            .get(&keyword)?
            .values()
            .find(|r| r.application_id() == Some(application_id))
    }

    /// The lowest index above every cached index of the keyword.
    pub fn next_free_index(&self, keyword: Keyword) -> u32 {
        self.natives
            .get(&keyword)
            .and_then(|records| records.keys().max())
            .map_or(1, |max| max + 1)
    }

    pub fn native_count(&self) -> usize {
        self.natives.values().map(IndexMap::len).sum()
    }

    /// Keywords with at least one cached record, in first-seen order.
    pub fn native_keywords(&self) -> Vec<Keyword> {
        self.natives
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(keyword, _)| *keyword)
            .collect()
    }

    // ── Generic side ─────────────────────────────────────────────

    /// Records the generic objects produced from one native record.
    ///
    /// Replaces whatever was recorded for the record before, and makes each
    /// object reachable through [`generic`](Self::generic).
    pub fn set_speckle(
        &mut self,
        record: &NativeRecord,
        objects: IndexMap<String, GenericObject>,
    ) {
        let Some(index) = record.index else {
            debug!("Ignoring conversion output for unindexed {} record", record.keyword());
            return;
        };
        for (key, object) in &objects {
            self.insert_generic(key, object.clone());
        }
        self.speckle.insert((record.keyword(), index), objects);
    }

    /// Generic objects produced from the native record at `(keyword, index)`.
    pub fn speckle_for_native(&self, keyword: Keyword, index: u32) -> Vec<&GenericObject> {
        self.speckle
            .get(&(keyword, index))
            .map(|objects| objects.values().collect())
            .unwrap_or_default()
    }

    /// Every generic object produced from native records, in production order.
    pub fn get_speckle_objects(&self) -> Vec<&GenericObject> {
        self.speckle.values().flat_map(IndexMap::values).collect()
    }

    /// Merges incoming generic objects keyed by application id or id.
    ///
    /// Returns `false` if any entry had an empty key; the rest are still stored.
    pub fn upsert_generic(&mut self, objects: IndexMap<String, GenericObject>) -> bool {
        let mut all_stored = true;
        for (key, object) in objects {
            if key.is_empty() {
                debug!("Refusing {} object with an empty key", object.speckle_type);
                all_stored = false;
                continue;
            }
            self.insert_generic(&key, object);
        }
        all_stored
    }

    fn insert_generic(&mut self, key: &str, object: GenericObject) {
        let type_name = object.speckle_type.clone();
        let previous = self
            .generics
            .entry(type_name.clone())
            .or_default()
            .insert(key.to_string(), object.clone());
        if previous.is_some_and(|p| p != object) {
            self.record_collision(&type_name, key);
        }
    }

    /// Looks a generic object up by key across all types.
    pub fn generic(&self, key: &str) -> Option<&GenericObject> {
        self.generics.values().find_map(|objects| objects.get(key))
    }

    /// Cached generic objects of one type, in insertion order.
    pub fn generic_of_type(&self, type_name: &str) -> Vec<&GenericObject> {
        self.generics
            .get(type_name)
            .map(|objects| objects.values().collect())
            .unwrap_or_default()
    }

    pub fn generic_count(&self) -> usize {
        self.generics.values().map(IndexMap::len).sum()
    }

    // ── Stream state ─────────────────────────────────────────────

    /// Merges a stream's flags by logical OR; flags never revert to false.
    pub fn upsert_stream_state(&mut self, state: StreamState) {
        match self.streams.get_mut(&state.stream_id) {
            Some(existing) => {
                existing.is_sending |= state.is_sending;
                existing.is_receiving |= state.is_receiving;
            }
            None => {
                self.streams.insert(state.stream_id.clone(), state);
            }
        }
    }

    pub fn stream_state(&self, stream_id: &str) -> Option<&StreamState> {
        self.streams.get(stream_id)
    }

    pub fn stream_states(&self) -> Vec<&StreamState> {
        self.streams.values().collect()
    }

    // ── Cycle ────────────────────────────────────────────────────

    /// Collisions recorded since the cache was created or last cleared.
    pub fn collisions(&self) -> &[CacheCollision] {
        &self.collisions
    }

    /// Ends the send-or-receive cycle, dropping everything.
    pub fn clear(&mut self) {
        self.natives.clear();
        self.speckle.clear();
        self.generics.clear();
        self.streams.clear();
        self.collisions.clear();
    }
}
