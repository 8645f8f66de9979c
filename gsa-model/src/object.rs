use crate::{PropertyValue, TypeSchema};
use gsa_types::ObjectId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A generic interchange object.
///
/// The `speckle_type` names the object's schema; `properties` is an
/// insertion-ordered bag. The correlation key with native records is the
/// application id, falling back to `id` when absent or empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericObject {
    pub speckle_type: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(default)]
    pub properties: IndexMap<String, PropertyValue>,
}

impl GenericObject {
    /// Creates an empty object of the given type with a freshly minted id.
    pub fn new(speckle_type: impl Into<String>) -> Self {
        Self {
            speckle_type: speckle_type.into(),
            id: ObjectId::new().to_string(),
            application_id: None,
            properties: IndexMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_application_id(mut self, application_id: impl Into<String>) -> Self {
        let application_id = application_id.into();
        self.application_id = (!application_id.is_empty()).then_some(application_id);
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// The cache key: application id when present, otherwise `id`.
    pub fn key(&self) -> &str {
        match self.application_id.as_deref() {
            Some(app_id) if !app_id.is_empty() => app_id,
            _ => &self.id,
        }
    }

    /// Keys referenced through the properties `schema` declares as references.
    ///
    /// Properties not declared by the schema are never inspected, even if
    /// they happen to hold [`PropertyValue::Reference`] values.
    pub fn referenced_keys(&self, schema: &TypeSchema) -> Vec<&str> {
        let mut keys = Vec::new();
        for reference in &schema.references {
            if let Some(value) = self.properties.get(&reference.property) {
                collect_reference_keys(value, &mut keys);
            }
        }
        keys
    }

    /// Serializes the object (including nested values) to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

fn collect_reference_keys<'a>(value: &'a PropertyValue, keys: &mut Vec<&'a str>) {
    match value {
        PropertyValue::List(items) => {
            for item in items {
                collect_reference_keys(item, keys);
            }
        }
        other => {
            if let Some(key) = other.as_reference() {
                keys.push(key);
            }
        }
    }
}
