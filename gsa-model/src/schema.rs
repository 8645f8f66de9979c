use crate::GenericObject;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Describes a generic object type's reference-typed properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSchema {
    pub type_name: String,
    #[serde(default)]
    pub references: Vec<ReferenceProperty>,
    /// Atomic objects are kept whole when a composite is flattened; their
    /// nested values are not lifted out.
    #[serde(default)]
    pub atomic: bool,
}

/// A property that points at another tracked type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceProperty {
    pub property: String,
    pub target_type: String,
    pub cardinality: Cardinality,
}

/// Whether a reference property holds one key or a collection of keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    One,
    Many,
}

impl TypeSchema {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            references: Vec::new(),
            atomic: false,
        }
    }

    /// Declares a single-valued reference property.
    pub fn reference(self, property: &str, target_type: &str) -> Self {
        self.with_reference(property, target_type, Cardinality::One)
    }

    /// Declares a collection-valued reference property.
    pub fn references_many(self, property: &str, target_type: &str) -> Self {
        self.with_reference(property, target_type, Cardinality::Many)
    }

    /// Marks the type as an atomic unit for flattening.
    pub fn atomic(mut self) -> Self {
        self.atomic = true;
        self
    }

    fn with_reference(mut self, property: &str, target_type: &str, cardinality: Cardinality) -> Self {
        self.references.push(ReferenceProperty {
            property: property.into(),
            target_type: target_type.into(),
            cardinality,
        });
        self
    }

    pub fn is_reference_property(&self, name: &str) -> bool {
        self.references.iter().any(|r| r.property == name)
    }

    /// Distinct referenced type names in declaration order.
    pub fn referenced_types(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for r in &self.references {
            if !out.contains(&r.target_type.as_str()) {
                out.push(&r.target_type);
            }
        }
        out
    }
}

/// The set of generic types tracked by one conversion pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeCatalog {
    schemas: IndexMap<String, TypeSchema>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema, replacing any previous schema for the same type.
    pub fn register(&mut self, schema: TypeSchema) {
        self.schemas.insert(schema.type_name.clone(), schema);
    }

    pub fn with(mut self, schema: TypeSchema) -> Self {
        self.register(schema);
        self
    }

    pub fn get(&self, type_name: &str) -> Option<&TypeSchema> {
        self.schemas.get(type_name)
    }

    pub fn has(&self, type_name: &str) -> bool {
        self.schemas.contains_key(type_name)
    }

    /// Tracked type names in registration order.
    pub fn type_names(&self) -> Vec<String> {
        self.schemas.keys().cloned().collect()
    }

    /// Types directly referenced by `type_name`, restricted to tracked types.
    ///
    /// Self-references are dropped: a type referencing itself is converted
    /// within a single generation.
    pub fn edges(&self, type_name: &str) -> Vec<String> {
        self.get(type_name)
            .map(|schema| {
                schema
                    .referenced_types()
                    .into_iter()
                    .filter(|target| *target != type_name && self.has(target))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether flattening should stop at this object.
    pub fn is_atomic(&self, object: &GenericObject) -> bool {
        self.get(&object.speckle_type).is_some_and(|s| s.atomic)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeSchema> {
        self.schemas.values()
    }
}
