//! A small structural converter shared by the pipeline tests.
//!
//! Types: `Material` ← MAT_ANAL, `Property2D` ← PROP_2D (references a
//! `Material`), `PropertyMass` ← PROP_MASS, `LoadCase` ← LOAD_TITLE,
//! `GravityLoad` ← LOAD_GRAVITY (references a `LoadCase`).
//!
//! A PROP_MASS named `FAIL` fails conversion to generic; a `PropertyMass`
//! without a `mass` fails conversion to native.

#![allow(dead_code)]

use gsa_gwa::{
    AnalysisMaterial, Keyword, LoadGravity, LoadTitle, LoadType, NativeRecord, Prop2d, PropMass,
};
use gsa_model::{GenericObject, PropertyBag, PropertyValue, TypeCatalog, TypeSchema};
use gsa_sync::{ConversionError, Converter, SyncCache};

pub struct StructuralConverter {
    catalog: TypeCatalog,
}

impl StructuralConverter {
    pub fn new() -> Self {
        let catalog = TypeCatalog::new()
            .with(TypeSchema::new("GravityLoad").reference("loadCase", "LoadCase"))
            .with(TypeSchema::new("Property2D").reference("material", "Material"))
            .with(TypeSchema::new("PropertyMass"))
            .with(TypeSchema::new("Material"))
            .with(TypeSchema::new("LoadCase"));
        Self { catalog }
    }
}

fn key_for(record: &NativeRecord) -> String {
    match record.application_id() {
        Some(app_id) => app_id.to_string(),
        None => format!("{}-{}", record.keyword(), record.index.unwrap_or(0)),
    }
}

fn missing(property: &str) -> ConversionError {
    ConversionError::MissingProperty {
        property: property.to_string(),
    }
}

/// Key of the first object produced from a cached native record.
fn produced_key(cache: &SyncCache, keyword: Keyword, index: u32) -> Result<String, ConversionError> {
    cache
        .speckle_for_native(keyword, index)
        .first()
        .map(|o| o.key().to_string())
        .ok_or_else(|| ConversionError::UnresolvedReference {
            property: keyword.to_string(),
            key: index.to_string(),
        })
}

/// Index of the native record converted from the object under `key`.
fn native_index(cache: &SyncCache, keyword: Keyword, property: &str, key: &str) -> Result<u32, ConversionError> {
    cache
        .native_by_application_id(keyword, key)
        .and_then(|r| r.index)
        .ok_or_else(|| ConversionError::UnresolvedReference {
            property: property.to_string(),
            key: key.to_string(),
        })
}

impl Converter for StructuralConverter {
    fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    fn native_sources(&self, speckle_type: &str) -> Vec<Keyword> {
        match speckle_type {
            "Material" => vec![Keyword::MatAnal],
            "Property2D" => vec![Keyword::Prop2d],
            "PropertyMass" => vec![Keyword::PropMass],
            "LoadCase" => vec![Keyword::LoadTitle],
            "GravityLoad" => vec![Keyword::LoadGravity],
            _ => vec![],
        }
    }

    fn can_convert_to_generic(&self, record: &NativeRecord) -> bool {
        matches!(
            record.keyword(),
            Keyword::MatAnal
                | Keyword::Prop2d
                | Keyword::PropMass
                | Keyword::LoadTitle
                | Keyword::LoadGravity
        )
    }

    fn can_convert_to_native(&self, object: &GenericObject) -> bool {
        self.catalog.has(&object.speckle_type)
    }

    fn convert_to_generic(
        &self,
        record: &NativeRecord,
        cache: &SyncCache,
    ) -> Result<Vec<GenericObject>, ConversionError> {
        let key = key_for(record);
        let object = if let Some(mat) = record.as_record::<AnalysisMaterial>() {
            GenericObject::new("Material")
                .with_application_id(key)
                .with_property("name", mat.name.as_str())
                .with_property("elasticModulus", mat.elastic_modulus().unwrap_or(0.0))
        } else if let Some(prop) = record.as_record::<Prop2d>() {
            let material = match prop.analysis_material {
                Some(index) => PropertyValue::reference(produced_key(cache, Keyword::MatAnal, index)?),
                None => PropertyValue::Null,
            };
            GenericObject::new("Property2D")
                .with_application_id(key)
                .with_property("name", prop.name.as_str())
                .with_property("thickness", prop.thickness)
                .with_property("material", material)
        } else if let Some(mass) = record.as_record::<PropMass>() {
            if mass.name == "FAIL" {
                return Err(ConversionError::Other("forced failure".to_string()));
            }
            GenericObject::new("PropertyMass")
                .with_application_id(key)
                .with_property("name", mass.name.as_str())
                .with_property("mass", mass.mass)
        } else if let Some(title) = record.as_record::<LoadTitle>() {
            GenericObject::new("LoadCase")
                .with_application_id(key)
                .with_property("name", title.title.as_str())
        } else if let Some(gravity) = record.as_record::<LoadGravity>() {
            let case = produced_key(cache, Keyword::LoadTitle, gravity.load_case)?;
            GenericObject::new("GravityLoad")
                .with_application_id(key)
                .with_property("name", gravity.name.as_str())
                .with_property("gz", gravity.gz)
                .with_property("loadCase", PropertyValue::reference(case))
        } else {
            return Err(ConversionError::Unsupported {
                type_name: record.keyword().to_string(),
            });
        };
        Ok(vec![object])
    }

    fn convert_to_native(
        &self,
        object: &GenericObject,
        cache: &SyncCache,
    ) -> Result<NativeRecord, ConversionError> {
        let name = object.get_text("name").unwrap_or_default().to_string();
        let record = match object.speckle_type.as_str() {
            "Material" => {
                let e = object.get_number("elasticModulus").ok_or_else(|| missing("elasticModulus"))?;
                NativeRecord::new(AnalysisMaterial::isotropic(name, e, 0.3, 7850.0, 0.000012))
            }
            "Property2D" => {
                let mut prop = Prop2d::shell(name, object.get_number("thickness").unwrap_or(0.2));
                if let Some(key) = object.get_reference("material") {
                    prop.analysis_material =
                        Some(native_index(cache, Keyword::MatAnal, "material", key)?);
                }
                NativeRecord::new(prop)
            }
            "PropertyMass" => {
                let mass = object.get_number("mass").ok_or_else(|| missing("mass"))?;
                NativeRecord::new(PropMass::new(name, mass))
            }
            "LoadCase" => NativeRecord::new(LoadTitle::new(name, LoadType::Dead)),
            "GravityLoad" => {
                let key = object.get_reference("loadCase").ok_or_else(|| missing("loadCase"))?;
                let case = native_index(cache, Keyword::LoadTitle, "loadCase", key)?;
                let mut gravity = LoadGravity::self_weight(name, case);
                gravity.gz = object.get_number("gz").unwrap_or(-1.0);
                NativeRecord::new(gravity)
            }
            other => {
                return Err(ConversionError::Unsupported {
                    type_name: other.to_string(),
                })
            }
        };
        Ok(record)
    }
}

/// Installs a test subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub const MODEL_LINES: &[&str] = &[
    "MAT_ANAL.1:{s:steel}|1|MAT_ELAS_ISO|Steel|NO_RGB|6|200000000000|0.3|7850|0.000012|76923076923|0",
    "PROP_2D.7:{s:slab}|1|Slab|NO_RGB|SHELL|GLOBAL|1|CONCRETE|0|0|0.2|CENTROID|0|0|100%|100%|100%|100%",
    "PROP_MASS.3:{s:mass-7}|7|MyMass|NO_RGB|10|1|1|1|0|0|0|NO|10%|10%|10%",
    "PROP_MASS.3:{s:mass-8}|8|MyMass2|NO_RGB|5|2|2|2|0|0|0|NO|5|5|5",
    "LOAD_TITLE.2|1|Dead|DEAD|0||NONE|UNDEF",
    "LOAD_GRAVITY.3|1|Self weight|all||1|0|0|-1",
];
