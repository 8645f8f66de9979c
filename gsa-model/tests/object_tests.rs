use gsa_model::{GenericObject, PropertyBag, PropertyValue, TypeSchema};
use pretty_assertions::assert_eq;

fn make_object() -> GenericObject {
    GenericObject::new("Property2D")
        .with_id("obj-1")
        .with_application_id("prop2d/a")
        .with_property("name", "Slab")
        .with_property("thickness", 0.2)
        .with_property("axis", PropertyValue::reference("axis/1"))
}

// ── Construction & key ───────────────────────────────────────────

#[test]
fn new_mints_distinct_ids() {
    let a = GenericObject::new("Axis");
    let b = GenericObject::new("Axis");
    assert_ne!(a.id, b.id);
    assert!(a.application_id.is_none());
}

#[test]
fn key_prefers_application_id() {
    let obj = make_object();
    assert_eq!(obj.key(), "prop2d/a");
}

#[test]
fn key_falls_back_to_id() {
    let obj = GenericObject::new("Axis").with_id("abc");
    assert_eq!(obj.key(), "abc");
}

#[test]
fn empty_application_id_is_treated_as_absent() {
    let obj = GenericObject::new("Axis").with_id("abc").with_application_id("");
    assert!(obj.application_id.is_none());
    assert_eq!(obj.key(), "abc");
}

#[test]
fn key_falls_back_when_application_id_set_empty_directly() {
    let mut obj = GenericObject::new("Axis").with_id("abc");
    obj.application_id = Some(String::new());
    assert_eq!(obj.key(), "abc");
}

// ── Property bag ─────────────────────────────────────────────────

#[test]
fn typed_getters_match_value_kind() {
    let obj = make_object();
    assert_eq!(obj.get_text("name"), Some("Slab"));
    assert_eq!(obj.get_number("thickness"), Some(0.2));
    assert_eq!(obj.get_reference("axis"), Some("axis/1"));
    assert_eq!(obj.get_number("name"), None);
    assert_eq!(obj.get_bool("missing"), None);
}

#[test]
fn set_returns_previous_value() {
    let mut obj = make_object();
    let prev = obj.set("thickness", PropertyValue::Number(0.3));
    assert_eq!(prev, Some(PropertyValue::Number(0.2)));
    assert_eq!(obj.get_number("thickness"), Some(0.3));
}

#[test]
fn property_names_keep_insertion_order() {
    let mut obj = make_object();
    obj.set("colour", "NO_RGB".into());
    assert_eq!(obj.property_names(), vec!["name", "thickness", "axis", "colour"]);
}

#[test]
fn remove_keeps_remaining_order() {
    let mut obj = make_object();
    assert!(obj.remove("thickness").is_some());
    assert_eq!(obj.property_names(), vec!["name", "axis"]);
    assert!(!obj.has("thickness"));
}

#[test]
fn nested_object_acts_as_reference() {
    let axis = GenericObject::new("Axis").with_application_id("axis/9");
    let obj = GenericObject::new("Property2D").with_property("axis", axis);
    assert_eq!(obj.get_reference("axis"), Some("axis/9"));
    assert_eq!(obj.get_object("axis").map(|o| o.speckle_type.as_str()), Some("Axis"));
}

#[test]
fn option_converts_to_null() {
    let obj = GenericObject::new("PropertyMass").with_property("mod_x", None::<f64>);
    assert!(obj.get("mod_x").unwrap().is_null());
}

// ── Referenced keys ──────────────────────────────────────────────

#[test]
fn referenced_keys_follow_schema_only() {
    let schema = TypeSchema::new("Property2D").reference("axis", "Axis");
    let obj = make_object().with_property("stray", PropertyValue::reference("x/1"));
    assert_eq!(obj.referenced_keys(&schema), vec!["axis/1"]);
}

#[test]
fn referenced_keys_flatten_lists() {
    let schema = TypeSchema::new("Section").references_many("materials", "Material");
    let obj = GenericObject::new("Section").with_property(
        "materials",
        vec![
            PropertyValue::reference("m/1"),
            GenericObject::new("Material").with_application_id("m/2").into(),
            PropertyValue::Number(3.0),
        ],
    );
    assert_eq!(obj.referenced_keys(&schema), vec!["m/1", "m/2"]);
}

// ── JSON ─────────────────────────────────────────────────────────

#[test]
fn json_roundtrip_preserves_nested_values() {
    let inner = GenericObject::new("Axis").with_id("inner").with_property("origin", vec![
        PropertyValue::Number(0.0),
        PropertyValue::Number(1.5),
    ]);
    let obj = make_object().with_property("local_axis", inner);
    let json = obj.to_json().unwrap();
    let back = GenericObject::from_json(&json).unwrap();
    assert_eq!(back, obj);
}

#[test]
fn json_omits_missing_application_id() {
    let obj = GenericObject::new("Axis").with_id("a");
    let json = obj.to_json().unwrap();
    assert!(!json.contains("application_id"));
}
