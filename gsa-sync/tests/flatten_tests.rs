use gsa_model::{GenericObject, PropertyValue, TypeCatalog, TypeSchema};
use gsa_sync::flatten;
use indexmap::IndexMap;
use pretty_assertions::assert_eq;

fn named(type_name: &str, id: &str) -> GenericObject {
    GenericObject::new(type_name).with_id(id)
}

fn ids(objects: &[GenericObject]) -> Vec<&str> {
    objects.iter().map(|o| o.id.as_str()).collect()
}

#[test]
fn lone_object_flattens_to_itself() {
    let root = named("Node", "n1");
    let flat = flatten(&root, &TypeCatalog::new());
    assert_eq!(flat, vec![root]);
}

#[test]
fn parents_come_before_children() {
    let material = named("Material", "mat");
    let property = named("Property2D", "prop").with_property("material", material);
    let root = named("GsaModel", "root").with_property(
        "Property2D",
        vec![PropertyValue::from(property)],
    );

    let flat = flatten(&root, &TypeCatalog::new());
    assert_eq!(ids(&flat), vec!["root", "prop", "mat"]);
}

#[test]
fn maps_and_nested_lists_are_searched() {
    let mut map = IndexMap::new();
    map.insert("x".to_string(), PropertyValue::from(named("Axis", "ax")));
    let root = named("GsaModel", "root")
        .with_property("byName", PropertyValue::Map(map))
        .with_property(
            "nested",
            vec![PropertyValue::List(vec![PropertyValue::from(named("Node", "n1"))])],
        )
        .with_property("scalar", 4.0)
        .with_property("link", PropertyValue::reference("elsewhere"));

    let flat = flatten(&root, &TypeCatalog::new());
    assert_eq!(ids(&flat), vec!["root", "ax", "n1"]);
}

#[test]
fn atomic_objects_are_not_descended() {
    let catalog = TypeCatalog::new().with(TypeSchema::new("Mesh").atomic());
    let vertex = named("Point", "p1");
    let mesh = named("Mesh", "mesh").with_property("vertices", vec![PropertyValue::from(vertex)]);
    let root = named("GsaModel", "root").with_property("displayValue", mesh.clone());

    let flat = flatten(&root, &catalog);
    assert_eq!(ids(&flat), vec!["root", "mesh"]);
    assert_eq!(flat[1], mesh);
}
