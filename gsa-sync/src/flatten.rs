//! Depth-first flattening of a composite document tree.

use gsa_model::{GenericObject, PropertyValue, TypeCatalog};

/// Flattens `root` into every generic object it contains, parents before
/// children. Nested lists and maps are searched; objects whose schema is
/// marked atomic are returned whole without descending into them.
pub fn flatten(root: &GenericObject, catalog: &TypeCatalog) -> Vec<GenericObject> {
    let mut out = Vec::new();
    visit_object(root, catalog, &mut out);
    out
}

fn visit_object(object: &GenericObject, catalog: &TypeCatalog, out: &mut Vec<GenericObject>) {
    out.push(object.clone());
    if catalog.is_atomic(object) {
        return;
    }
    for value in object.properties.values() {
        visit_value(value, catalog, out);
    }
}

fn visit_value(value: &PropertyValue, catalog: &TypeCatalog, out: &mut Vec<GenericObject>) {
    match value {
        PropertyValue::Object(object) => visit_object(object, catalog, out),
        PropertyValue::List(items) => {
            for item in items {
                visit_value(item, catalog, out);
            }
        }
        PropertyValue::Map(entries) => {
            for item in entries.values() {
                visit_value(item, catalog, out);
            }
        }
        _ => {}
    }
}
