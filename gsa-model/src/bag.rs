use crate::{GenericObject, PropertyValue};

/// Get/set-by-name access to an object's dynamic properties.
///
/// Converters read and write generic objects exclusively through this trait.
/// The typed getters return `None` both for missing properties and for
/// properties holding a different kind of value.
pub trait PropertyBag {
    /// Returns the raw value of a property.
    fn get(&self, name: &str) -> Option<&PropertyValue>;

    /// Sets a property, returning the previous value.
    fn set(&mut self, name: &str, value: PropertyValue) -> Option<PropertyValue>;

    /// Removes a property, returning its value.
    fn remove(&mut self, name: &str) -> Option<PropertyValue>;

    /// Property names in insertion order.
    fn property_names(&self) -> Vec<&str>;

    fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    fn get_number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(PropertyValue::as_number)
    }

    fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(PropertyValue::as_bool)
    }

    fn get_text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropertyValue::as_text)
    }

    fn get_reference(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropertyValue::as_reference)
    }

    fn get_object(&self, name: &str) -> Option<&GenericObject> {
        self.get(name).and_then(PropertyValue::as_object)
    }
}

impl PropertyBag for GenericObject {
    fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    fn set(&mut self, name: &str, value: PropertyValue) -> Option<PropertyValue> {
        self.properties.insert(name.to_string(), value)
    }

    fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        self.properties.shift_remove(name)
    }

    fn property_names(&self) -> Vec<&str> {
        self.properties.keys().map(String::as_str).collect()
    }
}
