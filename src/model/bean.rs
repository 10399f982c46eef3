use std::collections::BTreeMap;

use serde::Serialize;

/// A value in a bean definition's property bag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Long(u64),
    Str(String),
    List(Vec<PropertyValue>),
    Object(BTreeMap<String, PropertyValue>),
}

impl From<Option<String>> for PropertyValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(PropertyValue::Null, PropertyValue::Str)
    }
}

impl From<u64> for PropertyValue {
    fn from(value: u64) -> Self {
        PropertyValue::Long(value)
    }
}

/// Conversion of parsed configuration objects into property values.
pub trait ToPropertyValue {
    fn to_property_value(&self) -> PropertyValue;
}

impl ToPropertyValue for String {
    fn to_property_value(&self) -> PropertyValue {
        PropertyValue::Str(self.clone())
    }
}

impl<T: ToPropertyValue> ToPropertyValue for Option<T> {
    fn to_property_value(&self) -> PropertyValue {
        self.as_ref()
            .map_or(PropertyValue::Null, ToPropertyValue::to_property_value)
    }
}

impl<T: ToPropertyValue> ToPropertyValue for Vec<T> {
    fn to_property_value(&self) -> PropertyValue {
        PropertyValue::List(self.iter().map(ToPropertyValue::to_property_value).collect())
    }
}

/// Named properties handed to whatever instantiates the connector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeanDefinition {
    pub bean_class: String,
    pub properties: Vec<(String, PropertyValue)>,
}

impl BeanDefinition {
    pub fn new(bean_class: &str) -> Self {
        Self {
            bean_class: bean_class.to_string(),
            properties: Vec::new(),
        }
    }

    /// Adds a property, replacing an earlier value of the same name in place.
    pub fn add_property_value(&mut self, name: &str, value: impl Into<PropertyValue>) {
        let value = value.into();
        match self.properties.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.properties.push((name.to_string(), value)),
        }
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }
}

/// Typed configuration that renders itself as a bean definition.
pub trait IntoBeanDefinition {
    fn bean_definition(&self) -> BeanDefinition;
}
