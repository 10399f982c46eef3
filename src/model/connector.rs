use std::collections::BTreeMap;

use serde::Serialize;

use super::bean::{BeanDefinition, IntoBeanDefinition, PropertyValue, ToPropertyValue};
use super::element::{Element, QName};
use crate::parsers::credential::XSI_NAMESPACE;

/// Default BAE search time limit. Not configurable from XML yet.
pub const DEFAULT_SEARCH_TIME_LIMIT: u64 = 5000;

pub const BAE_BEAN_CLASS: &str = "GfipmBAEDataConnector";
pub const TEST_BEAN_CLASS: &str = "GfipmTestDataConnector";

/// Renames a BAE attribute to a local attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeNameMap {
    pub query_name: Option<String>,
    pub return_name: Option<String>,
}

impl ToPropertyValue for AttributeNameMap {
    fn to_property_value(&self) -> PropertyValue {
        let mut fields = BTreeMap::new();
        fields.insert("QueryName".to_string(), self.query_name.clone().into());
        fields.insert("ReturnName".to_string(), self.return_name.clone().into());
        PropertyValue::Object(fields)
    }
}

/// Parsed `gfipm:BAE` data connector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaeConnectorConfig<C = Credential> {
    pub bae_url: Option<String>,
    pub subject_id: Option<String>,
    pub bae_entity_id: Option<String>,
    pub my_entity_id: Option<String>,
    pub search_time_limit: u64,
    pub bae_attributes: Option<Vec<AttributeNameMap>>,
    pub trust_credential: Option<C>,
    pub auth_credential: Option<C>,
}

impl<C> Default for BaeConnectorConfig<C> {
    fn default() -> Self {
        Self {
            bae_url: None,
            subject_id: None,
            bae_entity_id: None,
            my_entity_id: None,
            search_time_limit: DEFAULT_SEARCH_TIME_LIMIT,
            bae_attributes: None,
            trust_credential: None,
            auth_credential: None,
        }
    }
}

impl<C: ToPropertyValue> IntoBeanDefinition for BaeConnectorConfig<C> {
    fn bean_definition(&self) -> BeanDefinition {
        let mut bean = BeanDefinition::new(BAE_BEAN_CLASS);
        bean.add_property_value("baeURL", self.bae_url.clone());
        bean.add_property_value("subjectId", self.subject_id.clone());
        bean.add_property_value("baeEntityId", self.bae_entity_id.clone());
        bean.add_property_value("myEntityId", self.my_entity_id.clone());
        bean.add_property_value("searchTimeLimit", self.search_time_limit);
        bean.add_property_value("baeAttributes", self.bae_attributes.to_property_value());
        // Credentials are only added when present.
        if let Some(ref trust) = self.trust_credential {
            bean.add_property_value("trustCredential", trust.to_property_value());
        }
        if let Some(ref auth) = self.auth_credential {
            bean.add_property_value("authCredential", auth.to_property_value());
        }
        bean
    }
}

/// Parsed `gfipm:Test` data connector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestConnectorConfig {
    pub path_to_attribute_files: Option<String>,
    pub uid_attribute: Option<String>,
}

impl IntoBeanDefinition for TestConnectorConfig {
    fn bean_definition(&self) -> BeanDefinition {
        let mut bean = BeanDefinition::new(TEST_BEAN_CLASS);
        bean.add_property_value("pathToAttributeFiles", self.path_to_attribute_files.clone());
        bean.add_property_value("uidAttribute", self.uid_attribute.clone());
        bean
    }
}

/// Credential sub-tree kept as-is for the connector to interpret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credential {
    /// Resolved `xsi:type`, if declared.
    pub credential_type: Option<QName>,
    pub element: Element,
}

impl ToPropertyValue for Credential {
    fn to_property_value(&self) -> PropertyValue {
        let mut fields = BTreeMap::new();
        fields.insert("element".to_string(), PropertyValue::Str(self.element.name.to_string()));
        if let Some(ref t) = self.credential_type {
            fields.insert("type".to_string(), PropertyValue::Str(t.to_string()));
        }
        let xsi_type = QName::new(XSI_NAMESPACE, "type");
        let attributes = self
            .element
            .attributes
            .iter()
            .filter(|a| a.name != xsi_type)
            .map(|a| (a.name.local.clone(), PropertyValue::Str(a.value.clone())))
            .collect::<BTreeMap<_, _>>();
        if !attributes.is_empty() {
            fields.insert("attributes".to_string(), PropertyValue::Object(attributes));
        }
        let children = self
            .element
            .children
            .iter()
            .map(|c| {
                let mut child = BTreeMap::new();
                child.insert("element".to_string(), PropertyValue::Str(c.name.to_string()));
                let text = c.text.trim();
                if !text.is_empty() {
                    child.insert("text".to_string(), PropertyValue::Str(text.to_string()));
                }
                PropertyValue::Object(child)
            })
            .collect::<Vec<_>>();
        if !children.is_empty() {
            fields.insert("children".to_string(), PropertyValue::List(children));
        }
        PropertyValue::Object(fields)
    }
}
