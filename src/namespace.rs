use std::collections::HashMap;

use crate::model::element::QName;
use crate::parsers::bae::BaeConnectorParser;
use crate::parsers::data_connector::BeanDefinitionParser;
use crate::parsers::test_connector::TestConnectorParser;

/// Namespace of the Shibboleth attribute resolver schema.
pub const RESOLVER_NAMESPACE: &str = "urn:mace:shibboleth:2.0:resolver";

/// Namespace of the GFIPM data connector schema.
pub const GFIPM_NAMESPACE: &str = "http://www.gfipm.net/shibboleth/dc";

pub fn bae_type() -> QName {
    QName::new(GFIPM_NAMESPACE, "BAE")
}

pub fn test_type() -> QName {
    QName::new(GFIPM_NAMESPACE, "Test")
}

/// Qualified name of an element in the GFIPM namespace.
pub fn gfipm(local: &str) -> QName {
    QName::new(GFIPM_NAMESPACE, local)
}

/// Maps schema type names to the parsers registered for them.
pub struct NamespaceHandler {
    parsers: HashMap<QName, Box<dyn BeanDefinitionParser>>,
}

impl NamespaceHandler {
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Handler with the BAE and Test parsers registered.
    pub fn gfipm() -> Self {
        let mut handler = Self::empty();
        handler.register(BaeConnectorParser::new());
        handler.register(TestConnectorParser);
        handler
    }

    pub fn register<P>(&mut self, parser: P)
    where
        P: BeanDefinitionParser + 'static,
    {
        self.parsers.insert(parser.type_name(), Box::new(parser));
    }

    pub fn parser_for(&self, type_name: &QName) -> Option<&dyn BeanDefinitionParser> {
        self.parsers.get(type_name).map(|p| p.as_ref())
    }

    pub fn handles_namespace(&self, type_name: &QName) -> bool {
        self.parsers
            .keys()
            .any(|k| k.namespace.is_some() && k.namespace == type_name.namespace)
    }
}

impl Default for NamespaceHandler {
    fn default() -> Self {
        Self::gfipm()
    }
}
