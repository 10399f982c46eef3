use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A namespace-qualified XML name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct QName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub local: String,
}

impl QName {
    pub fn new(namespace: &str, local: &str) -> Self {
        Self {
            namespace: Some(namespace.to_string()),
            local: local.to_string(),
        }
    }

    /// A name in no namespace, as used for unprefixed attributes.
    pub fn local(local: &str) -> Self {
        Self {
            namespace: None,
            local: local.to_string(),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace {
            Some(ref ns) => write!(f, "{{{}}}{}", ns, self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XmlAttribute {
    pub name: QName,
    pub value: String,
}

/// Owned, namespace-resolved XML element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Element {
    pub name: QName,
    pub attributes: Vec<XmlAttribute>,
    /// Prefix bindings in scope at this element. The default namespace is keyed by "".
    #[serde(skip)]
    pub namespaces: BTreeMap<String, String>,
    pub children: Vec<Element>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
}

impl Default for QName {
    fn default() -> Self {
        QName::local("")
    }
}

impl Element {
    pub fn attribute(&self, name: &QName) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == *name)
            .map(|a| a.value.as_str())
    }

    /// Value of an attribute in no namespace, `None` when absent.
    pub fn attribute_value(&self, local: &str) -> Option<String> {
        self.attribute(&QName::local(local)).map(str::to_string)
    }

    pub fn has_attribute(&self, local: &str) -> bool {
        self.attribute(&QName::local(local)).is_some()
    }

    /// Direct children with the given qualified name, in document order.
    pub fn child_elements<'a>(&'a self, name: &QName) -> Vec<&'a Element> {
        self.children.iter().filter(|c| c.name == *name).collect()
    }

    /// All descendants (not including `self`) in document order.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        for child in &self.children {
            out.push(child);
            out.extend(child.descendants());
        }
        out
    }

    /// Resolve a prefixed value such as an `xsi:type` against this element's scope.
    pub fn resolve_qname_value(&self, value: &str) -> QName {
        let value = value.trim();
        let (prefix, local) = match value.split_once(':') {
            Some((p, l)) => (p, l),
            None => ("", value),
        };
        QName {
            namespace: self.namespaces.get(prefix).cloned(),
            local: local.to_string(),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        if let Some(id) = self.attribute(&QName::local("id")) {
            write!(f, " id=\"{}\"", id)?;
        }
        write!(f, ">")
    }
}
