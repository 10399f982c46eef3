use anyhow::{Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{PrefixDeclaration, ResolveResult};
use quick_xml::reader::NsReader;
use std::collections::BTreeMap;
use std::path::Path;

use crate::model::element::{Element, QName, XmlAttribute};

pub fn parse(path: &Path) -> Result<Element> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_str(&content)
}

/// Read an XML document into an owned, namespace-resolved element tree.
pub fn parse_str(xml: &str) -> Result<Element> {
    let mut reader = NsReader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_resolved_event()
            .map(|(ns, event)| (namespace_uri(&ns), event));
        match event {
            Err(e) => anyhow::bail!("XML parse error at position {}: {}", reader.error_position(), e),
            Ok((_, Event::Eof)) => break,
            Ok((Err(prefix), _)) => anyhow::bail!(
                "XML parse error at position {}: unbound namespace prefix '{}'",
                reader.buffer_position(),
                prefix
            ),
            Ok((Ok(ns), Event::Start(e))) => {
                let element = open_element(&reader, ns, &e, stack.last())?;
                stack.push(element);
            }
            Ok((Ok(ns), Event::Empty(e))) => {
                let element = open_element(&reader, ns, &e, stack.last())?;
                close_element(element, &mut stack, &mut root)?;
            }
            Ok((_, Event::End(_))) => {
                if let Some(element) = stack.pop() {
                    close_element(element, &mut stack, &mut root)?;
                }
            }
            Ok((_, Event::Text(t))) => {
                if let Some(current) = stack.last_mut() {
                    let text = t.unescape().map_err(|e| {
                        anyhow::anyhow!("XML parse error at position {}: {}", reader.buffer_position(), e)
                    })?;
                    current.text.push_str(&text);
                }
            }
            Ok((_, Event::CData(c))) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        anyhow::bail!("XML parse error: element {} is never closed", open.name);
    }
    root.context("XML parse error: document has no root element")
}

/// The namespace a name resolved to, or the undeclared prefix as the error.
fn namespace_uri(resolved: &ResolveResult<'_>) -> std::result::Result<Option<String>, String> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Some(String::from_utf8_lossy(ns.as_ref()).to_string())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(String::from_utf8_lossy(prefix).to_string()),
    }
}

fn open_element(
    reader: &NsReader<&[u8]>,
    namespace: Option<String>,
    e: &BytesStart<'_>,
    parent: Option<&Element>,
) -> Result<Element> {
    let mut namespaces = parent.map(|p| p.namespaces.clone()).unwrap_or_default();
    let mut attributes = Vec::new();

    for attr in e.attributes() {
        let attr = attr?;
        let value = attr
            .unescape_value()
            .map_err(|e| {
                anyhow::anyhow!("XML parse error at position {}: {}", reader.buffer_position(), e)
            })?
            .to_string();
        if let Some(binding) = attr.key.as_namespace_binding() {
            let prefix = match binding {
                PrefixDeclaration::Default => String::new(),
                PrefixDeclaration::Named(p) => String::from_utf8_lossy(p).to_string(),
            };
            namespaces.insert(prefix, value);
            continue;
        }
        let (resolved, local) = reader.resolve_attribute(attr.key);
        let namespace = namespace_uri(&resolved).map_err(|prefix| {
            anyhow::anyhow!(
                "XML parse error at position {}: unbound namespace prefix '{}'",
                reader.buffer_position(),
                prefix
            )
        })?;
        attributes.push(XmlAttribute {
            name: QName {
                namespace,
                local: String::from_utf8_lossy(local.as_ref()).to_string(),
            },
            value,
        });
    }

    Ok(Element {
        name: QName {
            namespace,
            local: String::from_utf8_lossy(e.local_name().as_ref()).to_string(),
        },
        attributes,
        namespaces: namespaces_in_scope(namespaces),
        children: Vec::new(),
        text: String::new(),
    })
}

fn namespaces_in_scope(mut namespaces: BTreeMap<String, String>) -> BTreeMap<String, String> {
    namespaces
        .entry("xml".to_string())
        .or_insert_with(|| "http://www.w3.org/XML/1998/namespace".to_string());
    namespaces
}

fn close_element(element: Element, stack: &mut [Element], root: &mut Option<Element>) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_some() {
                anyhow::bail!("XML parse error: more than one root element");
            }
            *root = Some(element);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolves_namespaces() {
        let xml = r#"
        <resolver:AttributeResolver xmlns:resolver="urn:mace:shibboleth:2.0:resolver"
                                    xmlns:gfipm="urn:gfipm:dc"
                                    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
            <resolver:DataConnector id="bae" xsi:type="gfipm:BAE" baeURL="https://bae.example.org">
                <gfipm:Attribute QueryName="q" ReturnName="r"/>
            </resolver:DataConnector>
        </resolver:AttributeResolver>
        "#;

        let root = parse_str(xml).unwrap();
        assert_eq!(
            root.name,
            QName::new("urn:mace:shibboleth:2.0:resolver", "AttributeResolver")
        );
        assert_eq!(root.children.len(), 1);

        let dc = &root.children[0];
        assert_eq!(dc.attribute_value("id").as_deref(), Some("bae"));
        assert_eq!(
            dc.attribute(&QName::new("http://www.w3.org/2001/XMLSchema-instance", "type")),
            Some("gfipm:BAE")
        );
        assert_eq!(
            dc.resolve_qname_value("gfipm:BAE"),
            QName::new("urn:gfipm:dc", "BAE")
        );
        // xmlns declarations are scope, not attributes
        assert!(root.attributes.is_empty());

        let attr = &dc.children[0];
        assert_eq!(attr.name, QName::new("urn:gfipm:dc", "Attribute"));
        assert_eq!(attr.attribute_value("QueryName").as_deref(), Some("q"));
    }

    #[test]
    fn test_default_namespace_applies_to_elements_not_attributes() {
        let xml = r#"<Root xmlns="urn:default" a="1"><Child/></Root>"#;
        let root = parse_str(xml).unwrap();
        assert_eq!(root.name, QName::new("urn:default", "Root"));
        assert_eq!(root.attributes[0].name, QName::local("a"));
        assert_eq!(root.children[0].name, QName::new("urn:default", "Child"));
    }

    #[test]
    fn test_text_is_unescaped() {
        let xml = r#"<Root><Certificate>a &amp; b</Certificate></Root>"#;
        let root = parse_str(xml).unwrap();
        assert_eq!(root.children[0].text, "a & b");
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let err = parse_str("<Root><Open></Root>").unwrap_err();
        assert!(err.to_string().contains("XML parse error"));
    }

    #[test]
    fn test_undeclared_element_prefix_is_an_error() {
        let xml = r#"<DataConnector><gfipm:TrustCredential id="t"/></DataConnector>"#;
        let err = parse_str(xml).unwrap_err().to_string();
        assert!(err.starts_with("XML parse error at position"));
        assert!(err.contains("unbound namespace prefix 'gfipm'"));
    }

    #[test]
    fn test_undeclared_attribute_prefix_is_an_error() {
        let xml = r#"<DataConnector id="bae" xsi:type="gfipm:BAE"/>"#;
        let err = parse_str(xml).unwrap_err().to_string();
        assert!(err.contains("unbound namespace prefix 'xsi'"));
    }

    #[test]
    fn test_bad_entity_reports_position() {
        let text = parse_str("<Root>a &bogus; b</Root>").unwrap_err().to_string();
        assert!(text.starts_with("XML parse error at position"));

        let attr = parse_str(r#"<Root id="&bogus;"/>"#).unwrap_err().to_string();
        assert!(attr.starts_with("XML parse error at position"));
    }

    #[test]
    fn test_empty_document_is_an_error() {
        assert!(parse_str("").is_err());
    }
}
