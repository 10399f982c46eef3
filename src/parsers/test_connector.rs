use anyhow::Result;

use crate::model::connector::TestConnectorConfig;
use crate::model::element::{Element, QName};
use crate::namespace::test_type;
use crate::parsers::data_connector::{DataConnectorParser, ParserContext};

/// Parser for `gfipm:Test` flat-file data connectors.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestConnectorParser;

impl DataConnectorParser for TestConnectorParser {
    type Config = TestConnectorConfig;

    fn type_name(&self) -> QName {
        test_type()
    }

    fn parse(&self, config: &Element, ctx: &mut ParserContext) -> Result<TestConnectorConfig> {
        tracing::debug!(resource = ctx.resource(), "Parsing Test configuration {}", config);

        let path_to_attribute_files = config.attribute_value("pathToAttributeFiles");
        let uid_attribute = config.attribute_value("uidAttribute");

        tracing::debug!(
            path = path_to_attribute_files.as_deref().unwrap_or(""),
            uid_attribute = uid_attribute.as_deref().unwrap_or(""),
            "Parsed Test connector settings"
        );

        Ok(TestConnectorConfig {
            path_to_attribute_files,
            uid_attribute,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::bean::{IntoBeanDefinition, PropertyValue};
    use crate::parsers::element::parse_str;

    #[test]
    fn test_parse_test_connector() {
        let xml = r#"
        <resolver:DataConnector xmlns:resolver="urn:mace:shibboleth:2.0:resolver"
                                xmlns:gfipm="http://www.gfipm.net/shibboleth/dc"
                                xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
                                id="test" xsi:type="gfipm:Test"
                                pathToAttributeFiles="/data/users" uidAttribute="uid"/>
        "#;
        let config = parse_str(xml).unwrap();
        let mut ctx = ParserContext::new("attribute-resolver.xml");
        let parsed = TestConnectorParser.parse(&config, &mut ctx).unwrap();

        assert_eq!(parsed.path_to_attribute_files.as_deref(), Some("/data/users"));
        assert_eq!(parsed.uid_attribute.as_deref(), Some("uid"));
        assert!(ctx.diagnostics().is_empty());

        let bean = parsed.bean_definition();
        assert_eq!(bean.bean_class, "GfipmTestDataConnector");
        assert_eq!(
            bean.property("pathToAttributeFiles"),
            Some(&PropertyValue::Str("/data/users".to_string()))
        );
        assert_eq!(
            bean.property("uidAttribute"),
            Some(&PropertyValue::Str("uid".to_string()))
        );
    }

    #[test]
    fn test_missing_attributes_are_none() {
        let config = parse_str(r#"<DataConnector id="test" uidAttribute="uid"/>"#).unwrap();
        let mut ctx = ParserContext::new("test");
        let parsed = TestConnectorParser.parse(&config, &mut ctx).unwrap();
        assert!(parsed.path_to_attribute_files.is_none());
        assert_eq!(parsed.uid_attribute.as_deref(), Some("uid"));
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn test_children_are_ignored() {
        let config = parse_str(
            r#"<DataConnector xmlns:gfipm="http://www.gfipm.net/shibboleth/dc" pathToAttributeFiles="/tmp">
                   <gfipm:Attribute QueryName="a" ReturnName="b"/>
               </DataConnector>"#,
        )
        .unwrap();
        let parsed = TestConnectorParser
            .parse(&config, &mut ParserContext::new("test"))
            .unwrap();
        assert_eq!(
            parsed,
            TestConnectorConfig {
                path_to_attribute_files: Some("/tmp".to_string()),
                uid_attribute: None,
            }
        );
    }
}
