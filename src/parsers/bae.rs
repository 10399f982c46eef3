use anyhow::Result;

use crate::model::bean::ToPropertyValue;
use crate::model::connector::{
    AttributeNameMap, BaeConnectorConfig, Credential, DEFAULT_SEARCH_TIME_LIMIT,
};
use crate::model::element::{Element, QName};
use crate::namespace::{bae_type, gfipm};
use crate::parsers::credential::{parse_credential, CredentialParserFn};
use crate::parsers::data_connector::{DataConnectorParser, ParserContext};

pub const ATTRIBUTE_ELEMENT: &str = "Attribute";
pub const TRUST_CREDENTIAL_ELEMENT: &str = "TrustCredential";
pub const AUTHENTICATION_CREDENTIAL_ELEMENT: &str = "AuthenticationCredential";

/// Parser for `gfipm:BAE` data connectors.
///
/// Credential elements are handed to the injected credential parser; by
/// default they are kept as opaque sub-trees.
pub struct BaeConnectorParser<C = Credential> {
    credential_parser: CredentialParserFn<C>,
}

impl BaeConnectorParser<Credential> {
    pub fn new() -> Self {
        Self::with_credential_parser(parse_credential)
    }
}

impl Default for BaeConnectorParser<Credential> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> BaeConnectorParser<C> {
    pub fn with_credential_parser<F>(credential_parser: F) -> Self
    where
        F: Fn(&Element) -> Result<C> + Send + Sync + 'static,
    {
        Self {
            credential_parser: Box::new(credential_parser),
        }
    }

    /// One mapping per `Attribute` child in document order, `None` when there are none.
    pub fn parse_attributes(&self, config: &Element) -> Option<Vec<AttributeNameMap>> {
        let elements = config.child_elements(&gfipm(ATTRIBUTE_ELEMENT));
        if elements.is_empty() {
            return None;
        }
        let attributes = elements
            .into_iter()
            .map(|e| {
                let mapping = AttributeNameMap {
                    query_name: e.attribute_value("QueryName"),
                    return_name: e.attribute_value("ReturnName"),
                };
                tracing::debug!(
                    query_name = mapping.query_name.as_deref().unwrap_or(""),
                    return_name = mapping.return_name.as_deref().unwrap_or(""),
                    "BAE attribute will be returned as local attribute"
                );
                mapping
            })
            .collect();
        Some(attributes)
    }

    /// The first credential element named `local`, warning when there are none or several.
    fn parse_single_credential(
        &self,
        config: &Element,
        local: &str,
        ctx: &mut ParserContext,
    ) -> Result<Option<C>> {
        let elements = config.child_elements(&gfipm(local));
        let first = match elements.first() {
            Some(first) => *first,
            None => {
                ctx.warn(
                    config,
                    format!("No {} element in {}; this is required.", local, ctx.resource()),
                );
                return Ok(None);
            }
        };
        if elements.len() > 1 {
            ctx.warn(
                config,
                format!(
                    "Too many {} elements in {}; only the first has been consulted",
                    local,
                    ctx.resource()
                ),
            );
        }
        (self.credential_parser)(first).map(Some)
    }
}

impl<C: ToPropertyValue> DataConnectorParser for BaeConnectorParser<C> {
    type Config = BaeConnectorConfig<C>;

    fn type_name(&self) -> QName {
        bae_type()
    }

    fn parse(&self, config: &Element, ctx: &mut ParserContext) -> Result<BaeConnectorConfig<C>> {
        tracing::debug!(resource = ctx.resource(), "Parsing BAE configuration {}", config);

        let bae_url = config.attribute_value("baeURL");
        let subject_id = config.attribute_value("subjectId");
        let bae_entity_id = config.attribute_value("baeEntityId");
        let my_entity_id = config.attribute_value("myEntityId");

        if config.has_attribute("searchTimeLimit") {
            ctx.warn(
                config,
                format!(
                    "searchTimeLimit is not supported in {}; using the default of {}",
                    ctx.resource(),
                    DEFAULT_SEARCH_TIME_LIMIT
                ),
            );
        }

        tracing::debug!(
            bae_url = bae_url.as_deref().unwrap_or(""),
            bae_entity_id = bae_entity_id.as_deref().unwrap_or(""),
            my_entity_id = my_entity_id.as_deref().unwrap_or(""),
            subject_id = subject_id.as_deref().unwrap_or(""),
            "Parsed BAE connection settings"
        );

        let bae_attributes = self.parse_attributes(config);
        tracing::debug!("Setting the following attributes for BAE plugin: {:?}", bae_attributes);

        let trust_credential = self.parse_single_credential(config, TRUST_CREDENTIAL_ELEMENT, ctx)?;
        let auth_credential =
            self.parse_single_credential(config, AUTHENTICATION_CREDENTIAL_ELEMENT, ctx)?;

        Ok(BaeConnectorConfig {
            bae_url,
            subject_id,
            bae_entity_id,
            my_entity_id,
            search_time_limit: DEFAULT_SEARCH_TIME_LIMIT,
            bae_attributes,
            trust_credential,
            auth_credential,
        })
    }
}
