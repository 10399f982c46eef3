use anyhow::Result;

use crate::model::bean::{BeanDefinition, IntoBeanDefinition};
use crate::model::element::{Element, QName};
use crate::result::Diagnostic;

/// Per-resource state shared by the parsers of one configuration file.
#[derive(Debug, Clone)]
pub struct ParserContext {
    resource: String,
    diagnostics: Vec<Diagnostic>,
}

impl ParserContext {
    pub fn new(resource: &str) -> Self {
        Self {
            resource: resource.to_string(),
            diagnostics: Vec::new(),
        }
    }

    /// Description of the resource being parsed, used in messages.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Log a warning about `config` and keep it for reporting.
    pub fn warn(&mut self, config: &Element, message: String) {
        let id = connector_id(config);
        tracing::warn!(resource = %self.resource, connector_id = id.as_deref().unwrap_or(""), "{}", message);
        self.diagnostics
            .push(Diagnostic::warning(&self.resource, id.as_deref(), &message));
    }

    pub fn info(&mut self, config: &Element, message: String) {
        let id = connector_id(config);
        tracing::info!(resource = %self.resource, connector_id = id.as_deref().unwrap_or(""), "{}", message);
        self.diagnostics
            .push(Diagnostic::info(&self.resource, id.as_deref(), &message));
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// The `id` every data connector definition carries.
pub fn connector_id(config: &Element) -> Option<String> {
    config.attribute_value("id")
}

/// Turns one connector configuration element into its typed configuration.
///
/// Implementations are lenient: missing or repeated elements are reported
/// through the context and never fail the parse.
pub trait DataConnectorParser {
    type Config: IntoBeanDefinition;

    /// Schema type (`xsi:type`) this parser handles.
    fn type_name(&self) -> QName;

    fn parse(&self, config: &Element, ctx: &mut ParserContext) -> Result<Self::Config>;
}

/// Object-safe view of a [`DataConnectorParser`], used for dispatch.
pub trait BeanDefinitionParser: Send + Sync {
    fn type_name(&self) -> QName;

    fn parse_bean_definition(&self, config: &Element, ctx: &mut ParserContext)
        -> Result<BeanDefinition>;
}

impl<P> BeanDefinitionParser for P
where
    P: DataConnectorParser + Send + Sync,
{
    fn type_name(&self) -> QName {
        DataConnectorParser::type_name(self)
    }

    fn parse_bean_definition(
        &self,
        config: &Element,
        ctx: &mut ParserContext,
    ) -> Result<BeanDefinition> {
        Ok(self.parse(config, ctx)?.bean_definition())
    }
}
