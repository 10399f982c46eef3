use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::model::bean::BeanDefinition;
use crate::model::element::{Element, QName};
use crate::namespace::{NamespaceHandler, RESOLVER_NAMESPACE};
use crate::parsers;
use crate::parsers::credential::XSI_NAMESPACE;
use crate::parsers::data_connector::{connector_id, ParserContext};
use crate::result::Diagnostic;

/// A data connector definition handled by a registered parser.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedConnector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub type_name: QName,
    pub bean: BeanDefinition,
}

/// Outcome of loading one resolver configuration file.
#[derive(Debug, Serialize)]
pub struct ResolverFile {
    pub path: PathBuf,
    pub connectors: Vec<ParsedConnector>,
    pub diagnostics: Vec<Diagnostic>,
    /// Set when the file could not be read or parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// All discovered and parsed configuration
#[derive(Debug, Serialize)]
pub struct DiscoveredConfig {
    pub base_path: PathBuf,
    pub files: Vec<ResolverFile>,
}

impl DiscoveredConfig {
    pub fn connectors(&self) -> impl Iterator<Item = &ParsedConnector> {
        self.files.iter().flat_map(|f| f.connectors.iter())
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.files
            .iter()
            .flat_map(|f| f.diagnostics.iter().cloned())
            .collect()
    }

    pub fn failed_files(&self) -> impl Iterator<Item = &ResolverFile> {
        self.files.iter().filter(|f| f.error.is_some())
    }
}

/// Load a single resolver file, or every `*.xml` file in a directory.
pub fn discover(path: &Path, handler: &NamespaceHandler) -> Result<DiscoveredConfig> {
    let paths = if path.is_dir() {
        let pattern = path.join("*.xml").to_string_lossy().to_string();
        let mut found: Vec<PathBuf> = glob::glob(&pattern)
            .with_context(|| format!("Invalid search pattern {}", pattern))?
            .filter_map(|e| e.ok())
            .collect();
        found.sort();
        found
    } else if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        anyhow::bail!("'{}' is not a file or directory", path.display());
    };

    let files = paths.iter().map(|p| load_file(p, handler)).collect();

    Ok(DiscoveredConfig {
        base_path: path.to_path_buf(),
        files,
    })
}

fn load_file(path: &Path, handler: &NamespaceHandler) -> ResolverFile {
    let mut ctx = ParserContext::new(&path.display().to_string());
    let result = parsers::element::parse(path)
        .and_then(|root| parse_connectors(&root, handler, &mut ctx));

    let (connectors, error) = match result {
        Ok(connectors) => (connectors, None),
        Err(e) => {
            tracing::error!(file = %path.display(), "{:#}", e);
            (Vec::new(), Some(format!("{:#}", e)))
        }
    };

    ResolverFile {
        path: path.to_path_buf(),
        connectors,
        diagnostics: ctx.into_diagnostics(),
        error,
    }
}

/// Parse every resolver `DataConnector` in the document whose `xsi:type` has a registered parser.
///
/// Types in a namespace the handler owns but does not know are reported;
/// types in other namespaces belong to other plugins and are only noted.
pub fn parse_connectors(
    root: &Element,
    handler: &NamespaceHandler,
    ctx: &mut ParserContext,
) -> Result<Vec<ParsedConnector>> {
    let data_connector = QName::new(RESOLVER_NAMESPACE, "DataConnector");
    let xsi_type = QName::new(XSI_NAMESPACE, "type");
    let mut connectors = Vec::new();

    for element in std::iter::once(root).chain(root.descendants()) {
        if element.name != data_connector {
            continue;
        }
        let type_name = match element.attribute(&xsi_type) {
            Some(value) => element.resolve_qname_value(value),
            None => continue,
        };
        let id = connector_id(element);

        match handler.parser_for(&type_name) {
            Some(parser) => {
                let bean = parser
                    .parse_bean_definition(element, ctx)
                    .with_context(|| {
                        format!(
                            "Failed to parse data connector '{}' of type {}",
                            id.as_deref().unwrap_or("?"),
                            type_name
                        )
                    })?;
                connectors.push(ParsedConnector {
                    id,
                    type_name,
                    bean,
                });
            }
            None if handler.handles_namespace(&type_name) => {
                ctx.warn(
                    element,
                    format!("Unsupported data connector type {} in {}", type_name, ctx.resource()),
                );
            }
            None => {
                ctx.info(element, format!("Skipping data connector of type {}", type_name));
            }
        }
    }

    Ok(connectors)
}
