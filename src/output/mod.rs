pub mod json;
pub mod terminal;

use crate::config::DiscoveredConfig;
use crate::result::ParseSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Json,
}

pub fn print_results(config: &DiscoveredConfig, verbose: bool, format: OutputFormat) {
    let summary = summarize(config);

    match format {
        OutputFormat::Json => json::print(config, &summary),
        OutputFormat::Terminal => terminal::print(config, &summary, verbose),
    }
}

pub fn summarize(config: &DiscoveredConfig) -> ParseSummary {
    ParseSummary::new(
        config.files.len(),
        config.connectors().count(),
        &config.diagnostics(),
    )
}
