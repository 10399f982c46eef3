use serde::Serialize;

use crate::config::{DiscoveredConfig, ResolverFile};
use crate::result::ParseSummary;

#[derive(Serialize)]
struct JsonReport<'a> {
    files: &'a [ResolverFile],
    summary: &'a ParseSummary,
}

pub fn print(config: &DiscoveredConfig, summary: &ParseSummary) {
    let report = JsonReport {
        files: &config.files,
        summary,
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize JSON: {}", e),
    }
}
