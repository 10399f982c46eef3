use colored::Colorize;

use crate::config::{DiscoveredConfig, ParsedConnector, ResolverFile};
use crate::model::bean::PropertyValue;
use crate::result::{Diagnostic, ParseSummary, Severity};

pub fn print(config: &DiscoveredConfig, summary: &ParseSummary, verbose: bool) {
    for file in &config.files {
        print_file(file, verbose);
    }

    println!();
    print_summary(summary);
}

fn print_file(file: &ResolverFile, verbose: bool) {
    println!("\n{}", format!("── {} ──", file.path.display()).bold());

    if let Some(ref error) = file.error {
        println!("  {} {}", "FAIL".red().bold(), error);
        return;
    }

    if file.connectors.is_empty() {
        println!("  {}", "no GFIPM data connectors".dimmed());
    }
    for connector in &file.connectors {
        print_connector(connector, verbose);
    }
    for diagnostic in &file.diagnostics {
        if !verbose && diagnostic.severity == Severity::Info {
            continue;
        }
        print_diagnostic(diagnostic);
    }
}

fn print_connector(connector: &ParsedConnector, verbose: bool) {
    let id = connector.id.as_deref().unwrap_or("(no id)");
    let kind = format!("[{}]", connector.type_name.local).dimmed();
    println!("  {} {} {}", "•".dimmed(), kind, id.bold());

    // Unset properties are only interesting when asked for.
    let width = connector
        .bean
        .properties
        .iter()
        .map(|(n, _)| n.len())
        .max()
        .unwrap_or(0);
    for (name, value) in &connector.bean.properties {
        if !verbose && *value == PropertyValue::Null {
            continue;
        }
        match value {
            PropertyValue::List(items) => {
                println!("      {:<width$}", name, width = width);
                for item in items {
                    println!("        {} {}", "↳".dimmed(), format_value(item));
                }
            }
            _ => println!(
                "      {:<width$}  {}",
                name,
                format_value(value),
                width = width
            ),
        }
    }
}

fn print_diagnostic(diagnostic: &Diagnostic) {
    let status = match diagnostic.severity {
        Severity::Warning => "WARN".yellow().bold(),
        Severity::Info => "INFO".blue().bold(),
    };
    match diagnostic.connector_id {
        Some(ref id) => println!("  {} {} {}", status, format!("[{}]", id).dimmed(), diagnostic.message),
        None => println!("  {} {}", status, diagnostic.message),
    }
}

fn format_value(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Null => "-".dimmed().to_string(),
        PropertyValue::Long(n) => n.to_string(),
        PropertyValue::Str(s) => s.clone(),
        PropertyValue::List(items) => {
            let items: Vec<_> = items.iter().map(format_value).collect();
            format!("[{}]", items.join(", "))
        }
        PropertyValue::Object(fields) => {
            let fields: Vec<_> = fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, format_value(v)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
    }
}

fn print_summary(summary: &ParseSummary) {
    let line = format!(
        "Summary: {} files | {} connectors | {} warnings | {} info",
        summary.files, summary.connectors, summary.warnings, summary.info,
    );

    if summary.warnings > 0 {
        println!("{}", line.yellow().bold());
    } else {
        println!("{}", line.green().bold());
    }
}
