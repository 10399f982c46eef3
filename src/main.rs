mod cli;

use std::process;

use clap::Parser;
use colored::control;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use gfipm_dataconnector::namespace::NamespaceHandler;
use gfipm_dataconnector::output::{self, OutputFormat};
use gfipm_dataconnector::rc_config::RcConfig;
use gfipm_dataconnector::config;

fn main() {
    let cli = Cli::parse();

    let path = if cli.path.is_absolute() {
        cli.path.clone()
    } else {
        std::env::current_dir()
            .unwrap_or_default()
            .join(&cli.path)
    };

    let rc_dir = if path.is_dir() {
        path.clone()
    } else {
        path.parent().map(|p| p.to_path_buf()).unwrap_or_default()
    };
    let rc = RcConfig::load(&rc_dir);

    let verbose = cli.verbose || rc.verbose.unwrap_or(false);
    let json = cli.json || rc.json.unwrap_or(false);
    let strict = cli.strict || rc.strict.unwrap_or(false);

    if cli.no_color || rc.no_color.unwrap_or(false) {
        control::set_override(false);
    }

    let default_filter = rc.log_filter(cli.verbose);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if !path.exists() {
        eprintln!("Error: '{}' is not a file or directory", path.display());
        process::exit(2);
    }

    let handler = NamespaceHandler::gfipm();
    let discovered = match config::discover(&path, &handler) {
        Ok(discovered) => discovered,
        Err(e) => {
            eprintln!("Error loading configuration: {:#}", e);
            process::exit(2);
        }
    };

    let format = if json {
        OutputFormat::Json
    } else {
        OutputFormat::Terminal
    };
    output::print_results(&discovered, verbose, format);

    if discovered.failed_files().next().is_some() {
        process::exit(2);
    }
    if strict && output::summarize(&discovered).has_warnings() {
        process::exit(1);
    }
}
