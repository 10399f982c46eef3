use clap::Parser;
use std::path::PathBuf;

/// GFIPM data connector configuration parser
#[derive(Parser, Debug)]
#[command(
    name = "gfipm-dc",
    version,
    about = "Parse GFIPM BAE and Test data connector definitions",
    long_about = "Reads Shibboleth attribute-resolver files, parses every gfipm:BAE and \
                  gfipm:Test data connector, and reports the properties each connector \
                  would be constructed with along with any configuration warnings.",
    after_help = "\
EXAMPLES:
  gfipm-dc /opt/shibboleth-idp/conf                      Parse every *.xml in a directory
  gfipm-dc conf/attribute-resolver.xml                   Parse a single file
  gfipm-dc --json conf/attribute-resolver.xml            Output as JSON
  RUST_LOG=gfipm_dataconnector=debug gfipm-dc conf       Trace each parsing step

EXIT CODES:
  0  Parsed (warnings are reported but do not fail the run)
  1  Warnings found and --strict was given
  2  Tool failure (path not found, unreadable or malformed XML)"
)]
pub struct Cli {
    /// Resolver configuration file or directory of XML files
    #[arg(default_value = ".", value_name = "PATH")]
    pub path: PathBuf,

    /// Show unset properties and log each parsing step
    #[arg(short, long)]
    pub verbose: bool,

    /// Output results as JSON (for scripting and CI)
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Exit non-zero when any warning is reported
    #[arg(long)]
    pub strict: bool,
}
