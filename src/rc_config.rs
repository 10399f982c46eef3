use std::path::Path;

use serde::Deserialize;

/// Configuration loaded from a `.gfipmrc` TOML file.
///
/// Looked up first next to the parsed path, then in `$HOME`.
/// CLI flags always take precedence over file values.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RcConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
    pub no_color: Option<bool>,
    pub strict: Option<bool>,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log: Option<String>,
}

impl RcConfig {
    /// Load `.gfipmrc` from `dir`, falling back to `$HOME`.
    pub fn load(dir: &Path) -> Self {
        let candidates = [
            Some(dir.join(".gfipmrc")),
            dirs_home().map(|h| h.join(".gfipmrc")),
        ];

        for candidate in candidates.iter().flatten() {
            if let Ok(contents) = std::fs::read_to_string(candidate) {
                match toml::from_str::<RcConfig>(&contents) {
                    Ok(cfg) => return cfg,
                    Err(e) => eprintln!("Ignoring {}: {}", candidate.display(), e),
                }
            }
        }

        RcConfig::default()
    }

    /// Tracing filter used when `RUST_LOG` is unset.
    ///
    /// `-v` on the command line wins over the file's `log`.
    pub fn log_filter(&self, verbose_flag: bool) -> String {
        if verbose_flag {
            return "debug".to_string();
        }
        match self.log {
            Some(ref filter) => filter.clone(),
            None if self.verbose.unwrap_or(false) => "debug".to_string(),
            None => "error".to_string(),
        }
    }
}

fn dirs_home() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME").map(std::path::PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_file() {
        let cfg: RcConfig = toml::from_str("strict = true\nlog = \"debug\"\n").unwrap();
        assert_eq!(cfg.strict, Some(true));
        assert_eq!(cfg.log.as_deref(), Some("debug"));
        assert!(cfg.json.is_none());
    }

    #[test]
    fn verbose_flag_overrides_log_setting() {
        let cfg: RcConfig = toml::from_str("log = \"warn\"\n").unwrap();
        assert_eq!(cfg.log_filter(true), "debug");
        assert_eq!(cfg.log_filter(false), "warn");
    }

    #[test]
    fn log_filter_defaults() {
        assert_eq!(RcConfig::default().log_filter(false), "error");
        let cfg: RcConfig = toml::from_str("verbose = true\n").unwrap();
        assert_eq!(cfg.log_filter(false), "debug");
    }
}
