use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// Something noteworthy found while parsing; never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Description of the configuration resource being parsed.
    pub resource: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_id: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(resource: &str, connector_id: Option<&str>, message: &str) -> Self {
        Self {
            severity: Severity::Warning,
            resource: resource.to_string(),
            connector_id: connector_id.map(|s| s.to_string()),
            message: message.to_string(),
        }
    }

    pub fn info(resource: &str, connector_id: Option<&str>, message: &str) -> Self {
        Self {
            severity: Severity::Info,
            ..Self::warning(resource, connector_id, message)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ParseSummary {
    pub files: usize,
    pub connectors: usize,
    pub warnings: usize,
    pub info: usize,
}

impl ParseSummary {
    pub fn new(files: usize, connectors: usize, diagnostics: &[Diagnostic]) -> Self {
        let warnings = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count();
        let info = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Info)
            .count();
        Self {
            files,
            connectors,
            warnings,
            info,
        }
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_by_severity() {
        let diagnostics = vec![
            Diagnostic::warning("a.xml", Some("bae"), "No TrustCredential"),
            Diagnostic::warning("a.xml", Some("bae"), "No AuthenticationCredential"),
            Diagnostic::info("a.xml", None, "skipped"),
        ];
        let summary = ParseSummary::new(1, 2, &diagnostics);
        assert_eq!(summary.warnings, 2);
        assert_eq!(summary.info, 1);
        assert!(summary.has_warnings());
    }

    #[test]
    fn info_keeps_fields() {
        let d = Diagnostic::info("a.xml", Some("test"), "msg");
        assert_eq!(d.severity, Severity::Info);
        assert_eq!(d.connector_id.as_deref(), Some("test"));
    }
}
