//! Semantic checks of a loaded configuration.

use std::fmt;

use crate::schema::SpindleConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Dotted path, e.g. "backend.base_url"
    pub path: &'static str,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.path, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Errors joined into one message, or `Ok` when there are none.
    pub fn into_result(self) -> anyhow::Result<()> {
        let errors: Vec<String> = self
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(ToString::to_string)
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("invalid configuration:\n  {}", errors.join("\n  "))
        }
    }

    fn push(&mut self, severity: Severity, path: &'static str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity,
            path,
            message: message.into(),
        });
    }
}

impl SpindleConfig {
    /// Check values that deserialize fine but cannot work at runtime.
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        match url::Url::parse(&self.backend.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {},
            Ok(url) => result.push(
                Severity::Error,
                "backend.base_url",
                format!("unsupported scheme `{}`", url.scheme()),
            ),
            Err(e) => result.push(
                Severity::Error,
                "backend.base_url",
                format!("`{}` is not a valid URL: {e}", self.backend.base_url),
            ),
        }
        if self.backend.timeout_secs == 0 {
            result.push(Severity::Error, "backend.timeout_secs", "must be at least 1");
        }
        if self.graphql.max_depth == 0 {
            result.push(Severity::Error, "graphql.max_depth", "must be at least 1");
        }
        if self.server.bind == "0.0.0.0" || self.server.bind == "::" {
            result.push(
                Severity::Warning,
                "server.bind",
                "gateway is reachable from every network interface",
            );
        }

        result
    }
}
