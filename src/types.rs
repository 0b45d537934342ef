//! Core types and errors for the exposure scanner.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading signatures or scanning.
#[derive(Error, Debug)]
pub enum ChopError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unknown severity '{0}' (expected Informational, Low, Medium or High)")]
    InvalidSeverity(String),

    #[error("Missing {field} field in check '{check}' of plugin '{plugin}'")]
    MissingField {
        plugin: String,
        check: String,
        field: &'static str,
    },

    #[error("Unknown severity '{value}' in check '{check}' of plugin '{plugin}'")]
    UnknownSeverity {
        plugin: String,
        check: String,
        value: String,
    },

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
}

pub type Result<T> = std::result::Result<T, ChopError>;

/// Severity level of a check, ordered from least to most severe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Informational,
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Informational,
        Severity::Low,
        Severity::Medium,
        Severity::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Informational => "Informational",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ChopError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Severity::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ChopError::InvalidSeverity(s.to_string()))
    }
}

/// A check that matched the response of one probed URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hit {
    /// Target domain as supplied by the caller.
    pub domain: String,
    /// Display name of the plugin that produced the probe.
    pub plugin: String,
    /// Name of the matching check.
    pub check: String,
    /// Full URL that was requested.
    pub url: String,
    /// Endpoint path of the plugin (without domain or query string).
    pub endpoint: String,
    pub severity: Severity,
    pub description: String,
    pub remediation: String,
}

/// Immutable settings for one scan run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Maximum number of requests in flight at once.
    pub concurrency: usize,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Skip TLS certificate verification.
    pub insecure: bool,
    /// Keep only checks whose name contains one of these (case-insensitive).
    pub plugin_filters: Vec<String>,
    /// Keep only checks of exactly this severity.
    pub severity_filter: Option<Severity>,
    /// Minimum severity that makes the run fail.
    pub block_threshold: Option<Severity>,
    /// Prepended to every domain when building URLs.
    pub prefix: String,
    /// Appended to every domain, before the endpoint path.
    pub suffix: String,
    pub user_agent: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            timeout: Duration::from_secs(10),
            insecure: false,
            plugin_filters: Vec::new(),
            severity_filter: None,
            block_threshold: None,
            prefix: String::new(),
            suffix: String::new(),
            user_agent: format!("chopchop/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Informational < Severity::Low);
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert_eq!(Severity::ALL.iter().max(), Some(&Severity::High));
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("High".parse::<Severity>().unwrap(), Severity::High);
        assert_eq!("informational".parse::<Severity>().unwrap(), Severity::Informational);
        assert_eq!(" medium ".parse::<Severity>().unwrap(), Severity::Medium);
        assert!("Critical".parse::<Severity>().is_err());
        assert!("".parse::<Severity>().is_err());
    }

    #[test]
    fn test_severity_display_round_trip() {
        for level in Severity::ALL {
            assert_eq!(level.to_string().parse::<Severity>().unwrap(), level);
        }
    }
}
