//! YAML signature loading and validation.
//!
//! Documents are first deserialized into the permissive `Raw*` structs, then
//! validated into the model. Validation runs once, before any network
//! activity, and fails on the first offending check.

use super::model::{Check, Plugin, Signatures};
use crate::types::{ChopError, Result, Severity};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Signature document as written in YAML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSignatures {
    #[serde(default)]
    pub insecure: bool,
    #[serde(default)]
    pub plugins: Vec<RawPlugin>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlugin {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub endpoints: Vec<String>,
    #[serde(default)]
    pub query_string: Option<String>,
    #[serde(default)]
    pub follow_redirects: Option<bool>,
    #[serde(default)]
    pub checks: Vec<RawCheck>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCheck {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub remediation: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default, rename = "match")]
    pub match_one: Vec<String>,
    #[serde(default, rename = "all_match")]
    pub match_all: Vec<String>,
    #[serde(default)]
    pub no_match: Vec<String>,
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub no_headers: Vec<String>,
}

/// Parse and validate a signature document.
pub fn parse_signatures(yaml: &str) -> Result<Signatures> {
    let raw: RawSignatures = serde_yaml::from_str(yaml)?;
    raw.validate()
}

/// Read, parse and validate a signature file.
pub fn load_signatures(path: &Path) -> Result<Signatures> {
    let content = std::fs::read_to_string(path)?;
    let signatures = parse_signatures(&content)?;
    debug!(
        "Loaded {} plugins ({} checks) from {}",
        signatures.plugins.len(),
        signatures.check_count(),
        path.display()
    );
    Ok(signatures)
}

impl RawSignatures {
    /// Validate every plugin and check into the model.
    pub fn validate(self) -> Result<Signatures> {
        let plugins = self
            .plugins
            .into_iter()
            .enumerate()
            .map(|(idx, plugin)| plugin.validate(idx))
            .collect::<Result<Vec<_>>>()?;

        Ok(Signatures {
            plugins,
            insecure: self.insecure,
        })
    }
}

impl RawPlugin {
    fn validate(self, index: usize) -> Result<Plugin> {
        let mut endpoints = Vec::with_capacity(self.endpoints.len() + 1);
        if let Some(endpoint) = self.endpoint {
            endpoints.push(endpoint);
        }
        for endpoint in self.endpoints {
            if !endpoints.contains(&endpoint) {
                endpoints.push(endpoint);
            }
        }

        let label = self
            .name
            .clone()
            .or_else(|| endpoints.first().cloned())
            .unwrap_or_else(|| format!("#{}", index + 1));

        if endpoints.is_empty() {
            return Err(ChopError::InvalidSignature(format!(
                "plugin '{}' has no endpoint",
                label
            )));
        }

        let checks = self
            .checks
            .into_iter()
            .map(|check| check.validate(&label))
            .collect::<Result<Vec<_>>>()?;

        Ok(Plugin {
            name: self.name,
            endpoints,
            query_string: self.query_string,
            follow_redirects: self.follow_redirects.unwrap_or(true),
            checks,
        })
    }
}

impl RawCheck {
    fn validate(self, plugin: &str) -> Result<Check> {
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                return Err(ChopError::MissingField {
                    plugin: plugin.to_string(),
                    check: "<unnamed>".to_string(),
                    field: "name",
                })
            }
        };

        let missing = |field: &'static str| ChopError::MissingField {
            plugin: plugin.to_string(),
            check: name.clone(),
            field,
        };

        let description = self.description.ok_or_else(|| missing("description"))?;
        let remediation = self.remediation.ok_or_else(|| missing("remediation"))?;
        let raw_severity = self.severity.ok_or_else(|| missing("severity"))?;

        let severity: Severity =
            raw_severity
                .parse()
                .map_err(|_| ChopError::UnknownSeverity {
                    plugin: plugin.to_string(),
                    check: name.clone(),
                    value: raw_severity.clone(),
                })?;

        Ok(Check {
            name,
            description,
            remediation,
            severity,
            status_code: self.status_code,
            match_one: self.match_one,
            match_all: self.match_all,
            no_match: self.no_match,
            headers: self.headers,
            no_headers: self.no_headers,
        })
    }
}
