//! Validated signature model.

use crate::types::Severity;

/// The full rule set loaded for a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signatures {
    pub plugins: Vec<Plugin>,
    /// Skip TLS verification for every probe (ORed with the CLI flag).
    pub insecure: bool,
}

/// A group of checks evaluated against the responses of its endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    pub name: Option<String>,
    /// Relative URIs to probe; never empty after validation.
    pub endpoints: Vec<String>,
    pub query_string: Option<String>,
    pub follow_redirects: bool,
    pub checks: Vec<Check>,
}

/// One rule evaluated against a single HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub name: String,
    pub description: String,
    pub remediation: String,
    pub severity: Severity,
    /// Exact status code the response must carry.
    pub status_code: Option<u16>,
    /// At least one entry must appear in the body.
    pub match_one: Vec<String>,
    /// Every entry must appear in the body.
    pub match_all: Vec<String>,
    /// No entry may appear in the body.
    pub no_match: Vec<String>,
    /// `name:substring` entries that must be present.
    pub headers: Vec<String>,
    /// `name:substring` entries that must be absent.
    pub no_headers: Vec<String>,
}

impl Signatures {
    /// Total number of checks across all plugins.
    pub fn check_count(&self) -> usize {
        self.plugins.iter().map(|p| p.checks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Iterate over every `(plugin, check)` pair.
    pub fn checks(&self) -> impl Iterator<Item = (&Plugin, &Check)> {
        self.plugins
            .iter()
            .flat_map(|plugin| plugin.checks.iter().map(move |check| (plugin, check)))
    }
}

impl Plugin {
    /// Name used in hits and logs: the explicit name, or the first endpoint.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| self.endpoints.first().map(String::as_str))
            .unwrap_or("<unnamed>")
    }

    /// Build the URL probed for one endpoint of this plugin.
    pub fn url_for(&self, prefix: &str, domain: &str, suffix: &str, endpoint: &str) -> String {
        let mut url = format!("{}{}{}{}", prefix, domain, suffix, endpoint);
        if let Some(ref query) = self.query_string {
            if !query.is_empty() {
                url.push('?');
                url.push_str(query);
            }
        }
        url
    }
}

impl Check {
    /// A check with only the mandatory fields and no conditions.
    pub fn new(name: &str, severity: Severity) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            remediation: String::new(),
            severity,
            status_code: None,
            match_one: Vec::new(),
            match_all: Vec::new(),
            no_match: Vec::new(),
            headers: Vec::new(),
            no_headers: Vec::new(),
        }
    }
}
