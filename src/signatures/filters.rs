//! Severity and name filters over a signature set.
//!
//! Filters never touch the receiver: each one builds a fresh `Signatures`
//! holding clones of the retained checks. Plugins left without checks are
//! dropped.

use super::model::{Check, Signatures};
use crate::types::{RunConfig, Severity};

impl Signatures {
    /// Keep only checks of exactly `level`.
    pub fn filter_by_severity(&self, level: Severity) -> Signatures {
        self.retain_checks(|check| check.severity == level)
    }

    /// Keep only checks whose name contains one of `names`, ignoring case.
    ///
    /// An empty `names` slice keeps everything.
    pub fn filter_by_names<S: AsRef<str>>(&self, names: &[S]) -> Signatures {
        if names.is_empty() {
            return self.clone();
        }

        let needles: Vec<String> = names.iter().map(|n| n.as_ref().to_lowercase()).collect();
        self.retain_checks(|check| {
            let name = check.name.to_lowercase();
            needles.iter().any(|needle| name.contains(needle.as_str()))
        })
    }

    /// Apply the filters configured for a run.
    pub fn apply_filters(&self, run: &RunConfig) -> Signatures {
        let filtered = self.filter_by_names(run.plugin_filters.as_slice());
        match run.severity_filter {
            Some(level) => filtered.filter_by_severity(level),
            None => filtered,
        }
    }

    fn retain_checks<F>(&self, keep: F) -> Signatures
    where
        F: Fn(&Check) -> bool,
    {
        let plugins = self
            .plugins
            .iter()
            .filter_map(|plugin| {
                let checks: Vec<Check> = plugin
                    .checks
                    .iter()
                    .filter(|&check| keep(check))
                    .cloned()
                    .collect();
                if checks.is_empty() {
                    return None;
                }
                let mut kept = plugin.clone();
                kept.checks = checks;
                Some(kept)
            })
            .collect();

        Signatures {
            plugins,
            insecure: self.insecure,
        }
    }
}
