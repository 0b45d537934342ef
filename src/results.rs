//! Hit aggregation across concurrent probes.

use crate::types::{Hit, Severity};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Shared, append-only collection point for hits.
///
/// Cloning yields another handle to the same collection. Every write goes
/// through the single mutex.
#[derive(Debug, Clone, Default)]
pub struct HitCollector {
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl HitCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, hit: Hit) {
        self.lock().push(hit);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drain every collected hit, leaving the collection empty.
    pub fn take(&self) -> Vec<Hit> {
        std::mem::take(&mut *self.lock())
    }

    // Pushes never leave a partial hit, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Vec<Hit>> {
        self.hits.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Final outcome of one scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Hits sorted by domain, plugin, severity (highest first), check.
    pub hits: Vec<Hit>,
    /// Number of URLs whose probe completed with a response.
    pub targets_probed: usize,
    /// Number of URLs whose probe failed (timeout, connection, TLS).
    pub failed_probes: usize,
    /// Number of URLs scheduled for probing.
    pub targets_total: usize,
    pub duration_secs: f64,
    /// Whether the scan stopped early on cancellation.
    pub cancelled: bool,
}

impl ScanReport {
    pub fn new(
        mut hits: Vec<Hit>,
        targets_total: usize,
        targets_probed: usize,
        failed_probes: usize,
        duration: Duration,
        cancelled: bool,
    ) -> Self {
        sort_hits(&mut hits);
        Self {
            hits,
            targets_probed,
            failed_probes,
            targets_total,
            duration_secs: duration.as_secs_f64(),
            cancelled,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Highest severity among the hits.
    pub fn max_severity(&self) -> Option<Severity> {
        self.hits.iter().map(|h| h.severity).max()
    }

    /// Number of hits per severity, highest first, omitting zero counts.
    pub fn severity_counts(&self) -> Vec<(Severity, usize)> {
        Severity::ALL
            .iter()
            .rev()
            .map(|&level| (level, self.hits.iter().filter(|h| h.severity == level).count()))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

/// Sort hits for presentation.
pub fn sort_hits(hits: &mut [Hit]) {
    hits.sort_by(|a, b| {
        a.domain
            .cmp(&b.domain)
            .then_with(|| a.plugin.cmp(&b.plugin))
            .then_with(|| b.severity.cmp(&a.severity))
            .then_with(|| a.check.cmp(&b.check))
            .then_with(|| a.url.cmp(&b.url))
    });
}
