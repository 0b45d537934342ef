//! Scan orchestrator: builds probe targets, dispatches them with bounded
//! concurrency and turns matching checks into hits.

use crate::cancel::CancelToken;
use crate::notify::ConsoleOutput;
use crate::probe::{ProbeResponse, Prober};
use crate::results::{HitCollector, ScanReport};
use crate::signatures::{Plugin, Signatures};
use crate::types::{Hit, Result, RunConfig};
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

/// One URL to probe, with the plugin whose checks apply to its response.
#[derive(Debug, Clone)]
pub struct ProbeTarget<'a> {
    pub domain: &'a str,
    pub plugin: &'a Plugin,
    pub endpoint: &'a str,
    pub url: String,
}

/// Expand domains × plugins × endpoints into probe targets.
///
/// URLs that do not parse are logged and skipped.
pub fn build_targets<'a>(
    domains: &'a [String],
    signatures: &'a Signatures,
    run: &RunConfig,
) -> Vec<ProbeTarget<'a>> {
    let mut targets = Vec::with_capacity(domains.len() * signatures.plugins.len());

    for domain in domains {
        for plugin in &signatures.plugins {
            for endpoint in &plugin.endpoints {
                let url = plugin.url_for(&run.prefix, domain, &run.suffix, endpoint);
                if let Err(e) = url::Url::parse(&url) {
                    warn!("Skipping invalid URL {}: {}", url, e);
                    continue;
                }
                targets.push(ProbeTarget {
                    domain,
                    plugin,
                    endpoint,
                    url,
                });
            }
        }
    }

    targets
}

/// Evaluate every check of the target's plugin against one response.
pub fn evaluate(target: &ProbeTarget<'_>, response: &ProbeResponse) -> Vec<Hit> {
    target
        .plugin
        .checks
        .iter()
        .filter(|check| check.matches(response))
        .map(|check| Hit {
            domain: target.domain.to_string(),
            plugin: target.plugin.display_name().to_string(),
            check: check.name.clone(),
            url: target.url.clone(),
            endpoint: target.endpoint.to_string(),
            severity: check.severity,
            description: check.description.clone(),
            remediation: check.remediation.clone(),
        })
        .collect()
}

/// Counters shared by the concurrent probes of one scan.
#[derive(Default)]
struct ProbeCounters {
    probed: AtomicUsize,
    failed: AtomicUsize,
}

/// Scan orchestrator owning the HTTP prober and console.
pub struct Scanner {
    run: RunConfig,
    prober: Prober,
    console: ConsoleOutput,
}

impl Scanner {
    /// Create a new scanner with the given run configuration.
    pub fn new(run: RunConfig) -> Result<Self> {
        let prober = Prober::new(&run)?;
        Ok(Self {
            run,
            prober,
            console: ConsoleOutput::default(),
        })
    }

    /// Replace the console output handler.
    pub fn with_console(mut self, console: ConsoleOutput) -> Self {
        self.console = console;
        self
    }

    /// Scan every domain against the signatures.
    ///
    /// Filters from the run configuration are applied first. At most
    /// `concurrency` probes are in flight at once. When `cancel` fires, no
    /// new probe starts, in-flight probes are dropped, and the hits found so
    /// far are returned with `cancelled` set.
    pub async fn scan(
        &self,
        domains: &[String],
        signatures: &Signatures,
        cancel: &CancelToken,
    ) -> ScanReport {
        let start_time = Instant::now();

        let signatures = signatures.apply_filters(&self.run);
        let targets = build_targets(domains, &signatures, &self.run);
        let limit = self.run.concurrency.max(1);

        info!(
            "Probing {} URL(s) for {} domain(s), {} check(s), concurrency {}",
            targets.len(),
            domains.len(),
            signatures.check_count(),
            limit
        );
        self.console
            .print_scan_start(domains.len(), signatures.check_count(), targets.len());

        let collector = HitCollector::new();
        let counters = ProbeCounters::default();
        let pb = self
            .console
            .create_progress_bar(targets.len() as u64, "Probing");

        let work = stream::iter(targets.iter()).for_each_concurrent(limit, |target| {
            let collector = &collector;
            let counters = &counters;
            let pb = pb.as_ref();
            async move {
                self.probe_target(target, collector, counters, pb).await;
                if let Some(pb) = pb {
                    pb.inc(1);
                }
            }
        });

        let cancelled = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Scan cancelled, returning {} hit(s) collected so far", collector.len());
                true
            }
            _ = work => false,
        };

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        let report = ScanReport::new(
            collector.take(),
            targets.len(),
            counters.probed.load(Ordering::Relaxed),
            counters.failed.load(Ordering::Relaxed),
            start_time.elapsed(),
            cancelled,
        );

        info!(
            "Scan finished in {:.2}s: {} hit(s), {} failed probe(s)",
            report.duration_secs,
            report.hits.len(),
            report.failed_probes
        );
        self.console.print_summary(&report);

        report
    }

    /// Probe one URL and record the hits of its plugin's checks.
    async fn probe_target(
        &self,
        target: &ProbeTarget<'_>,
        collector: &HitCollector,
        counters: &ProbeCounters,
        pb: Option<&ProgressBar>,
    ) {
        self.console.print_progress(&format!("Testing URL: {}", target.url));

        let response = match self
            .prober
            .probe(&target.url, target.plugin.follow_redirects)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                debug!("Probe failed for {}: {}", target.url, e);
                return;
            }
        };
        counters.probed.fetch_add(1, Ordering::Relaxed);

        for hit in evaluate(target, &response) {
            debug!("Hit: {} [{}] on {}", hit.check, hit.severity, hit.url);
            match pb {
                Some(pb) => pb.suspend(|| self.console.print_hit(&hit)),
                None => self.console.print_hit(&hit),
            }
            collector.push(hit);
        }
    }
}
