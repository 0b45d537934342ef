//! JSON export.

use crate::results::ScanReport;
use crate::types::{Hit, Result};
use serde::Serialize;

#[derive(Serialize)]
struct JsonSummary {
    hits: usize,
    targets_total: usize,
    targets_probed: usize,
    failed_probes: usize,
    duration_secs: f64,
    cancelled: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: JsonSummary,
    hits: &'a [Hit],
}

/// Render the report as pretty-printed JSON.
pub fn generate(report: &ScanReport) -> Result<String> {
    let doc = JsonReport {
        summary: JsonSummary {
            hits: report.hits.len(),
            targets_total: report.targets_total,
            targets_probed: report.targets_probed,
            failed_probes: report.failed_probes,
            duration_secs: report.duration_secs,
            cancelled: report.cancelled,
        },
        hits: &report.hits,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}
