//! Severity threshold and CI exit decision.

use crate::results::ScanReport;
use crate::types::{Hit, Severity};
use std::process::ExitCode;

/// Whether the observed severities reach the blocking threshold.
///
/// No threshold never blocks.
pub fn should_block<I>(threshold: Option<Severity>, observed: I) -> bool
where
    I: IntoIterator<Item = Severity>,
{
    match (threshold, observed.into_iter().max()) {
        (Some(threshold), Some(max)) => max >= threshold,
        _ => false,
    }
}

/// Exit signal handed to the CI pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDecision {
    /// Complete scan with no hits, or none reaching the threshold.
    Pass,
    /// Hits without a threshold, hits reaching it, or an interrupted scan.
    Fail,
}

impl ExitDecision {
    pub fn from_hits(threshold: Option<Severity>, hits: &[Hit]) -> Self {
        Self::from_max(threshold, hits.iter().map(|h| h.severity).max())
    }

    /// Decision for a finished scan. An interrupted scan always fails.
    pub fn from_report(threshold: Option<Severity>, report: &ScanReport) -> Self {
        if report.cancelled {
            return ExitDecision::Fail;
        }
        Self::from_max(threshold, report.max_severity())
    }

    // `max` is the highest hit severity, `None` when nothing was found.
    fn from_max(threshold: Option<Severity>, max: Option<Severity>) -> Self {
        match max {
            None => ExitDecision::Pass,
            Some(_) if threshold.is_none() => ExitDecision::Fail,
            Some(_) if should_block(threshold, max) => ExitDecision::Fail,
            Some(_) => ExitDecision::Pass,
        }
    }
}

impl From<ExitDecision> for ExitCode {
    fn from(decision: ExitDecision) -> Self {
        match decision {
            ExitDecision::Pass => ExitCode::SUCCESS,
            ExitDecision::Fail => ExitCode::FAILURE,
        }
    }
}
