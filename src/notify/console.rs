//! Colored console output for scan progress and hits.

use crate::results::ScanReport;
use crate::types::{Hit, Severity};
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};

/// Console output handler with colors and formatting.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleOutput {
    verbose: bool,
    quiet: bool,
}

impl ConsoleOutput {
    /// Create a new console output handler.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Handler that prints nothing.
    pub fn silent() -> Self {
        Self::new(false, true)
    }

    /// Print scan start message.
    pub fn print_scan_start(&self, domains: usize, checks: usize, urls: usize) {
        if self.quiet {
            return;
        }

        println!(
            "{} Scanning {} domain(s) with {} check(s): {} URL(s) to probe",
            "[*]".bright_blue(),
            domains.to_string().bright_white(),
            checks.to_string().bright_white(),
            urls.to_string().bright_white()
        );
    }

    /// Print scan progress (only in verbose mode).
    pub fn print_progress(&self, message: &str) {
        if self.quiet || !self.verbose {
            return;
        }

        println!("{} {}", "[.]".dimmed(), message.dimmed());
    }

    /// Print a hit as soon as it is found.
    pub fn print_hit(&self, hit: &Hit) {
        if self.quiet {
            return;
        }

        println!(
            "{} {} [{}]",
            "[!]".bright_red(),
            hit.check.bright_white().bold(),
            colorize_severity(hit.severity.as_str(), hit.severity)
        );
        println!("    |-- URL:    {}", hit.url);
        println!("    +-- Plugin: {}", hit.plugin.dimmed());
    }

    /// Print scan summary.
    pub fn print_summary(&self, report: &ScanReport) {
        if self.quiet {
            return;
        }

        println!();
        println!("{}", "=== Scan Summary ===".bright_cyan());
        println!("  Duration:  {:.2}s", report.duration_secs);
        println!(
            "  Probed:    {}/{} URL(s)",
            report.targets_probed, report.targets_total
        );
        if report.failed_probes > 0 {
            println!(
                "  Failed:    {}",
                report.failed_probes.to_string().yellow()
            );
        }

        if report.is_empty() {
            println!("  {}", "No vulnerabilities found.".green());
        } else {
            let counts: Vec<String> = report
                .severity_counts()
                .into_iter()
                .map(|(level, count)| format!("{} {}", count, colorize_severity(level.as_str(), level)))
                .collect();
            println!(
                "  {} ({})",
                format!("HITS FOUND: {}", report.hits.len()).red().bold(),
                counts.join(", ")
            );
        }

        if report.cancelled {
            println!("  {}", "Scan cancelled: results are partial.".yellow());
        }

        println!();
    }

    /// Create a progress bar.
    pub fn create_progress_bar(&self, total: u64, message: &str) -> Option<ProgressBar> {
        if self.quiet || self.verbose || total == 0 {
            return None;
        }

        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .ok()?
            .progress_chars("#>-");

        let pb = ProgressBar::new(total);
        pb.set_style(style);
        pb.set_message(message.to_string());
        Some(pb)
    }
}

/// Color `text` with the color of `severity`.
pub fn colorize_severity(text: &str, severity: Severity) -> ColoredString {
    match severity {
        Severity::High => text.red().bold(),
        Severity::Medium => text.yellow().bold(),
        Severity::Low => text.blue(),
        Severity::Informational => text.dimmed(),
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(false, false)
    }
}
