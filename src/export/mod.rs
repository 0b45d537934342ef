//! Result exporters.
//!
//! Writes a finished `ScanReport` as a stdout table, a CSV file or a JSON
//! file. The scan engine itself never touches the filesystem.

pub mod csv;
pub mod json;
pub mod table;

use crate::results::ScanReport;
use crate::types::Result;
use clap::ValueEnum;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

/// Output format selectable with `--export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ExportFormat {
    Stdout,
    Csv,
    Json,
}

/// Base file name used when none is given.
pub fn default_export_filename() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("chopchop_{}", secs)
}

/// Export `report` in every requested format.
///
/// File formats write `<filename>.csv` / `<filename>.json`. Returns the
/// paths written.
pub fn export_results(
    report: &ScanReport,
    formats: &[ExportFormat],
    filename: Option<&str>,
) -> Result<Vec<PathBuf>> {
    let base = filename
        .map(String::from)
        .unwrap_or_else(default_export_filename);
    let mut written = Vec::new();

    for format in formats {
        match format {
            ExportFormat::Stdout => {
                if !report.is_empty() {
                    println!("{}", table::render_hits(&report.hits, true));
                }
            }
            ExportFormat::Csv => {
                let path = PathBuf::from(format!("{}.csv", base));
                std::fs::write(&path, csv::generate(&report.hits))?;
                info!("CSV results written to: {}", path.display());
                written.push(path);
            }
            ExportFormat::Json => {
                let path = PathBuf::from(format!("{}.json", base));
                std::fs::write(&path, json::generate(report)?)?;
                info!("JSON results written to: {}", path.display());
                written.push(path);
            }
        }
    }

    Ok(written)
}
