//! Plain-text tables for the terminal.

use crate::notify::colorize_severity;
use crate::signatures::Signatures;
use crate::types::{Hit, Severity};

/// Render hits as an aligned table with a total footer.
///
/// With `color`, severities are colored after padding so alignment holds.
pub fn render_hits(hits: &[Hit], color: bool) -> String {
    let header = ["URL", "Plugin", "Check", "Severity", "Remediation"];
    let rows: Vec<([String; 5], Severity)> = hits
        .iter()
        .map(|hit| {
            (
                [
                    hit.url.clone(),
                    hit.plugin.clone(),
                    hit.check.clone(),
                    hit.severity.to_string(),
                    hit.remediation.clone(),
                ],
                hit.severity,
            )
        })
        .collect();

    let widths = column_widths(&header, rows.iter().map(|(cells, _)| cells));
    let mut out = String::new();
    push_row(&mut out, &header.map(String::from), &widths, None);
    push_separator(&mut out, &widths);
    for (cells, severity) in &rows {
        let highlight = if color { Some((3, *severity)) } else { None };
        push_row(&mut out, cells, &widths, highlight);
    }
    push_separator(&mut out, &widths);
    out.push_str(&format!("Total hits: {}", hits.len()));
    out
}

/// Render the checks of a signature set, optionally restricted to one
/// severity, with a total footer.
pub fn render_checks(signatures: &Signatures, severity: Option<Severity>) -> String {
    let header = ["Endpoint", "Check", "Severity", "Description"];
    let rows: Vec<[String; 4]> = signatures
        .checks()
        .filter(|(_, check)| severity.map_or(true, |level| check.severity == level))
        .map(|(plugin, check)| {
            [
                plugin.endpoints.join(", "),
                check.name.clone(),
                check.severity.to_string(),
                check.description.clone(),
            ]
        })
        .collect();

    let widths = column_widths(&header, rows.iter());
    let mut out = String::new();
    push_row(&mut out, &header.map(String::from), &widths, None);
    push_separator(&mut out, &widths);
    for cells in &rows {
        push_row(&mut out, cells, &widths, None);
    }
    push_separator(&mut out, &widths);
    out.push_str(&format!("Total checks: {}", rows.len()));
    out
}

fn column_widths<'a, const N: usize>(
    header: &[&str; N],
    rows: impl Iterator<Item = &'a [String; N]>,
) -> [usize; N] {
    let mut widths = header.map(|h| h.chars().count());
    for cells in rows {
        for (width, cell) in widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn push_row<const N: usize>(
    out: &mut String,
    cells: &[String; N],
    widths: &[usize; N],
    highlight: Option<(usize, Severity)>,
) {
    let rendered: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(idx, (cell, width))| {
            let padded = format!("{:<width$}", cell, width = *width);
            match highlight {
                Some((column, severity)) if column == idx => {
                    colorize_severity(&padded, severity).to_string()
                }
                _ => padded,
            }
        })
        .collect();
    out.push_str(rendered.join(" | ").trim_end());
    out.push('\n');
}

fn push_separator<const N: usize>(out: &mut String, widths: &[usize; N]) {
    let parts: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&parts.join("-+-"));
    out.push('\n');
}
