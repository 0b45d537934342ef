//! Command-line configuration.

use crate::export::ExportFormat;
use crate::types::{Result, RunConfig, Severity};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Scan endpoints for exposed sensitive services, files and folders.
#[derive(Parser, Debug, Clone)]
#[command(name = "chopchop")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scan endpoints to check if services/files/folders are exposed
    Scan(ScanConfig),
    /// List the checks of a signature file
    Plugins(PluginsConfig),
}

/// Configuration for the plugins command.
#[derive(Parser, Debug, Clone)]
pub struct PluginsConfig {
    /// Path to the signature file
    #[arg(short = 'c', long, env = "CHOPCHOP_SIGNATURES", default_value = "chopchop.yml")]
    pub signatures: PathBuf,

    /// Only list checks of this severity
    #[arg(short, long)]
    pub severity: Option<Severity>,
}

/// Configuration for the scan command.
#[derive(Parser, Debug, Clone)]
pub struct ScanConfig {
    /// Target URL(s) or domain(s) to scan
    #[arg(required_unless_present = "url_file")]
    pub targets: Vec<String>,

    /// File containing targets to scan (one per line)
    #[arg(short = 'u', long)]
    pub url_file: Option<PathBuf>,

    /// Path to the signature file
    #[arg(short = 'c', long, env = "CHOPCHOP_SIGNATURES", default_value = "chopchop.yml")]
    pub signatures: PathBuf,

    /// Maximum number of requests in flight
    #[arg(long, default_value = "1")]
    pub threads: usize,

    /// Request timeout in seconds
    #[arg(short, long, default_value = "10")]
    pub timeout: u64,

    /// Skip TLS certificate verification
    #[arg(short = 'k', long)]
    pub insecure: bool,

    /// Only run checks whose name contains one of these (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub plugin_filters: Vec<String>,

    /// Only run checks of this severity
    #[arg(long)]
    pub severity_filter: Option<Severity>,

    /// Fail (exit 1) only when a hit reaches this severity
    #[arg(short = 'b', long)]
    pub max_severity: Option<Severity>,

    /// String prepended to every target
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// String appended to every target, before the endpoint
    #[arg(long, default_value = "")]
    pub suffix: String,

    /// Export formats (comma separated)
    #[arg(short, long, value_enum, value_delimiter = ',', default_value = "stdout")]
    pub export: Vec<ExportFormat>,

    /// Base file name for csv/json exports
    #[arg(long)]
    pub export_filename: Option<String>,

    /// Quiet mode: only print the final results
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Custom User-Agent string
    #[arg(long)]
    pub user_agent: Option<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            url_file: None,
            signatures: PathBuf::from("chopchop.yml"),
            threads: 1,
            timeout: 10,
            insecure: false,
            plugin_filters: Vec::new(),
            severity_filter: None,
            max_severity: None,
            prefix: String::new(),
            suffix: String::new(),
            export: vec![ExportFormat::Stdout],
            export_filename: None,
            quiet: false,
            user_agent: None,
        }
    }
}

impl ScanConfig {
    /// Build the immutable run configuration.
    pub fn run_config(&self) -> RunConfig {
        let defaults = RunConfig::default();
        RunConfig {
            concurrency: self.threads.max(1),
            timeout: Duration::from_secs(self.timeout),
            insecure: self.insecure,
            plugin_filters: self
                .plugin_filters
                .iter()
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect(),
            severity_filter: self.severity_filter,
            block_threshold: self.max_severity,
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
        }
    }

    /// Load targets from the arguments and the URL file.
    pub fn load_targets(&self) -> Result<Vec<String>> {
        let mut targets = self.targets.clone();

        if let Some(ref file_path) = self.url_file {
            let content = std::fs::read_to_string(file_path)?;
            for line in content.lines() {
                let trimmed = line.trim();
                if !trimmed.is_empty() && !trimmed.starts_with('#') {
                    targets.push(trimmed.to_string());
                }
            }
        }

        // Without a prefix, bare hosts get https://
        let normalized: Vec<String> = targets
            .into_iter()
            .map(|t| t.trim().trim_end_matches('/').to_string())
            .filter(|t| !t.is_empty())
            .map(|t| {
                if self.prefix.is_empty() && !t.starts_with("http://") && !t.starts_with("https://")
                {
                    format!("https://{}", t)
                } else {
                    t
                }
            })
            .collect();

        Ok(normalized)
    }
}
