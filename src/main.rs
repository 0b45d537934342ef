//! chopchop - signature-driven exposure scanner.
//!
//! CLI entry point.

use chopchop::export::{export_results, table};
use chopchop::notify::ConsoleOutput;
use chopchop::{
    load_signatures, CancelToken, Commands, Config, ExitDecision, PluginsConfig, ScanConfig,
    Scanner,
};
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Set up logging
    let filter = if config.verbose {
        EnvFilter::new("chopchop=debug,warn")
    } else {
        EnvFilter::new("chopchop=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match config.command.clone() {
        Commands::Scan(scan_config) => run_scan(scan_config, &config).await,
        Commands::Plugins(plugins_config) => run_plugins(plugins_config),
    }
}

async fn run_scan(scan_config: ScanConfig, global_config: &Config) -> ExitCode {
    // Signatures are validated before any network activity
    let signatures = match load_signatures(&scan_config.signatures) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load signatures: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let targets = match scan_config.load_targets() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to load targets: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if targets.is_empty() {
        error!("No targets specified. Use positional arguments or -u <file>.");
        return ExitCode::FAILURE;
    }

    let mut run = scan_config.run_config();
    if signatures.insecure && !run.insecure {
        info!("Signature file disables TLS certificate verification");
        run.insecure = true;
    }
    let block_threshold = run.block_threshold;

    let console = ConsoleOutput::new(global_config.verbose, scan_config.quiet);
    let scanner = match Scanner::new(run) {
        Ok(s) => s.with_console(console),
        Err(e) => {
            error!("Failed to create scanner: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if !scan_config.quiet {
        print_banner();
    }

    let cancel = CancelToken::new();
    tokio::spawn(cancel_on_signal(cancel.clone()));

    let report = scanner.scan(&targets, &signatures, &cancel).await;

    if let Err(e) = export_results(
        &report,
        &scan_config.export,
        scan_config.export_filename.as_deref(),
    ) {
        error!("Failed to export results: {}", e);
        return ExitCode::FAILURE;
    }

    ExitDecision::from_report(block_threshold, &report).into()
}

fn run_plugins(plugins_config: PluginsConfig) -> ExitCode {
    let signatures = match load_signatures(&plugins_config.signatures) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load signatures: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", table::render_checks(&signatures, plugins_config.severity));
    ExitCode::SUCCESS
}

/// Cancel the scan on SIGINT/SIGTERM.
async fn cancel_on_signal(cancel: CancelToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let (mut sigterm, mut sigint) = match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(term), Ok(int)) => (term, int),
            _ => {
                warn!("Failed to register signal handlers, scan cannot be interrupted cleanly");
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
    }

    warn!("Interrupt received, stopping scan...");
    cancel.cancel();
}

fn print_banner() {
    println!();
    println!("\x1b[36m╔══════════════════════════════════════════════════════════════╗\x1b[0m");
    println!("\x1b[36m║                    CHOPCHOP v0.1.0                           ║\x1b[0m");
    println!("\x1b[36m║       Exposed Services, Files and Folders Scanner            ║\x1b[0m");
    println!("\x1b[36m╚══════════════════════════════════════════════════════════════╝\x1b[0m");
    println!();
}
