//! chopchop - signature-driven scanner for exposed services, files and folders.
//!
//! This library provides:
//! - A YAML signature model of plugins (endpoints) and checks (match rules)
//! - A pure matcher evaluating one check against one HTTP response
//! - A bounded-concurrency, cancellable scan orchestrator
//! - Severity threshold logic deciding whether a CI pipeline should fail
//!
//! # Example
//!
//! ```no_run
//! use chopchop::{parse_signatures, CancelToken, RunConfig, Scanner};
//!
//! #[tokio::main]
//! async fn main() {
//!     let signatures = parse_signatures(
//!         r#"
//! plugins:
//!   - endpoint: "/.git/config"
//!     checks:
//!       - name: Git exposed
//!         all_match: ["[core]"]
//!         description: Git repository exposed
//!         remediation: Do not deploy .git folders
//!         severity: High
//! "#,
//!     )
//!     .unwrap();
//!
//!     let scanner = Scanner::new(RunConfig::default()).unwrap();
//!     let domains = vec!["https://example.com".to_string()];
//!     let report = scanner.scan(&domains, &signatures, &CancelToken::new()).await;
//!     println!("Found {} hits", report.hits.len());
//! }
//! ```

pub mod cancel;
pub mod config;
pub mod export;
pub mod notify;
pub mod policy;
pub mod probe;
pub mod results;
pub mod scanner;
pub mod signatures;
pub mod types;

pub use cancel::CancelToken;
pub use config::{Commands, Config, PluginsConfig, ScanConfig};
pub use policy::{should_block, ExitDecision};
pub use results::{HitCollector, ScanReport};
pub use scanner::Scanner;
pub use signatures::{load_signatures, parse_signatures, Check, Plugin, Signatures};
pub use types::{ChopError, Hit, Result, RunConfig, Severity};
