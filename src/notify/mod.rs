//! Console notifications for scan progress and hits.

pub mod console;

pub use console::{colorize_severity, ConsoleOutput};
