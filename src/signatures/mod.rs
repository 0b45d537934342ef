//! Signature rule set: plugins, their checks, and how checks are evaluated.
//!
//! This module handles:
//! - The validated in-memory model (`Signatures`, `Plugin`, `Check`)
//! - Loading and validating YAML signature documents
//! - Filtering by severity and check name
//! - Matching a check against a probe response

pub mod filters;
pub mod loader;
pub mod matcher;
pub mod model;

pub use loader::{load_signatures, parse_signatures, RawCheck, RawPlugin, RawSignatures};
pub use matcher::HeaderRule;
pub use model::{Check, Plugin, Signatures};
