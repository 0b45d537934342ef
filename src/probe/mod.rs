//! HTTP probing of target URLs.

pub mod client;
pub mod response;

pub use client::Prober;
pub use response::ProbeResponse;
