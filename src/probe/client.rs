//! HTTP prober issuing one GET per target URL.

use super::response::ProbeResponse;
use crate::types::{Result, RunConfig};
use reqwest::redirect::Policy;
use reqwest::Client;
use std::time::Duration;
use tracing::trace;

const MAX_REDIRECTS: usize = 10;

/// HTTP client pair for probing: one following redirects, one not.
///
/// The redirect policy is fixed per `reqwest::Client`, so both are built
/// once and share the same timeout and TLS settings.
#[derive(Clone)]
pub struct Prober {
    follow: Client,
    no_follow: Client,
}

impl Prober {
    /// Create a prober from the run configuration.
    pub fn new(run: &RunConfig) -> Result<Self> {
        Ok(Self {
            follow: Self::build_client(run, Policy::limited(MAX_REDIRECTS))?,
            no_follow: Self::build_client(run, Policy::none())?,
        })
    }

    fn build_client(run: &RunConfig, redirect: Policy) -> Result<Client> {
        let client = Client::builder()
            .timeout(run.timeout)
            .connect_timeout(run.timeout)
            .user_agent(&run.user_agent)
            .redirect(redirect)
            .danger_accept_invalid_certs(run.insecure)
            .http1_only()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;
        Ok(client)
    }

    /// GET `url` and read the full response.
    ///
    /// Timeouts and connection failures come back as `Err`; any HTTP status
    /// is a successful probe.
    pub async fn probe(&self, url: &str, follow_redirects: bool) -> Result<ProbeResponse> {
        let client = if follow_redirects {
            &self.follow
        } else {
            &self.no_follow
        };

        trace!("GET {} (follow redirects: {})", url, follow_redirects);
        let response = client.get(url).send().await?;
        let probe = ProbeResponse::from_reqwest(response).await?;
        trace!("{} -> {} ({} bytes)", url, probe.status, probe.body.len());
        Ok(probe)
    }
}
