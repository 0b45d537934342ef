//! Response captured from a single probe.

use std::collections::HashMap;

/// Status, headers and decoded body of one HTTP response.
///
/// Header names are stored lowercased, so lookups ignore case. Values keep
/// their original case and order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    headers: HashMap<String, Vec<String>>,
    pub body: String,
}

impl ProbeResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Add a header value; repeated names accumulate.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.push_header(name, value);
        self
    }

    pub fn push_header(&mut self, name: &str, value: &str) {
        self.headers
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(value.to_string());
    }

    /// All values of a header, or `None` when it was not sent.
    pub fn header_values(&self, name: &str) -> Option<&[String]> {
        self.headers
            .get(&name.trim().to_ascii_lowercase())
            .map(Vec::as_slice)
    }

    /// Build from a `reqwest` response, consuming its body.
    pub async fn from_reqwest(response: reqwest::Response) -> reqwest::Result<Self> {
        let status = response.status().as_u16();
        let mut probe = Self::new(status, String::new());
        for (name, value) in response.headers() {
            probe.push_header(name.as_str(), &String::from_utf8_lossy(value.as_bytes()));
        }
        probe.body = response.text().await?;
        Ok(probe)
    }
}
