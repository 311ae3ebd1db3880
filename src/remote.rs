// Remote snapshot source

use crate::models::now_ms;
use eyre::{Context, Result, eyre};
use std::time::Duration;

/// Read-only upstream the board bootstraps from.
///
/// Fetch failures are expected and recoverable; the persistence layer falls
/// back to the local cache.
pub trait RemoteSnapshot {
    /// Fetch the raw snapshot body.
    fn fetch(&self) -> Result<String>;
}

/// Snapshot endpoint over HTTP.
pub struct HttpRemote {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpRemote {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RemoteSnapshot for HttpRemote {
    fn fetch(&self) -> Result<String> {
        // Query parameter defeats intermediary caching of the snapshot.
        let url = format!("{}?t={}", self.url, now_ms());

        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("failed to fetch {url}"))?;

        if !response.status().is_success() {
            return Err(eyre!(
                "snapshot endpoint returned {} for {url}",
                response.status()
            ));
        }

        response.text().context("failed to read snapshot body")
    }
}
