//! HTTP feed download

use anyhow::{Context, Result};
use dnsset_core::error::Error;
use dnsset_core::FeedFetcher;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::debug;

/// Single-attempt HTTP(S) fetcher
pub struct HttpFetcher {
    client: reqwest::Client,
    runtime: Runtime,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher whose requests are bounded by `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("dnsset/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            runtime,
            timeout,
        })
    }

    async fn download(&self, url: &str) -> dnsset_core::Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::fetch(url, e))?;

        let status = response.status();
        debug!(url, %status, "Feed response");
        if !status.is_success() {
            return Err(Error::fetch(url, format!("HTTP {status}")));
        }

        let body = response.bytes().await.map_err(|e| Error::fetch(url, e))?;
        Ok(body.to_vec())
    }
}

impl FeedFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> dnsset_core::Result<Vec<u8>> {
        self.runtime.block_on(async {
            tokio::time::timeout(self.timeout, self.download(url))
                .await
                .map_err(|_| Error::fetch(url, format!("timed out after {:?}", self.timeout)))?
        })
    }
}
