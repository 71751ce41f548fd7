//! Probe runners: bounded, cancellable network measurements
//!
//! Each runner settles with a `ProbeResult` on every path — network
//! errors, timeouts, and cancellation are converted locally and never
//! surface as errors to the coordinator.

mod download;
mod latency;
mod upload;

use crate::error::{AppError, Result};
use crate::models::{Config, DownloadProbeConfig, LatencyProbeConfig, ProbeResult, UploadProbeConfig};
use crate::types::ProbeKind;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// A single bounded network measurement, cancellable by the caller
#[async_trait]
pub trait ProbeRunner: Send + Sync {
    /// Execute one probe of the given kind.
    ///
    /// Cancelling the token asks the probe to stop consuming the network
    /// promptly; the probe then settles with a failed result rather than
    /// being forcibly terminated.
    async fn run(&self, kind: ProbeKind, cancel: CancellationToken) -> ProbeResult;
}

/// Probe runner that measures against real HTTP endpoints
pub struct HttpProbeRunner {
    client: Client,
    download: DownloadProbeConfig,
    upload: UploadProbeConfig,
    latency: LatencyProbeConfig,
}

impl HttpProbeRunner {
    /// Create a runner with a shared HTTP client for all probe kinds
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("{}/{}", crate::PKG_NAME, crate::VERSION))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            download: config.download.clone(),
            upload: config.upload.clone(),
            latency: config.latency.clone(),
        })
    }
}

#[async_trait]
impl ProbeRunner for HttpProbeRunner {
    async fn run(&self, kind: ProbeKind, cancel: CancellationToken) -> ProbeResult {
        match kind {
            ProbeKind::Download => download::run(&self.client, &self.download, &cancel).await,
            ProbeKind::Upload => upload::run(&self.client, &self.upload, &cancel).await,
            ProbeKind::Latency => latency::run(&self.client, &self.latency, &cancel).await,
        }
    }
}

/// Append a one-time token so no intermediary can serve a cached body
pub(crate) fn cache_busted(url: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}nocache={}", url, separator, uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_busted_plain_url() {
        let url = cache_busted("https://example.com/blob");
        assert!(url.starts_with("https://example.com/blob?nocache="));
    }

    #[test]
    fn test_cache_busted_url_with_query() {
        let url = cache_busted("https://example.com/__down?bytes=1000");
        assert!(url.starts_with("https://example.com/__down?bytes=1000&nocache="));
    }

    #[test]
    fn test_cache_busted_is_unique_per_attempt() {
        let base = "https://example.com/blob";
        assert_ne!(cache_busted(base), cache_busted(base));
    }
}
