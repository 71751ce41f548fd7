//! Application configuration data model

use crate::defaults;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the download throughput probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadProbeConfig {
    /// Endpoint serving a fixed-size byte stream; cache-busted per attempt
    pub url: String,
    /// Deadline for the whole transfer
    pub timeout: Duration,
}

/// Settings for the upload throughput probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadProbeConfig {
    /// Endpoint accepting a POST body
    pub url: String,
    /// Size of the in-memory payload submitted per attempt
    pub payload_bytes: u64,
    /// Deadline for the whole transfer
    pub timeout: Duration,
}

/// Settings for the latency probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyProbeConfig {
    /// Endpoint for the lightweight round-trip request
    pub url: String,
    /// Deadline for the round trip
    pub timeout: Duration,
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Pause between scheduled batches
    pub interval: Duration,

    /// Backstop deadline applied to every probe of a batch
    pub batch_deadline: Duration,

    /// Download probe settings
    pub download: DownloadProbeConfig,

    /// Upload probe settings
    pub upload: UploadProbeConfig,

    /// Latency probe settings
    pub latency: LatencyProbeConfig,

    /// Run a single batch and exit
    pub once: bool,

    /// Emit metrics as JSON lines instead of formatted text
    pub json_output: bool,

    /// Enable colored console output
    pub enable_color: bool,

    /// Enable verbose output
    pub verbose: bool,

    /// Enable debug output
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval: defaults::DEFAULT_INTERVAL,
            batch_deadline: defaults::DEFAULT_BATCH_DEADLINE,
            download: DownloadProbeConfig {
                url: defaults::DEFAULT_DOWNLOAD_URL.to_string(),
                timeout: defaults::DEFAULT_DOWNLOAD_TIMEOUT,
            },
            upload: UploadProbeConfig {
                url: defaults::DEFAULT_UPLOAD_URL.to_string(),
                payload_bytes: defaults::DEFAULT_UPLOAD_SIZE_BYTES,
                timeout: defaults::DEFAULT_UPLOAD_TIMEOUT,
            },
            latency: LatencyProbeConfig {
                url: defaults::DEFAULT_LATENCY_URL.to_string(),
                timeout: defaults::DEFAULT_LATENCY_TIMEOUT,
            },
            once: false,
            json_output: false,
            enable_color: defaults::DEFAULT_ENABLE_COLOR,
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Longest individual probe timeout in this configuration
    pub fn longest_probe_timeout(&self) -> Duration {
        self.download
            .timeout
            .max(self.upload.timeout)
            .max(self.latency.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.interval, Duration::from_secs(5));
        assert_eq!(config.upload.payload_bytes, 2 * 1024 * 1024);
        assert!(!config.once);
        assert!(config.enable_color);
    }

    #[test]
    fn test_longest_probe_timeout() {
        let mut config = Config::default();
        assert_eq!(config.longest_probe_timeout(), Duration::from_millis(9_500));

        config.latency.timeout = Duration::from_secs(30);
        assert_eq!(config.longest_probe_timeout(), Duration::from_secs(30));
    }
}
