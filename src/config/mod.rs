//! Configuration loading and validation

use crate::cli::Cli;
use crate::defaults;
use crate::error::{AppError, Result};
use crate::models::{Config, DownloadProbeConfig, LatencyProbeConfig, UploadProbeConfig};
use colored::Colorize;
use std::time::Duration;
use url::Url;

/// Upload payloads beyond this are flagged as suspicious
const UPLOAD_SIZE_WARNING_BYTES: u64 = 8 * 1024 * 1024;

/// Translate parsed CLI arguments (with their env fallbacks already
/// applied by clap) into the application configuration
pub fn load_config(cli: Cli) -> Result<Config> {
    cli.validate().map_err(AppError::validation)?;

    let enable_color = if cli.no_color {
        false
    } else if cli.color {
        true
    } else {
        defaults::DEFAULT_ENABLE_COLOR
    };

    Ok(Config {
        interval: Duration::from_secs(cli.interval),
        batch_deadline: Duration::from_secs(cli.batch_deadline),
        download: DownloadProbeConfig {
            url: cli.download_url,
            timeout: Duration::from_millis(cli.download_timeout_ms),
        },
        upload: UploadProbeConfig {
            url: cli.upload_url,
            payload_bytes: cli.upload_size,
            timeout: Duration::from_millis(cli.upload_timeout_ms),
        },
        latency: LatencyProbeConfig {
            url: cli.latency_url,
            timeout: Duration::from_millis(cli.latency_timeout_ms),
        },
        once: cli.once,
        json_output: cli.json,
        enable_color,
        verbose: cli.verbose,
        debug: cli.debug,
    })
}

/// A configuration that works but deserves a heads-up
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    pub message: String,
}

impl ValidationWarning {
    fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Format warning for console display
    pub fn format(&self, use_color: bool) -> String {
        if use_color {
            format!("{} {}", "warning:".yellow().bold(), self.message)
        } else {
            format!("warning: {}", self.message)
        }
    }
}

/// Validate a loaded configuration.
///
/// Hard errors (unusable endpoints) fail; questionable-but-usable
/// settings come back as warnings.
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    let mut warnings = Vec::new();

    let endpoints = [
        ("download", config.download.url.as_str()),
        ("upload", config.upload.url.as_str()),
        ("latency", config.latency.url.as_str()),
    ];
    for (name, raw) in endpoints {
        let url = Url::parse(raw)
            .map_err(|e| AppError::validation(format!("{} URL '{}': {}", name, raw, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::validation(format!(
                "{} URL must use http or https: {}",
                name, raw
            )));
        }
    }

    if config.batch_deadline < config.longest_probe_timeout() {
        warnings.push(ValidationWarning::new(format!(
            "batch deadline ({:?}) is shorter than the longest probe timeout ({:?}); slow probes will be cut short",
            config.batch_deadline,
            config.longest_probe_timeout()
        )));
    }

    if config.interval < config.latency.timeout {
        warnings.push(ValidationWarning::new(format!(
            "interval ({:?}) is shorter than the latency probe timeout ({:?}); batches may routinely supersede each other",
            config.interval, config.latency.timeout
        )));
    }

    if config.upload.payload_bytes > UPLOAD_SIZE_WARNING_BYTES {
        warnings.push(ValidationWarning::new(format!(
            "upload payload of {} bytes is large for a periodic probe",
            config.upload.payload_bytes
        )));
    }

    Ok(warnings)
}

/// Multi-line human-readable configuration summary
pub fn display_config_summary(config: &Config) -> String {
    format!(
        "  Interval: {:?}\n  Batch deadline: {:?}\n  Download: {} (timeout {:?})\n  Upload: {} ({} bytes, timeout {:?})\n  Latency: {} (timeout {:?})\n  Output: {}",
        config.interval,
        config.batch_deadline,
        config.download.url,
        config.download.timeout,
        config.upload.url,
        config.upload.payload_bytes,
        config.upload.timeout,
        config.latency.url,
        config.latency.timeout,
        if config.json_output { "json" } else { "console" },
    )
}
