//! Command-line interface

use crate::defaults;
use clap::Parser;

/// Network quality monitor - periodically measures download, upload, and latency
#[derive(Parser, Debug, Clone)]
#[command(name = "lw")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Seconds between scheduled measurement batches
    #[arg(short, long, env = "LINKWATCH_INTERVAL", default_value_t = defaults::DEFAULT_INTERVAL.as_secs())]
    pub interval: u64,

    /// Backstop deadline in seconds applied to every probe of a batch
    #[arg(long, env = "LINKWATCH_BATCH_DEADLINE", default_value_t = defaults::DEFAULT_BATCH_DEADLINE.as_secs())]
    pub batch_deadline: u64,

    /// Download probe endpoint (a large, publicly fetchable resource)
    #[arg(long, env = "LINKWATCH_DOWNLOAD_URL", default_value = defaults::DEFAULT_DOWNLOAD_URL)]
    pub download_url: String,

    /// Download probe timeout in milliseconds
    #[arg(long, env = "LINKWATCH_DOWNLOAD_TIMEOUT_MS", default_value_t = defaults::DEFAULT_DOWNLOAD_TIMEOUT.as_millis() as u64)]
    pub download_timeout_ms: u64,

    /// Upload probe endpoint (accepts a POST body)
    #[arg(long, env = "LINKWATCH_UPLOAD_URL", default_value = defaults::DEFAULT_UPLOAD_URL)]
    pub upload_url: String,

    /// Upload payload size in bytes
    #[arg(long, env = "LINKWATCH_UPLOAD_SIZE", default_value_t = defaults::DEFAULT_UPLOAD_SIZE_BYTES)]
    pub upload_size: u64,

    /// Upload probe timeout in milliseconds
    #[arg(long, env = "LINKWATCH_UPLOAD_TIMEOUT_MS", default_value_t = defaults::DEFAULT_UPLOAD_TIMEOUT.as_millis() as u64)]
    pub upload_timeout_ms: u64,

    /// Latency probe endpoint (lightweight round-trip target)
    #[arg(long, env = "LINKWATCH_LATENCY_URL", default_value = defaults::DEFAULT_LATENCY_URL)]
    pub latency_url: String,

    /// Latency probe timeout in milliseconds
    #[arg(long, env = "LINKWATCH_LATENCY_TIMEOUT_MS", default_value_t = defaults::DEFAULT_LATENCY_TIMEOUT.as_millis() as u64)]
    pub latency_timeout_ms: u64,

    /// Run a single measurement batch and exit
    #[arg(long)]
    pub once: bool,

    /// Emit metrics as JSON lines instead of formatted text
    #[arg(long)]
    pub json: bool,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting color flags
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if self.interval == 0 {
            return Err("--interval must be at least 1 second".to_string());
        }

        if self.batch_deadline == 0 {
            return Err("--batch-deadline must be at least 1 second".to_string());
        }

        if self.upload_size == 0 {
            return Err("--upload-size must be at least 1 byte".to_string());
        }

        Ok(())
    }
}
