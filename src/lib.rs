//! Linkwatch
//!
//! A lightweight network-quality monitor that periodically measures
//! download throughput, upload throughput, and round-trip latency using
//! bounded, cancellable HTTP probes, then hands sanitized readings to a
//! display sink.

pub mod app;
pub mod cli;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod models;
pub mod output;
pub mod probe;
pub mod sanitize;
pub mod scheduler;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, ProbeFailure, Result};
pub use models::{Config, ProbeResult, SanitizedMetrics};
pub use output::{ConsoleSink, DisplaySink, JsonSink};
pub use probe::{HttpProbeRunner, ProbeRunner};
pub use sanitize::sanitize;
pub use scheduler::{BatchCoordinator, BatchOutcome, BatchState, Scheduler};
pub use types::{ProbeKind, ProbeStatus};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
    pub const DEFAULT_BATCH_DEADLINE: Duration = Duration::from_secs(12);

    pub const DEFAULT_DOWNLOAD_URL: &str = "https://speed.cloudflare.com/__down?bytes=25000000";
    pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_millis(9_500);

    pub const DEFAULT_UPLOAD_URL: &str = "https://speed.cloudflare.com/__up";
    pub const DEFAULT_UPLOAD_SIZE_BYTES: u64 = 2 * 1024 * 1024;
    pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_millis(9_500);

    pub const DEFAULT_LATENCY_URL: &str = "https://www.google.com/generate_204";
    pub const DEFAULT_LATENCY_TIMEOUT: Duration = Duration::from_millis(2_000);

    pub const DEFAULT_ENABLE_COLOR: bool = true;
}
