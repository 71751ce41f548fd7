//! Data models for the network-quality monitor

pub mod config;
pub mod metrics;

// Re-export main model types
pub use config::{Config, DownloadProbeConfig, LatencyProbeConfig, UploadProbeConfig};
pub use metrics::{throughput_mbps, ProbeResult, SanitizedMetrics};
