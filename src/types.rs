//! Type definitions and aliases

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// The metric a single probe estimates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProbeKind {
    /// Download throughput in Mbps
    Download,
    /// Upload throughput in Mbps
    Upload,
    /// Round-trip latency in milliseconds
    Latency,
}

impl ProbeKind {
    /// All probe kinds in the order a batch runs them
    pub const ALL: [ProbeKind; 3] = [ProbeKind::Download, ProbeKind::Upload, ProbeKind::Latency];

    /// Get probe kind name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeKind::Download => "download",
            ProbeKind::Upload => "upload",
            ProbeKind::Latency => "latency",
        }
    }
}

impl std::fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probe execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeStatus {
    /// Probe completed and produced a measurement
    Ok,
    /// Probe exceeded its deadline
    TimedOut,
    /// Probe failed (network error, non-2xx, or cancellation)
    Failed,
}

/// Performance classification based on round-trip latency
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PerformanceLevel {
    /// Good connection (< 100 ms)
    Good,
    /// Moderate connection (100-400 ms)
    Moderate,
    /// Poor connection (> 400 ms)
    Poor,
}

impl PerformanceLevel {
    /// Classify a connection by its measured round-trip latency
    pub fn from_latency_ms(latency_ms: u64) -> Self {
        if latency_ms < 100 {
            Self::Good
        } else if latency_ms < 400 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }
}
