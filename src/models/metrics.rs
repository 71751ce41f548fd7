//! Probe measurement and sanitized metric data models

use crate::error::ProbeFailure;
use crate::types::{ProbeKind, ProbeStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One mebibyte, the unit the throughput conversion is based on
pub const MIB: f64 = 1024.0 * 1024.0;

/// Convert a byte count over an elapsed wall-clock time into Mbps.
///
/// Returns `None` when the elapsed time is too small to divide by, which
/// callers treat as "completed too fast to measure".
pub fn throughput_mbps(bytes: u64, elapsed: Duration) -> Option<f64> {
    let seconds = elapsed.as_secs_f64();
    if seconds <= f64::EPSILON {
        return None;
    }
    Some((bytes as f64 * 8.0) / MIB / seconds)
}

/// The raw outcome of a single probe, immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Which metric this probe estimated
    pub kind: ProbeKind,

    /// Raw measurement: Mbps for throughput probes, milliseconds for latency.
    /// Only meaningful when `status` is `Ok`.
    pub value: f64,

    /// Probe execution status
    pub status: ProbeStatus,

    /// Timestamp when the probe settled
    pub completed_at: DateTime<Utc>,

    /// Failure detail when the probe did not produce a measurement
    pub failure: Option<ProbeFailure>,
}

impl ProbeResult {
    /// Create a successful probe result
    pub fn ok(kind: ProbeKind, value: f64) -> Self {
        Self {
            kind,
            value,
            status: ProbeStatus::Ok,
            completed_at: Utc::now(),
            failure: None,
        }
    }

    /// Create a failed probe result
    pub fn failed(kind: ProbeKind, failure: ProbeFailure) -> Self {
        Self {
            kind,
            value: 0.0,
            status: ProbeStatus::Failed,
            completed_at: Utc::now(),
            failure: Some(failure),
        }
    }

    /// Create a timed-out probe result
    pub fn timed_out(kind: ProbeKind, after: Duration) -> Self {
        Self {
            kind,
            value: 0.0,
            status: ProbeStatus::TimedOut,
            completed_at: Utc::now(),
            failure: Some(ProbeFailure::Timeout(after)),
        }
    }

    /// Check whether this probe produced a usable measurement
    pub fn is_ok(&self) -> bool {
        matches!(self.status, ProbeStatus::Ok)
    }

    /// Short description of the outcome for logging
    pub fn describe(&self) -> String {
        match self.status {
            ProbeStatus::Ok => format!("{}: {:.2}", self.kind, self.value),
            _ => {
                let reason = self
                    .failure
                    .as_ref()
                    .map(|f| f.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                format!("{}: {}", self.kind, reason)
            }
        }
    }
}

/// Plausibility-filtered metrics ready for display.
///
/// `None` means the metric is unavailable this cycle, which is distinct
/// from a measured value of zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SanitizedMetrics {
    /// Download throughput in Mbps, if measured and plausible
    pub download_mbps: Option<f64>,

    /// Upload throughput in Mbps, if measured and plausible
    pub upload_mbps: Option<f64>,

    /// Round-trip latency in whole milliseconds, if measured and plausible
    pub latency_ms: Option<u64>,
}

impl SanitizedMetrics {
    /// Metrics with every value unavailable
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Check whether no metric is available
    pub fn is_empty(&self) -> bool {
        self.download_mbps.is_none() && self.upload_mbps.is_none() && self.latency_ms.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throughput_conversion() {
        // 25,000,000 bytes over 2.0 seconds
        let mbps = throughput_mbps(25_000_000, Duration::from_secs(2)).unwrap();
        assert!((mbps - 95.367).abs() < 0.001);
        assert_eq!(format!("{:.2}", mbps), "95.37");
    }

    #[test]
    fn test_throughput_zero_elapsed() {
        assert!(throughput_mbps(1_000_000, Duration::ZERO).is_none());
    }

    #[test]
    fn test_probe_result_ok() {
        let result = ProbeResult::ok(ProbeKind::Download, 42.5);
        assert!(result.is_ok());
        assert_eq!(result.status, ProbeStatus::Ok);
        assert_eq!(result.value, 42.5);
        assert!(result.failure.is_none());
    }

    #[test]
    fn test_probe_result_failed() {
        let result = ProbeResult::failed(
            ProbeKind::Upload,
            ProbeFailure::network("connection refused"),
        );
        assert!(!result.is_ok());
        assert_eq!(result.status, ProbeStatus::Failed);
        assert!(result.describe().contains("connection refused"));
    }

    #[test]
    fn test_probe_result_timed_out() {
        let result = ProbeResult::timed_out(ProbeKind::Latency, Duration::from_secs(2));
        assert_eq!(result.status, ProbeStatus::TimedOut);
        assert_eq!(result.failure, Some(ProbeFailure::Timeout(Duration::from_secs(2))));
    }

    #[test]
    fn test_sanitized_metrics_empty() {
        assert!(SanitizedMetrics::unavailable().is_empty());

        let metrics = SanitizedMetrics {
            latency_ms: Some(40),
            ..Default::default()
        };
        assert!(!metrics.is_empty());
    }
}
