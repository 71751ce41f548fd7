//! Plausibility filtering of raw probe measurements
//!
//! Client-side probes occasionally report wildly implausible values
//! (cache hits, coalesced timers, proxy short-circuits). Anything above
//! the fixed ceilings is treated as measurement noise and replaced with
//! "unavailable" rather than clamped.

use crate::error::ProbeFailure;
use crate::models::{ProbeResult, SanitizedMetrics};
use crate::types::{ProbeKind, ProbeStatus};
use log::debug;

/// Throughput above this is noise for this class of client-side probe
pub const MAX_PLAUSIBLE_THROUGHPUT_MBPS: f64 = 1000.0;

/// Round-trip latency above this is noise
pub const MAX_PLAUSIBLE_LATENCY_MS: f64 = 10_000.0;

/// Reduce a batch of raw probe results to display-ready metrics.
///
/// Pure and idempotent: the same results always sanitize to the same
/// metrics. Failed and timed-out probes map to `None`, never to zero.
/// If a kind somehow appears more than once, the last occurrence wins.
pub fn sanitize(results: &[ProbeResult]) -> SanitizedMetrics {
    let mut metrics = SanitizedMetrics::unavailable();

    for result in results {
        match result.kind {
            ProbeKind::Download => {
                metrics.download_mbps = plausible_throughput(result);
            }
            ProbeKind::Upload => {
                metrics.upload_mbps = plausible_throughput(result);
            }
            ProbeKind::Latency => {
                metrics.latency_ms = plausible_latency(result);
            }
        }
    }

    metrics
}

fn plausible_throughput(result: &ProbeResult) -> Option<f64> {
    measured_value(result, MAX_PLAUSIBLE_THROUGHPUT_MBPS)
}

fn plausible_latency(result: &ProbeResult) -> Option<u64> {
    measured_value(result, MAX_PLAUSIBLE_LATENCY_MS).map(|ms| ms.round() as u64)
}

/// Extract the raw value if the probe succeeded and the value is sane
fn measured_value(result: &ProbeResult, ceiling: f64) -> Option<f64> {
    if result.status != ProbeStatus::Ok {
        debug!("{} unavailable ({})", result.kind, result.describe());
        return None;
    }
    if !result.value.is_finite() || result.value < 0.0 || result.value > ceiling {
        let rejected = ProbeFailure::Implausible(result.value);
        debug!("{} unavailable ({})", result.kind, rejected);
        return None;
    }
    Some(result.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::time::Duration;

    fn ok(kind: ProbeKind, value: f64) -> ProbeResult {
        ProbeResult::ok(kind, value)
    }

    #[test]
    fn test_plausible_values_pass_through() {
        let results = vec![
            ok(ProbeKind::Download, 95.37),
            ok(ProbeKind::Upload, 12.5),
            ok(ProbeKind::Latency, 42.4),
        ];
        let metrics = sanitize(&results);
        assert_eq!(metrics.download_mbps, Some(95.37));
        assert_eq!(metrics.upload_mbps, Some(12.5));
        assert_eq!(metrics.latency_ms, Some(42));
    }

    #[test]
    fn test_implausible_throughput_is_dropped_not_clamped() {
        let metrics = sanitize(&[ok(ProbeKind::Download, 1812.0)]);
        assert_eq!(metrics.download_mbps, None);
    }

    #[test]
    fn test_implausible_latency_is_dropped() {
        let metrics = sanitize(&[ok(ProbeKind::Latency, 25_000.0)]);
        assert_eq!(metrics.latency_ms, None);
    }

    #[test]
    fn test_failed_and_timed_out_map_to_unavailable() {
        let results = vec![
            ProbeResult::failed(ProbeKind::Download, ProbeFailure::network("refused")),
            ProbeResult::timed_out(ProbeKind::Latency, Duration::from_secs(2)),
        ];
        let metrics = sanitize(&results);
        assert_eq!(metrics.download_mbps, None);
        assert_eq!(metrics.latency_ms, None);
    }

    #[test]
    fn test_measured_zero_is_preserved() {
        // Zero is a measurement, not an absence
        let metrics = sanitize(&[ok(ProbeKind::Latency, 0.0)]);
        assert_eq!(metrics.latency_ms, Some(0));
    }

    #[test]
    fn test_non_finite_values_are_dropped() {
        assert_eq!(sanitize(&[ok(ProbeKind::Download, f64::NAN)]).download_mbps, None);
        assert_eq!(
            sanitize(&[ok(ProbeKind::Upload, f64::INFINITY)]).upload_mbps,
            None
        );
        assert_eq!(sanitize(&[ok(ProbeKind::Download, -3.0)]).download_mbps, None);
    }

    #[test]
    fn test_idempotence() {
        let results = vec![
            ok(ProbeKind::Download, 500.0),
            ok(ProbeKind::Upload, 2000.0),
            ProbeResult::timed_out(ProbeKind::Latency, Duration::from_secs(2)),
        ];
        let first = sanitize(&results);
        let second = sanitize(&results);
        assert_eq!(first, second);
    }

    #[test]
    fn test_last_occurrence_wins() {
        let results = vec![ok(ProbeKind::Latency, 40.0), ok(ProbeKind::Latency, 60.0)];
        assert_eq!(sanitize(&results).latency_ms, Some(60));
    }

    proptest! {
        #[test]
        fn sanitized_values_never_exceed_ceilings(
            download in any::<f64>(),
            upload in any::<f64>(),
            latency in any::<f64>(),
        ) {
            let metrics = sanitize(&[
                ok(ProbeKind::Download, download),
                ok(ProbeKind::Upload, upload),
                ok(ProbeKind::Latency, latency),
            ]);

            if let Some(mbps) = metrics.download_mbps {
                prop_assert!(mbps >= 0.0 && mbps <= MAX_PLAUSIBLE_THROUGHPUT_MBPS);
            }
            if let Some(mbps) = metrics.upload_mbps {
                prop_assert!(mbps >= 0.0 && mbps <= MAX_PLAUSIBLE_THROUGHPUT_MBPS);
            }
            if let Some(ms) = metrics.latency_ms {
                prop_assert!(ms <= MAX_PLAUSIBLE_LATENCY_MS as u64);
            }
        }
    }
}
