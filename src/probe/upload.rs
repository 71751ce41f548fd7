//! Upload throughput probe
//!
//! Submits an in-memory payload of configured size and times the
//! transfer. The payload is owned by the request future, so it is freed
//! on every exit path, including cancellation.

use crate::error::ProbeFailure;
use crate::models::{throughput_mbps, ProbeResult, UploadProbeConfig};
use crate::types::ProbeKind;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Instant;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

pub(super) async fn run(
    client: &Client,
    config: &UploadProbeConfig,
    cancel: &CancellationToken,
) -> ProbeResult {
    let kind = ProbeKind::Upload;
    let payload = build_payload(config.payload_bytes as usize);
    let payload_bytes = payload.len() as u64;
    debug!("upload probe: POST {} ({} bytes)", config.url, payload_bytes);

    let started = Instant::now();
    let request = client
        .post(&config.url)
        .header(CONTENT_TYPE, "application/octet-stream")
        .body(payload)
        .send();

    let response = tokio::select! {
        _ = cancel.cancelled() => {
            return ProbeResult::failed(kind, ProbeFailure::Superseded);
        }
        sent = timeout(config.timeout, request) => match sent {
            Err(_) => return ProbeResult::timed_out(kind, config.timeout),
            Ok(Err(e)) => return ProbeResult::failed(kind, ProbeFailure::network(e)),
            Ok(Ok(response)) => response,
        },
    };

    if !response.status().is_success() {
        return ProbeResult::failed(
            kind,
            ProbeFailure::network(format!("unexpected status {}", response.status())),
        );
    }

    let elapsed = started.elapsed();
    match throughput_mbps(payload_bytes, elapsed) {
        Some(mbps) => {
            debug!(
                "upload probe: {} bytes in {:.2}s, {:.2} Mbps",
                payload_bytes,
                elapsed.as_secs_f64(),
                mbps
            );
            ProbeResult::ok(kind, mbps)
        }
        None => ProbeResult::failed(
            kind,
            ProbeFailure::network("transfer completed too fast to measure"),
        ),
    }
}

/// Deterministic in-memory payload, allocated fresh per attempt
fn build_payload(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}
