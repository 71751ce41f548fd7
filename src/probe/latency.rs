//! Round-trip latency probe

use crate::error::ProbeFailure;
use crate::models::{LatencyProbeConfig, ProbeResult};
use crate::types::ProbeKind;
use log::{debug, trace};
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use std::time::Instant;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

pub(super) async fn run(
    client: &Client,
    config: &LatencyProbeConfig,
    cancel: &CancellationToken,
) -> ProbeResult {
    let kind = ProbeKind::Latency;
    debug!("latency probe: HEAD {}", config.url);

    let started = Instant::now();
    let request = client
        .head(&config.url)
        .header(CACHE_CONTROL, "no-cache")
        .send();

    tokio::select! {
        _ = cancel.cancelled() => ProbeResult::failed(kind, ProbeFailure::Superseded),
        sent = timeout(config.timeout, request) => match sent {
            Err(_) => ProbeResult::timed_out(kind, config.timeout),
            Ok(Err(e)) => ProbeResult::failed(kind, ProbeFailure::network(e)),
            Ok(Ok(response)) => {
                // Any response proves a round trip; status is not health-checked
                let rtt_ms = started.elapsed().as_secs_f64() * 1000.0;
                trace!("latency probe: status {}, {:.1} ms", response.status(), rtt_ms);
                ProbeResult::ok(kind, rtt_ms)
            }
        },
    }
}
