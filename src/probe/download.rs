//! Download throughput probe
//!
//! Streams a cache-busted remote resource to completion, counting bytes
//! against wall-clock time. A timeout before the first byte is a failure;
//! a timeout mid-stream is reported as such — a partial transfer is never
//! extrapolated into a speed.

use super::cache_busted;
use crate::error::ProbeFailure;
use crate::models::{throughput_mbps, DownloadProbeConfig, ProbeResult};
use crate::types::ProbeKind;
use futures::StreamExt;
use log::{debug, trace};
use reqwest::Client;
use std::time::Instant;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

pub(super) async fn run(
    client: &Client,
    config: &DownloadProbeConfig,
    cancel: &CancellationToken,
) -> ProbeResult {
    let kind = ProbeKind::Download;
    let url = cache_busted(&config.url);
    debug!("download probe: GET {}", url);

    let started = Instant::now();
    let deadline = sleep(config.timeout);
    tokio::pin!(deadline);

    let response = tokio::select! {
        _ = cancel.cancelled() => {
            return ProbeResult::failed(kind, ProbeFailure::Superseded);
        }
        _ = &mut deadline => {
            return ProbeResult::failed(kind, ProbeFailure::Timeout(config.timeout));
        }
        sent = client.get(&url).send() => match sent {
            Ok(response) => response,
            Err(e) => return ProbeResult::failed(kind, ProbeFailure::network(e)),
        },
    };

    if !response.status().is_success() {
        return ProbeResult::failed(
            kind,
            ProbeFailure::network(format!("unexpected status {}", response.status())),
        );
    }

    let mut stream = response.bytes_stream();
    let mut received: u64 = 0;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                trace!("download probe cancelled after {} bytes", received);
                return ProbeResult::failed(kind, ProbeFailure::Superseded);
            }
            _ = &mut deadline => {
                return if received == 0 {
                    ProbeResult::failed(kind, ProbeFailure::Timeout(config.timeout))
                } else {
                    ProbeResult::timed_out(kind, config.timeout)
                };
            }
            chunk = stream.next() => match chunk {
                Some(Ok(bytes)) => received += bytes.len() as u64,
                Some(Err(e)) => return ProbeResult::failed(kind, ProbeFailure::network(e)),
                None => break,
            },
        }
    }

    let elapsed = started.elapsed();
    match throughput_mbps(received, elapsed) {
        Some(mbps) => {
            debug!(
                "download probe: {} bytes in {:.2}s, {:.2} Mbps",
                received,
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
