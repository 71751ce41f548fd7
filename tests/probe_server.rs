//! Probe runner behavior against a local mock HTTP server.

use linkwatch::error::ProbeFailure;
use linkwatch::models::Config;
use linkwatch::types::{ProbeKind, ProbeStatus};
use linkwatch::{HttpProbeRunner, ProbeRunner};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server_uri: &str) -> Config {
    let mut config = Config::default();
    config.download.url = format!("{}/down", server_uri);
    config.download.timeout = Duration::from_secs(5);
    config.upload.url = format!("{}/up", server_uri);
    config.upload.payload_bytes = 64 * 1024;
    config.upload.timeout = Duration::from_secs(5);
    config.latency.url = format!("{}/ping", server_uri);
    config.latency.timeout = Duration::from_millis(500);
    config
}

#[tokio::test]
async fn download_probe_measures_served_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 256 * 1024]))
        .mount(&server)
        .await;

    let runner = HttpProbeRunner::new(&test_config(&server.uri())).unwrap();
    let result = runner
        .run(ProbeKind::Download, CancellationToken::new())
        .await;

    assert_eq!(result.status, ProbeStatus::Ok);
    assert!(result.value > 0.0);
}

#[tokio::test]
async fn download_probe_cache_busts_every_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 1024]))
        .mount(&server)
        .await;

    let runner = HttpProbeRunner::new(&test_config(&server.uri())).unwrap();
    runner
        .run(ProbeKind::Download, CancellationToken::new())
        .await;
    runner
        .run(ProbeKind::Download, CancellationToken::new())
        .await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let tokens: Vec<String> = requests
        .iter()
        .map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "nocache")
                .map(|(_, v)| v.to_string())
                .expect("request missing cache-bust token")
        })
        .collect();
    assert_ne!(tokens[0], tokens[1]);
}

#[tokio::test]
async fn download_probe_rejects_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let runner = HttpProbeRunner::new(&test_config(&server.uri())).unwrap();
    let result = runner
        .run(ProbeKind::Download, CancellationToken::new())
        .await;

    assert_eq!(result.status, ProbeStatus::Failed);
}

#[tokio::test]
async fn cancelled_download_probe_reports_superseded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0u8; 1024 * 1024])
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let runner = HttpProbeRunner::new(&test_config(&server.uri())).unwrap();
    let result = runner.run(ProbeKind::Download, cancel).await;

    assert_eq!(result.status, ProbeStatus::Failed);
    assert_eq!(result.failure, Some(ProbeFailure::Superseded));
}

#[tokio::test]
async fn upload_probe_submits_full_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/up"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let runner = HttpProbeRunner::new(&test_config(&server.uri())).unwrap();
    let result = runner.run(ProbeKind::Upload, CancellationToken::new()).await;

    assert_eq!(result.status, ProbeStatus::Ok);
    assert!(result.value > 0.0);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body.len(), 64 * 1024);
}

#[tokio::test]
async fn upload_probe_survives_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/up"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let runner = HttpProbeRunner::new(&test_config(&server.uri())).unwrap();
    let result = runner.run(ProbeKind::Upload, CancellationToken::new()).await;

    assert_eq!(result.status, ProbeStatus::Failed);
    assert!(matches!(result.failure, Some(ProbeFailure::Network(_))));
}

#[tokio::test]
async fn latency_probe_measures_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let runner = HttpProbeRunner::new(&test_config(&server.uri())).unwrap();
    let result = runner
        .run(ProbeKind::Latency, CancellationToken::new())
        .await;

    assert_eq!(result.status, ProbeStatus::Ok);
    assert!(result.value >= 0.0);
}

#[tokio::test]
async fn latency_probe_counts_any_response_as_reachable() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let runner = HttpProbeRunner::new(&test_config(&server.uri())).unwrap();
    let result = runner
        .run(ProbeKind::Latency, CancellationToken::new())
        .await;

    assert_eq!(result.status, ProbeStatus::Ok);
}

#[tokio::test]
async fn latency_probe_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let runner = HttpProbeRunner::new(&test_config(&server.uri())).unwrap();
    let result = runner
        .run(ProbeKind::Latency, CancellationToken::new())
        .await;

    assert_eq!(result.status, ProbeStatus::TimedOut);
    assert!(result.failure.as_ref().is_some_and(|f| f.is_timeout()));
}
