//! Integration tests for startup.
//!
//! Tests cover:
//! - Tenant id fallback when the metadata server fails
//! - Fatal backend construction failure before any listener starts
//! - Serving over TCP and shutting down cleanly

use chattylogs::config::{BackendKind, BackendSettings, Config};
use chattylogs::metadata::{resolve_project_id, MetadataClient};
use chattylogs::{run_server_with_config, serve, SeverityLogger};
use shared::output::CapturedLines;
use shared::sink::InMemorySink;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::common::free_port;

async fn failing_metadata_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_metadata_failure_falls_back_to_project_id() {
    let metadata_server = failing_metadata_server().await;
    let metadata = MetadataClient::with_base_url(metadata_server.uri()).unwrap();

    let project_id = resolve_project_id(Some(&metadata), Some("test-proj".to_string())).await;
    assert_eq!(project_id, "test-proj");

    let backend = BackendSettings {
        kind: BackendKind::Memory,
        ..Default::default()
    };
    let logger = SeverityLogger::create(
        "chattylogs",
        &project_id,
        &backend,
        Arc::new(CapturedLines::new()),
    )
    .await
    .unwrap();

    assert_eq!(logger.project_id(), "test-proj");
}

#[tokio::test]
async fn test_backend_failure_is_fatal_and_no_listener_starts() {
    let metadata_server = failing_metadata_server().await;
    let backend_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&backend_server)
        .await;

    let port = free_port();
    let config = Config {
        host: "127.0.0.1".parse().unwrap(),
        port,
        project_id: Some("test-proj".to_string()),
        backend: BackendSettings {
            kind: BackendKind::Http,
            url: backend_server.uri(),
            timeout: Duration::from_secs(2),
        },
        metadata_host: metadata_server.address().to_string(),
        ..Default::default()
    };

    let result = run_server_with_config(config).await;

    let error = result.unwrap_err();
    assert!(format!("{error:#}").contains("Logging backend unavailable"));
    assert!(std::net::TcpListener::bind(("127.0.0.1", port)).is_ok());
}

#[tokio::test]
async fn test_missing_project_id_is_fatal() {
    let metadata_server = failing_metadata_server().await;
    let config = Config {
        host: "127.0.0.1".parse().unwrap(),
        port: free_port(),
        project_id: None,
        backend: BackendSettings {
            kind: BackendKind::Memory,
            ..Default::default()
        },
        metadata_host: metadata_server.address().to_string(),
        ..Default::default()
    };

    assert!(run_server_with_config(config).await.is_err());
}

#[tokio::test]
async fn test_serves_over_tcp_and_shuts_down() {
    let port = free_port();
    let config = Config {
        host: "127.0.0.1".parse().unwrap(),
        port,
        ..Default::default()
    };
    let sink = InMemorySink::new();
    let output = CapturedLines::new();
    let logger = Arc::new(SeverityLogger::with_sink(
        "chattylogs",
        "test-proj",
        Arc::new(sink.clone()),
        Arc::new(output.clone()),
    ));

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        serve(&config, logger, async move {
            let _ = stop_rx.await;
        })
        .await
    });

    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{port}/healthz");
    let mut response = None;
    for _ in 0..50 {
        if let Ok(r) = client.get(&url).header("user-agent", "it-test").send().await {
            response = Some(r);
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    let response = response.expect("server did not come up");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ok");

    drop(client);
    stop_tx.send(()).unwrap();
    server.await.unwrap().unwrap();

    let access_lines: Vec<String> = output
        .lines()
        .into_iter()
        .filter(|l| l.contains("it-test"))
        .collect();
    assert_eq!(access_lines.len(), 1);
    assert!(access_lines[0].contains("\"GET /healthz HTTP/1.1\" 200"));
    // The info emitter fires once at start-up.
    assert!(sink.count_severity(shared::models::Severity::Info).unwrap() >= 1);
}
