//! Common test utilities and helpers for integration tests.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chattylogs::{create_router, AppState, SeverityLogger};
use http_body_util::BodyExt;
use shared::output::CapturedLines;
use shared::sink::InMemorySink;
use std::sync::Arc;

/// Handles for inspecting what the app wrote.
pub struct TestApp {
    pub router: Router,
    pub output: CapturedLines,
    pub sink: InMemorySink,
    pub logger: Arc<SeverityLogger>,
}

/// Creates a test router over an in-memory sink and captured output.
pub fn test_app() -> TestApp {
    let output = CapturedLines::new();
    let sink = InMemorySink::new();
    let logger = Arc::new(SeverityLogger::with_sink(
        "chattylogs",
        "test-proj",
        Arc::new(sink.clone()),
        Arc::new(output.clone()),
    ));
    let router = create_router(AppState::new(Arc::clone(&logger)));

    TestApp {
        router,
        output,
        sink,
        logger,
    }
}

/// Sends a request and returns the status and body text.
pub async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, String) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, String::from_utf8_lossy(&body_bytes).into_owned())
}

/// Returns a port that was free a moment ago.
pub fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
