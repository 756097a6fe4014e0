//! Integration tests for the health endpoint.
//!
//! Tests cover:
//! - `/healthz`, `/`, and unregistered paths
//! - Access-log output per request

use axum::http::{Method, StatusCode};

use super::common::{send, test_app};

#[tokio::test]
async fn test_healthz() {
    let app = test_app();

    let (status, body) = send(app.router, Method::GET, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_root() {
    let app = test_app();

    let (status, body) = send(app.router, Method::GET, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_methods_and_paths_are_ignored() {
    for method in [Method::GET, Method::POST, Method::HEAD, Method::OPTIONS, Method::DELETE] {
        for uri in ["/", "/healthz", "/api/v1/anything", "/favicon.ico"] {
            let app = test_app();
            let (status, _) = send(app.router, method.clone(), uri).await;
            assert_eq!(status, StatusCode::OK, "{method} {uri}");
        }
    }
}

#[tokio::test]
async fn test_one_access_log_line_per_request() {
    let app = test_app();

    for _ in 0..5 {
        send(app.router.clone(), Method::GET, "/healthz").await;
    }

    let lines = app.output.lines();
    assert_eq!(lines.len(), 5);
    for line in lines {
        assert!(line.ends_with("\"GET /healthz HTTP/1.1\" 200 0"), "{line}");
    }
}

#[tokio::test]
async fn test_requests_do_not_touch_backend() {
    let app = test_app();

    send(app.router, Method::GET, "/").await;

    assert_eq!(app.sink.count().unwrap(), 0);
    assert_eq!(app.logger.name(), "chattylogs");
}

#[tokio::test]
async fn test_concurrent_requests() {
    let app = test_app();

    let mut handles = Vec::new();
    for i in 0..20 {
        let router = app.router.clone();
        handles.push(tokio::spawn(async move {
            send(router, Method::GET, &format!("/path/{i}")).await
        }));
    }
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    assert_eq!(app.output.lines().len(), 20);
}
