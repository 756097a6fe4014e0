//! Health check endpoint.
//!
//! Answers liveness probes on every path and method, writing one access-log
//! line per request.

use crate::state::AppState;
use axum::{
    body::HttpBody,
    extract::{Request, State},
    http::{header, StatusCode},
    routing::any,
    Router,
};
use shared::models::RequestRecord;

/// Creates the health check routes.
///
/// `/healthz` and `/` are registered explicitly; every other path falls back
/// to the same handler.
pub fn health_routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", any(health_check))
        .route("/", any(health_check))
        .fallback(health_check)
        .with_state(state)
}

/// Health check handler.
///
/// Records the request, then answers `200 OK` with body `ok`. It never fails.
async fn health_check(State(state): State<AppState>, request: Request) -> (StatusCode, &'static str) {
    let record = request_record(&request);
    state.logger().log_request(&record);
    (StatusCode::OK, "ok")
}

/// Derives the access-log record for a request.
pub fn request_record<B: HttpBody>(request: &Request<B>) -> RequestRecord {
    let headers = request.headers();

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| request.uri().authority().map(ToString::to_string))
        .unwrap_or_default();

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let content_length = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<i64>().ok())
        .or_else(|| {
            request
                .body()
                .size_hint()
                .exact()
                .map(|n| i64::try_from(n).unwrap_or(i64::MAX))
        })
        .unwrap_or(-1);

    RequestRecord::new(
        host,
        user_agent,
        request.method().as_str(),
        request.uri().path(),
        format!("{:?}", request.version()),
        content_length,
    )
}
