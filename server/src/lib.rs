//! Chattylogs Server
//!
//! A small service that generates synthetic log traffic for exercising
//! log-ingestion and monitoring pipelines.
//!
//! # Architecture
//!
//! Startup resolves the tenant identifier, builds one [`SeverityLogger`],
//! and shares it with:
//! - the periodic emitters, which write fixed messages at fixed cadences
//! - the health handler, which answers every request with `200 ok` and
//!   writes an access-log line
//!
//! # Example
//!
//! ```no_run
//! use chattylogs::run_server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     run_server().await
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod emitters;
pub mod logger;
pub mod metadata;
mod routes;
mod state;

pub use config::Config;
pub use logger::{LoggerError, SeverityLogger};
pub use state::AppState;

use anyhow::{Context, Result};
use axum::Router;
use metadata::MetadataClient;
use shared::output::Stdout;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

/// Runs the chattylogs server.
///
/// Loads configuration from environment variables, then hands over to
/// [`run_server_with_config`].
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The logging backend is unavailable
/// - The server fails to bind to the configured address
pub async fn run_server() -> Result<()> {
    let config = Config::from_env()?;
    run_server_with_config(config).await
}

/// Runs the chattylogs server with the provided configuration.
///
/// Resolves the tenant identifier, constructs the severity logger, and
/// serves until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if:
/// - The logging backend is unavailable
/// - The server fails to bind to the configured address
/// - A fatal error occurs during operation
pub async fn run_server_with_config(config: Config) -> Result<()> {
    tracing::info!("Spinning up chatty logs");

    tracing::info!(metadata_host = %config.metadata_host, "Getting project id");
    let metadata_client = MetadataClient::new(&config.metadata_host)
        .map_err(|error| tracing::warn!(%error, "Metadata client unavailable"))
        .ok();
    let project_id =
        metadata::resolve_project_id(metadata_client.as_ref(), config.project_id.clone()).await;
    tracing::info!(%project_id, "Project ID resolved");

    let logger = SeverityLogger::create(
        &config.log_name,
        &project_id,
        &config.backend,
        Arc::new(Stdout),
    )
    .await
    .context("Failed to create logger")?;

    serve(&config, Arc::new(logger), shutdown_signal()).await
}

/// Starts the periodic emitters and serves HTTP until `shutdown` resolves.
///
/// The emitters are stopped and awaited before this function returns.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn serve<F>(config: &Config, logger: Arc<SeverityLogger>, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let addr = config.socket_addr();

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Chattylogs server starting"
    );

    let emitters_token = CancellationToken::new();
    let emitters = emitters::spawn_emitters(Arc::clone(&logger), emitters_token.clone());

    let result: Result<()> = async {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        tracing::info!(addr = %listener.local_addr()?, "Listening for connections");

        axum::serve(listener, create_router(AppState::new(logger)))
            .with_graceful_shutdown(shutdown)
            .await
            .context("Server error")
    }
    .await;

    emitters_token.cancel();
    for handle in emitters {
        if let Err(error) = handle.await {
            tracing::warn!(%error, "Emitter task ended abnormally");
        }
    }

    if result.is_ok() {
        tracing::info!("Server shutdown complete");
    }
    result
}

/// Creates the main application router with all routes and middleware.
///
/// This function is public to allow testing the router without starting a full server.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes(state))
        .layer(TraceLayer::new_for_http())
}

/// Waits for a shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
