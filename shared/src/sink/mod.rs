//! Logging backend sinks.
//!
//! The `LogSink` trait abstracts the external structured-logging backend.
//! `HttpLogSink` talks to an HTTP ingestion API; `InMemorySink` keeps entries
//! in process for development and testing.

mod http;
mod memory;

pub use http::{HttpLogSink, HttpSinkConfig};
pub use memory::InMemorySink;

use crate::models::{LogEntry, LogValidationError};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while writing to a sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The sink was configured with an unusable value.
    #[error("Invalid sink configuration: {0}")]
    InvalidConfig(String),

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Backend rejected request with status {status}")]
    Rejected {
        /// HTTP status returned by the backend.
        status: u16,
    },

    /// The entry failed validation before being sent.
    #[error("Invalid log entry: {0}")]
    Validation(#[from] LogValidationError),

    /// Failed to acquire lock on an in-memory sink.
    #[error("Failed to acquire lock on log sink")]
    LockError,
}

/// Trait for logging backends.
///
/// Implementations must be safe to share between tasks; every caller writes
/// through the same `Arc<dyn LogSink>` without extra synchronization.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Appends one entry to the backend stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is invalid or the backend does not
    /// accept it.
    async fn write(&self, entry: LogEntry) -> Result<(), SinkError>;
}
