//! Severity logger.
//!
//! `SeverityLogger` is the single path from the server to the logging
//! backend. It is built once during startup and shared behind an `Arc` by
//! the periodic emitters and the HTTP handlers.

use crate::config::{BackendKind, BackendSettings};
use shared::models::{LogEntry, RequestRecord, Severity};
use shared::output::LineWriter;
use shared::sink::{HttpLogSink, HttpSinkConfig, InMemorySink, LogSink, SinkError};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while constructing a [`SeverityLogger`].
#[derive(Debug, Error)]
pub enum LoggerError {
    /// The logging backend could not be reached or refused the tenant.
    #[error("Logging backend unavailable: {0}")]
    BackendUnavailable(String),
}

/// Logger bound to one logical stream of one tenant.
pub struct SeverityLogger {
    name: String,
    project_id: String,
    sink: Arc<dyn LogSink>,
    output: Arc<dyn LineWriter>,
}

impl SeverityLogger {
    /// Connects to the configured backend and returns a logger bound to `name`.
    ///
    /// For the HTTP backend the connection is verified with a health probe
    /// before the logger is returned.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::BackendUnavailable`] if the project id is empty,
    /// the backend configuration is unusable, or the backend is unreachable.
    pub async fn create(
        name: &str,
        project_id: &str,
        backend: &BackendSettings,
        output: Arc<dyn LineWriter>,
    ) -> Result<Self, LoggerError> {
        if project_id.trim().is_empty() {
            return Err(LoggerError::BackendUnavailable(
                "no project id available".to_string(),
            ));
        }

        let sink: Arc<dyn LogSink> = match backend.kind {
            BackendKind::Memory => Arc::new(InMemorySink::new()),
            BackendKind::Http => {
                let config = HttpSinkConfig {
                    base_url: backend.url.clone(),
                    project_id: project_id.to_string(),
                    timeout: backend.timeout,
                    ..Default::default()
                };
                let sink = HttpLogSink::new(&config)
                    .map_err(|e| LoggerError::BackendUnavailable(e.to_string()))?;
                sink.health_check()
                    .await
                    .map_err(|e| LoggerError::BackendUnavailable(e.to_string()))?;
                Arc::new(sink)
            }
        };

        tracing::info!(name, project_id, backend = ?backend.kind, "Severity logger ready");

        Ok(Self::with_sink(name, project_id, sink, output))
    }

    /// Builds a logger over an existing sink.
    #[must_use]
    pub fn with_sink(
        name: impl Into<String>,
        project_id: impl Into<String>,
        sink: Arc<dyn LogSink>,
        output: Arc<dyn LineWriter>,
    ) -> Self {
        Self {
            name: name.into(),
            project_id: project_id.into(),
            sink,
            output,
        }
    }

    /// Writes one entry with the given severity. Failures are dropped.
    pub async fn emit(&self, severity: Severity, message: impl Into<String>) {
        if let Err(error) = self.try_emit(severity, message).await {
            tracing::trace!(%error, %severity, "Dropped log entry");
        }
    }

    /// Writes one entry with the given severity.
    ///
    /// # Errors
    ///
    /// Returns the sink's error if the backend does not accept the entry.
    pub async fn try_emit(
        &self,
        severity: Severity,
        message: impl Into<String>,
    ) -> Result<(), SinkError> {
        let entry = LogEntry::new(severity, message, self.name.as_str())
            .with_attribute("project_id", self.project_id.as_str());
        self.sink.write(entry).await
    }

    /// Writes the access-log line for one request to the local output.
    pub fn log_request(&self, record: &RequestRecord) {
        self.output.write_line(&record.access_log_line());
    }

    /// Local process output shared with this logger.
    #[must_use]
    pub fn output(&self) -> &dyn LineWriter {
        self.output.as_ref()
    }

    /// Logical stream name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tenant identifier.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }
}

impl std::fmt::Debug for SeverityLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeverityLogger")
            .field("name", &self.name)
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}
