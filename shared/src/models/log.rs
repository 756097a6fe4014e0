//! Log data model.
//!
//! Defines the `Severity` scale and the `LogEntry` record written to the
//! logging backend.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use validator::Validate;

/// Log severity level.
///
/// Ordered from least to most important, so `Severity::Debug < Severity::Critical`.
/// On the wire the levels use the ingestion API's vocabulary
/// (`debug`, `info`, `warn`, `error`, `fatal`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    /// Detail of interest to developers.
    #[serde(rename = "debug")]
    Debug,
    /// Routine information.
    #[serde(rename = "info")]
    Info,
    /// Something that may need attention soon.
    #[serde(rename = "warn")]
    Warning,
    /// An operation failed.
    #[serde(rename = "error")]
    Error,
    /// A serious failure that needs immediate attention.
    #[serde(rename = "fatal")]
    Critical,
}

impl Severity {
    /// All severities, in ascending order.
    pub const ALL: [Severity; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    /// Returns the canonical upper-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single log record as accepted by the ingestion backend.
///
/// # Example
///
/// ```
/// use shared::models::{LogEntry, Severity};
///
/// let entry = LogEntry::new(Severity::Warning, "be prepared", "chattylogs")
///     .with_attribute("project_id", "demo-project");
///
/// assert!(entry.validate_entry().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LogEntry {
    /// Timestamp when the log event occurred.
    pub timestamp: DateTime<Utc>,

    /// Severity of the log.
    pub level: Severity,

    /// The formatted log message.
    #[validate(length(min = 1, message = "Message cannot be empty"))]
    pub message: String,

    /// Logical stream the entry belongs to.
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service: String,

    /// Additional key-value attributes.
    pub attributes: HashMap<String, serde_json::Value>,
}

/// Errors that can occur during log entry validation.
#[derive(Debug, Error)]
pub enum LogValidationError {
    /// The log message is empty.
    #[error("Log message cannot be empty")]
    EmptyMessage,

    /// The stream name is empty.
    #[error("Service name cannot be empty")]
    EmptyService,

    /// Validation failed with details.
    #[error("Validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

impl LogEntry {
    /// Creates a new log entry stamped with the current time.
    #[must_use]
    pub fn new(level: Severity, message: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            service: service.into(),
            attributes: HashMap::new(),
        }
    }

    /// Adds an attribute to the log entry.
    ///
    /// Values that fail to serialize are stored as JSON `null`.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        self.attributes.insert(
            key.into(),
            serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
        );
        self
    }

    /// Validates the log entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the message or the service name is empty.
    pub fn validate_entry(&self) -> Result<(), LogValidationError> {
        if self.message.is_empty() {
            return Err(LogValidationError::EmptyMessage);
        }
        if self.service.is_empty() {
            return Err(LogValidationError::EmptyService);
        }
        self.validate()?;
        Ok(())
    }
}
