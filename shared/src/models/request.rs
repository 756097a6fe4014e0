//! Request record model.
//!
//! A `RequestRecord` captures the metadata of one inbound HTTP request and
//! renders it as an access-log line.

use chrono::{DateTime, FixedOffset, Local};

/// Timestamp layout used in access-log lines, e.g. `16/Oct/2026:09:30:05 +0200`.
pub const ACCESS_LOG_TIME_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Metadata about a single inbound request.
///
/// Records are built per request, written once, and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    /// Value of the `Host` header (or the URI authority).
    pub host: String,
    /// Value of the `User-Agent` header, empty when absent.
    pub user_agent: String,
    /// Time the request was received, in local time.
    pub timestamp: DateTime<FixedOffset>,
    /// HTTP method.
    pub method: String,
    /// Request path without the query string.
    pub path: String,
    /// Protocol version, e.g. `HTTP/1.1`.
    pub protocol: String,
    /// Response status written for the request.
    pub status: u16,
    /// Declared request body length, `-1` when unknown.
    pub content_length: i64,
}

impl RequestRecord {
    /// Creates a record stamped with the current local time and status 200.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        user_agent: impl Into<String>,
        method: impl Into<String>,
        path: impl Into<String>,
        protocol: impl Into<String>,
        content_length: i64,
    ) -> Self {
        Self {
            host: host.into(),
            user_agent: user_agent.into(),
            timestamp: Local::now().fixed_offset(),
            method: method.into(),
            path: path.into(),
            protocol: protocol.into(),
            status: 200,
            content_length,
        }
    }

    /// Overrides the timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Renders the record as a single access-log line.
    ///
    /// Format: `<host> <user-agent> [<timestamp>] "<method> <path> <protocol>" <status> <content-length>`
    #[must_use]
    pub fn access_log_line(&self) -> String {
        format!(
            "{} {} [{}] \"{} {} {}\" {} {}",
            self.host,
            self.user_agent,
            self.timestamp.format(ACCESS_LOG_TIME_FORMAT),
            self.method,
            self.path,
            self.protocol,
            self.status,
            self.content_length
        )
    }
}
