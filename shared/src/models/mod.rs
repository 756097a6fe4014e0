//! Data models for chattylogs.
//!
//! This module contains the log record sent to the backend and the
//! per-request access-log record.

pub mod log;
pub mod request;

pub use log::{LogEntry, LogValidationError, Severity};
pub use request::{RequestRecord, ACCESS_LOG_TIME_FORMAT};
