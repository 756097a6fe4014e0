//! Chattylogs Shared Library
//!
//! Types and backend plumbing used by the chattylogs server.
//!
//! # Modules
//!
//! - [`models`] - Severity scale, backend log entries, and request records
//! - [`sink`] - The `LogSink` backend trait and its implementations
//! - [`output`] - Local process output for unstructured lines
//!
//! # Example
//!
//! ```
//! use shared::models::{LogEntry, Severity};
//!
//! let entry = LogEntry::new(Severity::Info, "an informational log entry", "chattylogs")
//!     .with_attribute("project_id", "demo-project");
//!
//! assert!(entry.validate_entry().is_ok());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod models;
pub mod output;
pub mod sink;

/// Re-export common dependencies for convenience.
pub use chrono;
pub use serde_json;
