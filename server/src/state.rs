//! Application state module.
//!
//! Defines the shared application state that is passed to route handlers.

use crate::logger::SeverityLogger;
use std::sync::Arc;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The process-wide severity logger.
    logger: Arc<SeverityLogger>,
}

impl AppState {
    /// Creates a new application state around the shared logger.
    #[must_use]
    pub fn new(logger: Arc<SeverityLogger>) -> Self {
        Self { logger }
    }

    /// Returns a reference to the severity logger.
    #[must_use]
    pub fn logger(&self) -> &SeverityLogger {
        self.logger.as_ref()
    }
}
