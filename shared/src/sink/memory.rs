//! In-memory sink for development and testing.

use super::{LogSink, SinkError};
use crate::models::{LogEntry, Severity};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Sink that keeps every written entry in memory.
///
/// Clones share the same underlying buffer.
#[derive(Debug, Clone, Default)]
pub struct InMemorySink {
    entries: Arc<RwLock<Vec<LogEntry>>>,
}

impl InMemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all entries written so far.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn entries(&self) -> Result<Vec<LogEntry>, SinkError> {
        let entries = self.entries.read().map_err(|_| SinkError::LockError)?;
        Ok(entries.clone())
    }

    /// Returns the number of entries written so far.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn count(&self) -> Result<usize, SinkError> {
        let entries = self.entries.read().map_err(|_| SinkError::LockError)?;
        Ok(entries.len())
    }

    /// Returns the number of entries written with the given severity.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn count_severity(&self, severity: Severity) -> Result<usize, SinkError> {
        let entries = self.entries.read().map_err(|_| SinkError::LockError)?;
        Ok(entries.iter().filter(|e| e.level == severity).count())
    }
}

#[async_trait]
impl LogSink for InMemorySink {
    async fn write(&self, entry: LogEntry) -> Result<(), SinkError> {
        entry.validate_entry()?;
        let mut entries = self.entries.write().map_err(|_| SinkError::LockError)?;
        entries.push(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_count() {
        let sink = InMemorySink::new();

        tokio_test::block_on(async {
            sink.write(LogEntry::new(Severity::Debug, "one", "s")).await.unwrap();
            sink.write(LogEntry::new(Severity::Debug, "two", "s")).await.unwrap();
            sink.write(LogEntry::new(Severity::Error, "three", "s")).await.unwrap();
        });

        assert_eq!(sink.count().unwrap(), 3);
        assert_eq!(sink.count_severity(Severity::Debug).unwrap(), 2);
        assert_eq!(sink.count_severity(Severity::Critical).unwrap(), 0);
    }

    #[test]
    fn test_clones_share_entries() {
        let sink = InMemorySink::new();
        let other = sink.clone();

        tokio_test::block_on(sink.write(LogEntry::new(Severity::Info, "hello", "s"))).unwrap();

        let entries = other.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "hello");
    }

    #[test]
    fn test_rejects_invalid_entry() {
        let sink = InMemorySink::new();
        let result = tokio_test::block_on(sink.write(LogEntry::new(Severity::Info, "", "s")));

        assert!(matches!(result, Err(SinkError::Validation(_))));
        assert_eq!(sink.count().unwrap(), 0);
    }
}
