//! Local process output.
//!
//! Access-log lines and the plain periodic message go to the process's
//! standard output rather than the logging backend. `LineWriter` lets tests
//! capture those lines instead.

use std::io::Write;
use std::sync::{Arc, Mutex};

/// Destination for unstructured output lines.
pub trait LineWriter: Send + Sync {
    /// Writes one line. A trailing newline is added by the writer.
    fn write_line(&self, line: &str);
}

/// Writes lines to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stdout;

impl LineWriter for Stdout {
    fn write_line(&self, line: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{line}");
    }
}

/// Collects lines in memory.
#[derive(Debug, Clone, Default)]
pub struct CapturedLines {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CapturedLines {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all captured lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Counts captured lines equal to `line`.
    #[must_use]
    pub fn count_matching(&self, line: &str) -> usize {
        self.lines().iter().filter(|l| l.as_str() == line).count()
    }
}

impl LineWriter for CapturedLines {
    fn write_line(&self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_lines_shared_between_clones() {
        let captured = CapturedLines::new();
        let writer: Arc<dyn LineWriter> = Arc::new(captured.clone());

        writer.write_line("first");
        writer.write_line("second");
        writer.write_line("first");

        assert_eq!(captured.lines(), vec!["first", "second", "first"]);
        assert_eq!(captured.count_matching("first"), 2);
    }
}
