//! Run log accumulator and run report.

use std::path::Path;

/// Ordered, append-only collection of warning lines for one run.
///
/// Owned by the orchestrator and passed explicitly into each item-processing
/// call; flushed to disk exactly once at end of run.
#[derive(Debug, Default)]
pub struct RunLog {
    lines: Vec<String>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one warning line.
    pub fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    /// All accumulated lines, in append order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Write the log to `path`, one warning per line, overwriting any
    /// previous file.
    pub async fn write_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        tokio::fs::write(path, self.lines.join("\n")).await
    }
}

/// Aggregated outcome counts for one run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Items transcoded and uploaded this run
    pub completed: usize,
    /// Items whose remote artifact already existed
    pub already_uploaded: usize,
    /// Items rejected by classification
    pub skipped: usize,
    /// Items that failed; the batch continued past each
    pub failed: usize,
    /// Warnings accumulated across all items
    pub log: RunLog,
}

impl RunReport {
    /// Total number of items seen.
    pub fn total(&self) -> usize {
        self.completed + self.already_uploaded + self.skipped + self.failed
    }
}
