//! Progress observations emitted by a reindex run.
//!
//! The console reporter keeps the line-oriented output operators expect:
//! one line per batch and one final count on stdout, and the abort
//! diagnostic on stderr. Structured logs go through `tracing` separately.

use std::io::Write;

/// Receives the observable milestones of a reindex run.
pub trait ProgressReporter: Send + Sync {
    /// A batch of `count` documents was written.
    fn batch_written(&self, count: usize);

    /// The run finished and the index reports `total` documents.
    fn finished(&self, total: u64);

    /// The run was refused because `index` already exists.
    fn index_already_exists(&self, index: &str);
}

/// Writes progress lines to stdout and the abort diagnostic to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for ConsoleReporter {
    fn batch_written(&self, count: usize) {
        let _ = writeln!(std::io::stdout().lock(), "Inserting {} rows", count);
    }

    fn finished(&self, total: u64) {
        let _ = writeln!(std::io::stdout().lock(), "Index contains {} documents", total);
    }

    fn index_already_exists(&self, index: &str) {
        let _ = writeln!(
            std::io::stderr().lock(),
            "Index {} already exists; can't perform import",
            index
        );
    }
}
