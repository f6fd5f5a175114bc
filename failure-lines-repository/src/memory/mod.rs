//! In-memory record source for testing and local development.
//!
//! The `InMemoryFailureLineSource` holds failure lines of every action kind,
//! allowing the importer to run without a database while applying the same
//! eligibility filter and ordering as the PostgreSQL source.
//!
//! # Example
//!
//! ```
//! use failure_lines_repository::{InMemoryFailureLineSource, RecordSource};
//! use failure_lines_shared::{FailureLine, FailureLineAction};
//!
//! # tokio_test_block_on(async {
//! let source = InMemoryFailureLineSource::with_lines(vec![
//!     (FailureLineAction::TestResult, FailureLine::test_result(1, "guid", "a.html", "FAIL", "PASS")),
//!     (FailureLineAction::Log, FailureLine::test_result(2, "guid", "b.html", "FAIL", "PASS")),
//! ]);
//! assert_eq!(source.count().await.unwrap(), 1);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use failure_lines_shared::{FailureLine, FailureLineAction};

use crate::errors::RecordSourceError;
use crate::interfaces::RecordSource;

type Lines = Vec<(FailureLineAction, FailureLine)>;

/// Failure line source backed by a vector.
pub struct InMemoryFailureLineSource {
    lines: RwLock<Lines>,
}

impl InMemoryFailureLineSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self {
            lines: RwLock::new(Vec::new()),
        }
    }

    /// Create a source pre-populated with lines of any action kind.
    pub fn with_lines(lines: Vec<(FailureLineAction, FailureLine)>) -> Self {
        Self {
            lines: RwLock::new(lines),
        }
    }

    /// Append a line, as a concurrent writer to the store would.
    pub fn insert(
        &self,
        action: FailureLineAction,
        line: FailureLine,
    ) -> Result<(), RecordSourceError> {
        self.write_lines()?.push((action, line));
        Ok(())
    }

    /// Remove every line with an id greater than or equal to `id`.
    pub fn truncate_from(&self, id: i64) -> Result<(), RecordSourceError> {
        self.write_lines()?.retain(|(_, line)| line.id < id);
        Ok(())
    }

    fn read_lines(&self) -> Result<RwLockReadGuard<'_, Lines>, RecordSourceError> {
        self.lines
            .read()
            .map_err(|e| RecordSourceError::decode(format!("Lock poisoned: {}", e)))
    }

    fn write_lines(&self) -> Result<RwLockWriteGuard<'_, Lines>, RecordSourceError> {
        self.lines
            .write()
            .map_err(|e| RecordSourceError::decode(format!("Lock poisoned: {}", e)))
    }

    fn eligible(&self) -> Result<Vec<FailureLine>, RecordSourceError> {
        let lines = self.read_lines()?;

        let mut eligible: Vec<FailureLine> = lines
            .iter()
            .filter(|(action, _)| action.is_indexable())
            .map(|(_, line)| line.clone())
            .collect();
        eligible.sort_by_key(|line| line.id);
        Ok(eligible)
    }
}

impl Default for InMemoryFailureLineSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordSource for InMemoryFailureLineSource {
    async fn count(&self) -> Result<u64, RecordSourceError> {
        Ok(self.eligible()?.len() as u64)
    }

    async fn fetch_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<FailureLine>, RecordSourceError> {
        if limit == 0 {
            return Err(RecordSourceError::invalid_page(offset, limit));
        }

        Ok(self
            .eligible()?
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}
