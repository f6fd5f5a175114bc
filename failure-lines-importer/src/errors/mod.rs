//! Error types for a reindex run.

use failure_lines_repository::{RecordSourceError, SearchIndexError};
use thiserror::Error;

/// A failure line that cannot be turned into an index document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// A field the document schema requires is null in the source row.
    #[error("Failure line {id} is missing required field '{field}'")]
    MissingField { id: i64, field: &'static str },

    /// A required field is present but empty.
    #[error("Failure line {id} has an empty '{field}'")]
    EmptyField { id: i64, field: &'static str },
}

/// Errors that end a reindex run.
///
/// Every variant except `PreconditionConflict` is fatal. Batches written
/// before the failure stay in the index.
#[derive(Error, Debug)]
pub enum ReindexError {
    /// The target index already exists and recreation was not requested.
    /// No document has been written.
    #[error("Index {index} already exists; can't perform import")]
    PreconditionConflict { index: String },

    /// A failure line could not be mapped, which points at a schema mismatch.
    #[error("Mapping failure: {0}")]
    MappingFailure(#[from] MappingError),

    /// The index rejected a batch, fully or partially.
    #[error("Bulk write failure: {0}")]
    BulkWriteFailure(SearchIndexError),

    /// The relational store could not be counted or read.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(#[from] RecordSourceError),

    /// Checking, creating, deleting, or counting the index failed.
    #[error("Index administration failure: {0}")]
    IndexAdministration(SearchIndexError),
}

impl ReindexError {
    /// Whether the run stopped before doing any work because the index
    /// already existed.
    pub fn is_precondition_conflict(&self) -> bool {
        matches!(self, Self::PreconditionConflict { .. })
    }
}
