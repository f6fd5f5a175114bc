//! Error types for the failure lines repository.
//!
//! One error type per capability: reading the record source and talking to
//! the search index.

mod record_source_error;
mod search_index_error;

pub use record_source_error::RecordSourceError;
pub use search_index_error::SearchIndexError;
