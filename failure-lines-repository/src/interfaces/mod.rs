//! Interface definitions for the record source and the search index.
//!
//! These traits allow the importer to be wired against the real PostgreSQL
//! and OpenSearch backends in production and against fakes in tests.

mod record_source;
mod search_index_provider;

pub use record_source::RecordSource;
pub use search_index_provider::SearchIndexProvider;
