//! # Failure Lines Repository
//!
//! This crate provides the two capabilities the importer is built on: an
//! ordered, pageable view of the eligible failure lines in the relational
//! store, and the administration and bulk write surface of the search index.
//! It includes definitions for errors, interfaces, and concrete
//! implementations for PostgreSQL and OpenSearch.

pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod opensearch;
pub mod postgres;

pub use errors::{RecordSourceError, SearchIndexError};
pub use interfaces::{RecordSource, SearchIndexProvider};
pub use memory::InMemoryFailureLineSource;
pub use opensearch::{IndexConfig, OpenSearchProvider};
pub use postgres::PostgresFailureLineSource;
