//! Search index provider trait definition.
//!
//! This module defines the abstract interface for the search index
//! operations a full import needs, allowing for different backend
//! implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;
use failure_lines_shared::TestFailureLine;

use crate::errors::SearchIndexError;

/// Abstracts the underlying search index implementation.
///
/// Every method takes the index name explicitly so that one run threads a
/// single configured name through all of its calls.
///
/// All methods return `Result<T, SearchIndexError>` for consistent error
/// handling across different backend implementations.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Check whether the named index exists.
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError>;

    /// Create the named index with the failure line settings and mappings.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was created
    /// * `Err(SearchIndexError::IndexCreationError)` - If it already exists or creation fails
    async fn create_index(&self, index: &str) -> Result<(), SearchIndexError>;

    /// Delete the named index.
    ///
    /// Deleting an index that does not exist is a successful no-op.
    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError>;

    /// Write all documents to the index in one bulk request.
    ///
    /// A failure of any item fails the whole batch with a single aggregate
    /// error; items that did succeed are not rolled back.
    ///
    /// # Arguments
    ///
    /// * `index` - The target index name
    /// * `documents` - Documents in the order they should be submitted
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of documents written
    /// * `Err(SearchIndexError::BulkIndexError)` - If the request or any item failed
    async fn bulk_index_documents(
        &self,
        index: &str,
        documents: &[TestFailureLine],
    ) -> Result<usize, SearchIndexError>;

    /// Count the documents currently in the index.
    async fn count_documents(&self, index: &str) -> Result<u64, SearchIndexError>;
}
