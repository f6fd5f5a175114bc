//! Record source trait definition.

use async_trait::async_trait;
use failure_lines_shared::FailureLine;

use crate::errors::RecordSourceError;

/// Ordered, count-bounded, pageable view over the eligible failure lines.
///
/// Implementations only ever expose `test_result` lines, ordered by `id`
/// ascending. Rows appended after [`RecordSource::count`] was taken may or
/// may not show up in later pages; a full import is a snapshot-style scan
/// and does not try to catch them.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Count the eligible failure lines.
    async fn count(&self) -> Result<u64, RecordSourceError>;

    /// Fetch up to `limit` eligible failure lines starting at `offset`.
    ///
    /// # Arguments
    ///
    /// * `offset` - Number of eligible rows to skip
    /// * `limit` - Maximum number of rows to return, must be greater than zero
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<FailureLine>)` - Rows in ascending `id` order, empty once `offset` is past the end
    /// * `Err(RecordSourceError)` - If the limit is zero or the store cannot be read
    async fn fetch_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<FailureLine>, RecordSourceError>;
}
