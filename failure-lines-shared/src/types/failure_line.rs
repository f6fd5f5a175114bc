//! Failure line rows as read from the relational store.

use serde::{Deserialize, Serialize};

/// One `test_result` failure line, restricted to the columns needed for
/// indexing and matching.
///
/// `test`, `status` and `expected` are nullable in the store because other
/// action kinds leave them empty. Rows are only ever produced for the
/// `test_result` action, so the action itself is not carried here.
///
/// # Fields
///
/// - `id`: Monotonically assigned primary key, the ordering key of the import
/// - `job_guid`: Opaque identifier of the job the line was logged by
/// - `best_classification_id`: Reference to the chosen classification, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureLine {
    pub id: i64,
    pub job_guid: String,
    pub test: Option<String>,
    pub subtest: Option<String>,
    pub status: Option<String>,
    pub expected: Option<String>,
    pub message: Option<String>,
    pub best_classification_id: Option<i64>,
    pub best_is_verified: bool,
}

impl FailureLine {
    /// Create a failure line with the fields every test result carries.
    ///
    /// Optional fields start empty and `best_is_verified` starts false.
    pub fn test_result(
        id: i64,
        job_guid: impl Into<String>,
        test: impl Into<String>,
        status: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            id,
            job_guid: job_guid.into(),
            test: Some(test.into()),
            subtest: None,
            status: Some(status.into()),
            expected: Some(expected.into()),
            message: None,
            best_classification_id: None,
            best_is_verified: false,
        }
    }
}
