//! Search index document for test failure lines.

use serde::{Deserialize, Serialize};

/// Document type name stored in the index metadata.
pub const DOCUMENT_TYPE: &str = "test_failure_line";

/// Document representation of a test failure line in the search index.
///
/// One document per source [`FailureLine`](crate::FailureLine); the document
/// id is the source row id, so it is kept out of the serialized body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestFailureLine {
    #[serde(skip)]
    pub id: i64,
    pub job_guid: String,
    pub test: String,
    pub subtest: Option<String>,
    pub status: String,
    pub expected: String,
    pub message: Option<String>,
    pub best_classification: Option<i64>,
    pub best_is_verified: bool,
}

impl TestFailureLine {
    /// The `_id` used for this document in the search index.
    pub fn document_id(&self) -> String {
        self.id.to_string()
    }
}
