//! # Failure Lines Shared
//!
//! This crate defines the data structures shared by the failure line import
//! ecosystem: the rows read from the relational store and the documents
//! written to the search index.

pub mod types;

pub use types::action::{FailureLineAction, TEST_RESULT_ACTION};
pub use types::failure_line::FailureLine;
pub use types::test_failure_line::{TestFailureLine, DOCUMENT_TYPE};
