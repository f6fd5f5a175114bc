//! Failure line action kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The only action kind that is eligible for the search index.
pub const TEST_RESULT_ACTION: &str = "test_result";

/// Kind of structured log line a failure line was parsed from.
///
/// Only [`FailureLineAction::TestResult`] lines carry the test, status and
/// expected fields that matching relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureLineAction {
    TestResult,
    Log,
    Crash,
    Truncated,
    GroupResult,
}

impl FailureLineAction {
    /// The value stored in the `action` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TestResult => TEST_RESULT_ACTION,
            Self::Log => "log",
            Self::Crash => "crash",
            Self::Truncated => "truncated",
            Self::GroupResult => "group_result",
        }
    }

    /// Whether lines of this kind are written to the search index.
    pub fn is_indexable(&self) -> bool {
        matches!(self, Self::TestResult)
    }
}

impl fmt::Display for FailureLineAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_test_result_is_indexable() {
        assert!(FailureLineAction::TestResult.is_indexable());
        assert!(!FailureLineAction::Log.is_indexable());
        assert!(!FailureLineAction::Crash.is_indexable());
        assert!(!FailureLineAction::Truncated.is_indexable());
        assert!(!FailureLineAction::GroupResult.is_indexable());
    }

    #[test]
    fn test_serialized_form_matches_column_value() {
        let json = serde_json::to_string(&FailureLineAction::TestResult).unwrap();
        assert_eq!(json, "\"test_result\"");
        assert_eq!(FailureLineAction::TestResult.to_string(), TEST_RESULT_ACTION);
    }
}
