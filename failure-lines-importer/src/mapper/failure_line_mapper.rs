//! Failure line mapper implementation.
//!
//! Transforms failure lines read from the store into `TestFailureLine`
//! documents for indexing.

use failure_lines_shared::{FailureLine, TestFailureLine};
use tracing::{debug, instrument};

use crate::errors::MappingError;

/// Mapper that turns failure lines into search documents.
///
/// Mapping is pure and deterministic. A line that lacks a field the document
/// schema requires is an error for the whole run rather than a line to skip.
#[derive(Debug, Clone, Default)]
pub struct FailureLineMapper;

impl FailureLineMapper {
    /// Create a new failure line mapper.
    pub fn new() -> Self {
        Self
    }

    /// Map one page of failure lines, preserving their order.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<TestFailureLine>)` - One document per line
    /// * `Err(MappingError)` - For the first line that cannot be mapped
    #[instrument(skip(self, lines), fields(line_count = lines.len()))]
    pub fn map_page(&self, lines: &[FailureLine]) -> Result<Vec<TestFailureLine>, MappingError> {
        let documents = lines
            .iter()
            .map(|line| self.map(line))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(document_count = documents.len(), "Mapped failure line page");
        Ok(documents)
    }

    /// Map a single failure line.
    pub fn map(&self, line: &FailureLine) -> Result<TestFailureLine, MappingError> {
        if line.job_guid.is_empty() {
            return Err(MappingError::EmptyField {
                id: line.id,
                field: "job_guid",
            });
        }

        Ok(TestFailureLine {
            id: line.id,
            job_guid: line.job_guid.clone(),
            test: required(line.id, "test", &line.test)?,
            subtest: line.subtest.clone(),
            status: required(line.id, "status", &line.status)?,
            expected: required(line.id, "expected", &line.expected)?,
            message: line.message.clone(),
            best_classification: line.best_classification_id,
            best_is_verified: line.best_is_verified,
        })
    }
}

fn required(id: i64, field: &'static str, value: &Option<String>) -> Result<String, MappingError> {
    value
        .clone()
        .ok_or(MappingError::MissingField { id, field })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_line() -> FailureLine {
        FailureLine {
            id: 11,
            job_guid: "5f1c2b3a-job".to_string(),
            test: Some("dom/events/test_click.html".to_string()),
            subtest: Some("click bubbles".to_string()),
            status: Some("FAIL".to_string()),
            expected: Some("PASS".to_string()),
            message: Some("expected true, got false".to_string()),
            best_classification_id: Some(301),
            best_is_verified: true,
        }
    }

    #[test]
    fn test_map_copies_every_field() {
        let doc = FailureLineMapper::new().map(&full_line()).unwrap();

        assert_eq!(doc.id, 11);
        assert_eq!(doc.document_id(), "11");
        assert_eq!(doc.job_guid, "5f1c2b3a-job");
        assert_eq!(doc.test, "dom/events/test_click.html");
        assert_eq!(doc.subtest.as_deref(), Some("click bubbles"));
        assert_eq!(doc.status, "FAIL");
        assert_eq!(doc.expected, "PASS");
        assert_eq!(doc.message.as_deref(), Some("expected true, got false"));
        assert_eq!(doc.best_classification, Some(301));
        assert!(doc.best_is_verified);
    }

    #[test]
    fn test_map_is_deterministic() {
        let mapper = FailureLineMapper::new();
        let line = full_line();
        assert_eq!(mapper.map(&line).unwrap(), mapper.map(&line).unwrap());
    }

    #[test]
    fn test_nullable_fields_stay_null() {
        let mut line = full_line();
        line.subtest = None;
        line.message = None;
        line.best_classification_id = None;

        let doc = FailureLineMapper::new().map(&line).unwrap();
        assert!(doc.subtest.is_none());
        assert!(doc.message.is_none());
        assert!(doc.best_classification.is_none());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let mapper = FailureLineMapper::new();

        let mut line = full_line();
        line.status = None;
        assert_eq!(
            mapper.map(&line).unwrap_err(),
            MappingError::MissingField {
                id: 11,
                field: "status"
            }
        );

        let mut line = full_line();
        line.test = None;
        assert!(matches!(
            mapper.map(&line),
            Err(MappingError::MissingField { field: "test", .. })
        ));

        let mut line = full_line();
        line.job_guid = String::new();
        assert!(matches!(
            mapper.map(&line),
            Err(MappingError::EmptyField { field: "job_guid", .. })
        ));
    }

    #[test]
    fn test_map_page_preserves_order_and_stops_on_failure() {
        let mapper = FailureLineMapper::new();
        let lines: Vec<FailureLine> = [3, 1, 2]
            .into_iter()
            .map(|id| FailureLine::test_result(id, "guid", "t.html", "FAIL", "PASS"))
            .collect();

        let ids: Vec<i64> = mapper.map_page(&lines).unwrap().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        let mut broken = lines.clone();
        broken[1].expected = None;
        assert_eq!(
            mapper.map_page(&broken).unwrap_err(),
            MappingError::MissingField {
                id: 1,
                field: "expected"
            }
        );
    }
}
