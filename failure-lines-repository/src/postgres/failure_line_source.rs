//! PostgreSQL-backed record source for failure lines.
//!
//! Pages are sliced with `LIMIT`/`OFFSET` over `ORDER BY id`, restricted to
//! the `test_result` action.

use async_trait::async_trait;
use failure_lines_shared::{FailureLine, TEST_RESULT_ACTION};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;

use crate::errors::RecordSourceError;
use crate::interfaces::RecordSource;

/// Default name of the failure line table.
pub const DEFAULT_TABLE: &str = "failure_line";

/// PostgreSQL-backed failure line source.
pub struct PostgresFailureLineSource {
    pool: PgPool,
    count_sql: String,
    page_sql: String,
}

impl PostgresFailureLineSource {
    /// Creates a source reading from the default `failure_line` table.
    pub fn new(pool: PgPool) -> Self {
        Self::build(pool, DEFAULT_TABLE)
    }

    /// Creates a source reading from `table`.
    ///
    /// # Returns
    ///
    /// * `Err(RecordSourceError::ConfigError)` - If `table` is not a plain SQL identifier
    pub fn with_table(pool: PgPool, table: &str) -> Result<Self, RecordSourceError> {
        if !is_plain_identifier(table) {
            return Err(RecordSourceError::config(format!(
                "Invalid table name '{}'. Only ASCII letters, digits and underscores are allowed",
                table
            )));
        }
        Ok(Self::build(pool, table))
    }

    fn build(pool: PgPool, table: &str) -> Self {
        Self {
            pool,
            count_sql: format!("SELECT COUNT(*) FROM {} WHERE action = $1", table),
            page_sql: format!(
                "SELECT id, job_guid, test, subtest, status, expected, message, \
                 best_classification_id, best_is_verified \
                 FROM {} WHERE action = $1 ORDER BY id LIMIT $2 OFFSET $3",
                table
            ),
        }
    }

    /// Release the pool's connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn decode_row(row: &PgRow) -> Result<FailureLine, RecordSourceError> {
        let decode = |e: sqlx::Error| RecordSourceError::decode(e.to_string());
        Ok(FailureLine {
            id: row.try_get("id").map_err(decode)?,
            job_guid: row.try_get("job_guid").map_err(decode)?,
            test: row.try_get("test").map_err(decode)?,
            subtest: row.try_get("subtest").map_err(decode)?,
            status: row.try_get("status").map_err(decode)?,
            expected: row.try_get("expected").map_err(decode)?,
            message: row.try_get("message").map_err(decode)?,
            best_classification_id: row.try_get("best_classification_id").map_err(decode)?,
            best_is_verified: row.try_get("best_is_verified").map_err(decode)?,
        })
    }
}

fn is_plain_identifier(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn to_sql_bound(value: u64) -> Result<i64, RecordSourceError> {
    i64::try_from(value)
        .map_err(|_| RecordSourceError::config(format!("{} is out of range for a query bound", value)))
}

#[async_trait]
impl RecordSource for PostgresFailureLineSource {
    async fn count(&self) -> Result<u64, RecordSourceError> {
        let count: i64 = sqlx::query_scalar::<_, i64>(&self.count_sql)
            .bind(TEST_RESULT_ACTION)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn fetch_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<FailureLine>, RecordSourceError> {
        if limit == 0 {
            return Err(RecordSourceError::invalid_page(offset, limit));
        }

        let rows = sqlx::query(&self.page_sql)
            .bind(TEST_RESULT_ACTION)
            .bind(to_sql_bound(limit)?)
            .bind(to_sql_bound(offset)?)
            .fetch_all(&self.pool)
            .await?;

        debug!(offset = offset, limit = limit, rows = rows.len(), "Fetched failure line page");

        rows.iter().map(Self::decode_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_identifier() {
        assert!(is_plain_identifier("failure_line"));
        assert!(is_plain_identifier("FailureLine2"));
        assert!(!is_plain_identifier(""));
        assert!(!is_plain_identifier("2lines"));
        assert!(!is_plain_identifier("failure_line; DROP TABLE job"));
        assert!(!is_plain_identifier("public.failure_line"));
    }

    #[test]
    fn test_sql_bound_range() {
        assert_eq!(to_sql_bound(10_000).unwrap(), 10_000);
        assert!(to_sql_bound(u64::MAX).is_err());
    }
}
