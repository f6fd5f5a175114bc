//! Configuration and dependency initialization for the importer.
//!
//! Run options come from the command line; connection settings come from
//! the environment (optionally seeded from a `.env` file).

mod cli;
mod dependencies;

pub use cli::Cli;
pub use dependencies::Dependencies;

use std::env;

use failure_lines_repository::opensearch::INDEX_NAME;
use failure_lines_repository::postgres::DEFAULT_TABLE;
use failure_lines_repository::IndexConfig;

use crate::ImporterError;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default PostgreSQL pool size.
const DEFAULT_PG_MAX_CONNECTIONS: u32 = 5;

/// Connection settings for the stores the importer talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub database_url: String,
    pub opensearch_url: String,
    pub index: IndexConfig,
    pub table: String,
    pub pg_max_connections: u32,
}

impl ImportConfig {
    /// Read the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: PostgreSQL connection string (required)
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `INDEX_NAME`: Base index name (default: "failure-lines")
    /// - `FAILURE_LINES_INDEX_VERSION`: Index version number (default: 0)
    /// - `FAILURE_LINE_TABLE`: Source table (default: "failure_line")
    /// - `PG_MAX_CONNECTIONS`: PostgreSQL pool size (default: 5)
    pub fn from_env() -> Result<Self, ImporterError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ImporterError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ImporterError::config("DATABASE_URL must be set"))?;
        let opensearch_url =
            lookup("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string());

        let index_name = lookup("INDEX_NAME").unwrap_or_else(|| INDEX_NAME.to_string());
        let index_version = match lookup("FAILURE_LINES_INDEX_VERSION") {
            Some(v) => v.parse::<u32>().map_err(|e| {
                ImporterError::config(format!("Invalid FAILURE_LINES_INDEX_VERSION '{}': {}", v, e))
            })?,
            None => 0,
        };

        let table = lookup("FAILURE_LINE_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string());
        let pg_max_connections = match lookup("PG_MAX_CONNECTIONS") {
            Some(v) => v.parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(|| {
                ImporterError::config(format!("Invalid PG_MAX_CONNECTIONS '{}'", v))
            })?,
            None => DEFAULT_PG_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            opensearch_url,
            index: IndexConfig::new(index_name, index_version),
            table,
            pg_max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ImportConfig::from_lookup(lookup(&[(
            "DATABASE_URL",
            "postgres://localhost/treeherder",
        )]))
        .unwrap();

        assert_eq!(config.database_url, "postgres://localhost/treeherder");
        assert_eq!(config.opensearch_url, "http://localhost:9200");
        assert_eq!(config.index.versioned_name(), "failure-lines_v0");
        assert_eq!(config.table, "failure_line");
        assert_eq!(config.pg_max_connections, 5);
    }

    #[test]
    fn test_overrides() {
        let config = ImportConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/th"),
            ("OPENSEARCH_URL", "http://search:9200"),
            ("INDEX_NAME", "lines"),
            ("FAILURE_LINES_INDEX_VERSION", "2"),
            ("FAILURE_LINE_TABLE", "failure_line_archive"),
            ("PG_MAX_CONNECTIONS", "2"),
        ]))
        .unwrap();

        assert_eq!(config.opensearch_url, "http://search:9200");
        assert_eq!(config.index.versioned_name(), "lines_v2");
        assert_eq!(config.table, "failure_line_archive");
        assert_eq!(config.pg_max_connections, 2);
    }

    #[test]
    fn test_database_url_is_required() {
        let result = ImportConfig::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(ImporterError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let result = ImportConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/th"),
            ("FAILURE_LINES_INDEX_VERSION", "v1"),
        ]));
        assert!(matches!(result, Err(ImporterError::ConfigError(_))));

        let result = ImportConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/th"),
            ("PG_MAX_CONNECTIONS", "0"),
        ]));
        assert!(matches!(result, Err(ImporterError::ConfigError(_))));
    }
}
