//! Dependency initialization and wiring for the importer.

use std::num::NonZeroU64;
use std::sync::Arc;
use tracing::info;

use crate::config::{Cli, ImportConfig};
use crate::pacing::FixedDelay;
use crate::progress::ConsoleReporter;
use crate::reindexer::{ChunkedReindexer, ReindexerConfig};
use crate::ImporterError;
use failure_lines_repository::{postgres, OpenSearchProvider, PostgresFailureLineSource};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured reindexer ready to run.
    pub reindexer: ChunkedReindexer,
    source: Arc<PostgresFailureLineSource>,
}

impl Dependencies {
    /// Connect to both stores and build the reindexer.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ImporterError)` - If a connection cannot be set up
    pub async fn new(cli: &Cli, config: &ImportConfig) -> Result<Self, ImporterError> {
        let chunk_size = NonZeroU64::new(cli.chunk_size)
            .ok_or_else(|| ImporterError::config("chunk size must be greater than zero"))?;
        let index = config.index.versioned_name();

        info!(
            opensearch_url = %config.opensearch_url,
            index = %index,
            table = %config.table,
            chunk_size = cli.chunk_size,
            sleep_secs = cli.sleep,
            recreate = cli.recreate,
            "Initializing dependencies"
        );

        let pool = postgres::connect(&config.database_url, config.pg_max_connections)
            .await
            .map_err(|e| ImporterError::config(format!("Failed to connect to PostgreSQL: {}", e)))?;
        let source = Arc::new(
            PostgresFailureLineSource::with_table(pool, &config.table)
                .map_err(|e| ImporterError::config(e.to_string()))?,
        );
        info!("PostgreSQL connection established");

        let provider = match OpenSearchProvider::new(&config.opensearch_url).await {
            Ok(provider) => provider,
            Err(e) => {
                source.close().await;
                return Err(ImporterError::config(format!(
                    "Failed to create OpenSearch provider: {}",
                    e
                )));
            }
        };

        let reindexer = ChunkedReindexer::new(
            source.clone(),
            Arc::new(provider),
            Arc::new(FixedDelay::from_secs(cli.sleep)),
            Arc::new(ConsoleReporter::new()),
            ReindexerConfig::new(index, chunk_size, cli.recreate),
        );

        Ok(Self { reindexer, source })
    }

    /// Release the database pool.
    pub async fn close(&self) {
        self.source.close().await;
        info!("PostgreSQL connections released");
    }
}
