//! # Failure Lines Importer
//!
//! Rebuilds the test failure line search index from the relational store.
//! Run it when the search service is first provisioned, or with `--recreate`
//! whenever the index has to be rebuilt from scratch.
//!
//! ## Architecture
//!
//! The importer is a single sequential pipeline:
//!
//! 1. **Source**: pages through eligible failure lines in `id` order
//! 2. **Mapper**: turns each failure line into an index document
//! 3. **Provider**: bulk writes each page to the search index
//! 4. **Pacer**: pauses between batches to limit write pressure
//! 5. **Reindexer**: decides what to do with an existing index and drives
//!    the loop above until the source is exhausted
//!
//! ## Modules
//!
//! - [`config`]: Command line, environment, and dependency wiring
//! - [`mapper`]: Failure line to document transformation
//! - [`pacing`]: Throttling between batches
//! - [`progress`]: Progress observations
//! - [`reindexer`]: The chunked reindex state machine
//! - [`errors`]: Error types for the reindex run

pub mod config;
pub mod errors;
pub mod mapper;
pub mod pacing;
pub mod progress;
pub mod reindexer;

pub use config::{Cli, Dependencies, ImportConfig};
pub use errors::{MappingError, ReindexError};
pub use reindexer::{ChunkedReindexer, ReindexReport, ReindexState, ReindexerConfig};

use thiserror::Error;

/// Errors that can occur during importer initialization or execution.
#[derive(Error, Debug)]
pub enum ImporterError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Reindex error.
    #[error("Reindex error: {0}")]
    ReindexError(#[from] ReindexError),
}

impl ImporterError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
