//! CLI argument parsing for the importer.

use clap::Parser;

use crate::reindexer::DEFAULT_CHUNK_SIZE;

/// Populate the search index with data from the failure_line table.
///
/// Must be run when the search service is first set up, so that existing
/// failure lines are considered for matching.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "failure-lines-importer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Delete and recreate the index
    #[arg(long)]
    pub recreate: bool,

    /// Chunk size to use for select/insert
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, value_parser = clap::value_parser!(u64).range(1..))]
    pub chunk_size: u64,

    /// Seconds to sleep between batches
    #[arg(long, default_value_t = 1)]
    pub sleep: u64,
}
