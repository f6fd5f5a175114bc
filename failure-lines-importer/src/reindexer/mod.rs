//! Chunked reindexer for the failure line importer.
//!
//! Coordinates the record source, mapper, search index provider, and pacer
//! through one strictly sequential run.

mod chunks;

pub use chunks::chunk_bounds;

use std::num::NonZeroU64;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{debug, info, instrument, warn};

use crate::errors::ReindexError;
use crate::mapper::FailureLineMapper;
use crate::pacing::Pacer;
use crate::progress::ProgressReporter;
use failure_lines_repository::{RecordSource, SearchIndexProvider};

/// Default number of records per page and per bulk request.
pub const DEFAULT_CHUNK_SIZE: u64 = 10_000;

/// Configuration for one reindex run.
#[derive(Debug, Clone)]
pub struct ReindexerConfig {
    /// Versioned name of the target index.
    pub index: String,
    /// Page size for both the fetch and the bulk write.
    pub chunk_size: NonZeroU64,
    /// Delete and recreate the index before importing.
    pub recreate: bool,
}

impl ReindexerConfig {
    pub fn new(index: impl Into<String>, chunk_size: NonZeroU64, recreate: bool) -> Self {
        Self {
            index: index.into(),
            chunk_size,
            recreate,
        }
    }
}

/// Lifecycle of a reindex run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReindexState {
    /// Nothing has been done yet.
    Init,
    /// The index disposition has been settled.
    Prepared,
    /// Pages are being copied into the index.
    Paging,
    /// The loop ended and the final count was reported.
    Done,
    /// The run stopped on a precondition conflict or a fatal error.
    Aborted,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReindexReport {
    /// Eligible records counted before paging started.
    pub total_records: u64,
    /// Number of bulk writes issued.
    pub batches: u64,
    /// Number of documents submitted across all batches.
    pub documents_written: u64,
    /// Document count the index reported at the end.
    pub final_count: u64,
    /// Whether a shutdown request stopped the run at a chunk boundary.
    pub interrupted: bool,
}

/// Rebuilds the search index from the record source in throttled chunks.
///
/// The reindexer:
/// - Refuses to touch an existing index unless recreation was requested
/// - Fetches, maps, and writes one chunk at a time, in `id` order
/// - Pauses after every batch
/// - Reports the index's document count once paging ends
pub struct ChunkedReindexer {
    source: Arc<dyn RecordSource>,
    provider: Arc<dyn SearchIndexProvider>,
    mapper: FailureLineMapper,
    pacer: Arc<dyn Pacer>,
    reporter: Arc<dyn ProgressReporter>,
    config: ReindexerConfig,
    state: ReindexState,
    shutdown_tx: broadcast::Sender<()>,
    shutdown_rx: broadcast::Receiver<()>,
}

impl ChunkedReindexer {
    /// Create a new reindexer with the given components.
    pub fn new(
        source: Arc<dyn RecordSource>,
        provider: Arc<dyn SearchIndexProvider>,
        pacer: Arc<dyn Pacer>,
        reporter: Arc<dyn ProgressReporter>,
        config: ReindexerConfig,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        Self {
            source,
            provider,
            mapper: FailureLineMapper::new(),
            pacer,
            reporter,
            config,
            state: ReindexState::Init,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ReindexState {
        self.state
    }

    /// A sender that requests a graceful stop.
    ///
    /// The request is honoured before the next chunk starts; a batch in
    /// flight and the pause after it always complete.
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Request a graceful stop.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Run the import to completion.
    ///
    /// # Returns
    ///
    /// * `Ok(ReindexReport)` - Paging ended and the final count was reported
    /// * `Err(ReindexError::PreconditionConflict)` - The index already existed; nothing was written
    /// * `Err(ReindexError)` - A fatal error; batches written so far remain in the index
    #[instrument(skip(self), fields(index = %self.config.index, chunk_size = self.config.chunk_size.get(), recreate = self.config.recreate))]
    pub async fn run(&mut self) -> Result<ReindexReport, ReindexError> {
        let result = self.execute().await;
        if result.is_err() {
            self.state = ReindexState::Aborted;
        }
        result
    }

    async fn execute(&mut self) -> Result<ReindexReport, ReindexError> {
        self.prepare_index().await?;
        self.state = ReindexState::Prepared;

        let report = self.copy_chunks().await?;

        self.state = ReindexState::Done;
        Ok(report)
    }

    /// Settle what happens to a pre-existing index.
    async fn prepare_index(&self) -> Result<(), ReindexError> {
        let index = &self.config.index;

        if self.config.recreate {
            info!(index = %index, "Recreating index");
            self.provider
                .delete_index(index)
                .await
                .map_err(ReindexError::IndexAdministration)?;
            self.provider
                .create_index(index)
                .await
                .map_err(ReindexError::IndexAdministration)?;
            return Ok(());
        }

        let exists = self
            .provider
            .index_exists(index)
            .await
            .map_err(ReindexError::IndexAdministration)?;

        if exists {
            warn!(index = %index, "Index already exists; refusing to import");
            self.reporter.index_already_exists(index);
            return Err(ReindexError::PreconditionConflict {
                index: index.clone(),
            });
        }

        // Without --recreate the index is expected to be provisioned empty
        // out of band.
        debug!(index = %index, "Index absent, importing without creating it");
        Ok(())
    }

    async fn copy_chunks(&mut self) -> Result<ReindexReport, ReindexError> {
        let total = self.source.count().await?;
        info!(total_records = total, "Counted eligible failure lines");

        self.state = ReindexState::Paging;
        let mut report = ReindexReport {
            total_records: total,
            ..Default::default()
        };

        for (offset, limit) in chunk_bounds(total, self.config.chunk_size) {
            if self.shutdown_requested() {
                warn!(offset = offset, "Shutdown requested, stopping at chunk boundary");
                report.interrupted = true;
                break;
            }

            let page = self.source.fetch_page(offset, limit).await?;
            if page.is_empty() {
                // The source shrank after it was counted.
                info!(offset = offset, "Source exhausted early");
                break;
            }

            let documents = self.mapper.map_page(&page)?;
            self.provider
                .bulk_index_documents(&self.config.index, &documents)
                .await
                .map_err(ReindexError::BulkWriteFailure)?;

            report.batches += 1;
            report.documents_written += documents.len() as u64;
            self.reporter.batch_written(documents.len());
            debug!(
                offset = offset,
                batch_size = documents.len(),
                documents_written = report.documents_written,
                "Batch written"
            );

            self.pacer.pause().await;
        }

        let final_count = self
            .provider
            .count_documents(&self.config.index)
            .await
            .map_err(ReindexError::IndexAdministration)?;
        report.final_count = final_count;
        self.reporter.finished(final_count);

        if final_count != report.documents_written {
            warn!(
                documents_written = report.documents_written,
                final_count = final_count,
                "Index count differs from documents written"
            );
        }

        info!(
            batches = report.batches,
            documents_written = report.documents_written,
            final_count = final_count,
            interrupted = report.interrupted,
            "Reindex complete"
        );
        Ok(report)
    }

    fn shutdown_requested(&mut self) -> bool {
        match self.shutdown_rx.try_recv() {
            Ok(()) | Err(TryRecvError::Lagged(_)) => true,
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => false,
        }
    }
}
