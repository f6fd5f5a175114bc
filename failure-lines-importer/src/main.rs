//! Failure Lines Importer Main Entry Point
//!
//! Populates the search index from the failure_line table. Progress lines
//! go to stdout; logs go to stderr.

use clap::Parser;
use dotenv::dotenv;
use failure_lines_importer::{Cli, Dependencies, ImportConfig, ImporterError, ReindexError};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("failure_lines_importer=info,failure_lines_repository=info")
    });

    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    info!(
        service_name = "failure-lines-importer",
        service_version = env!("CARGO_PKG_VERSION"),
        json = json,
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), ImporterError> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    init_tracing();

    info!("Starting failure line import");

    let config = ImportConfig::from_env().inspect_err(|e| {
        error!(error = %e, "Invalid configuration");
    })?;

    let mut deps = Dependencies::new(&cli, &config).await.inspect_err(|e| {
        error!(error = %e, "Failed to initialize dependencies");
    })?;

    // Ctrl-C stops the run at the next chunk boundary
    let shutdown = deps.reindexer.shutdown_handle();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal");
            let _ = shutdown.send(());
        }
    });

    let result = deps.reindexer.run().await;

    signal_task.abort();
    deps.close().await;

    match result {
        Ok(report) => {
            info!(
                batches = report.batches,
                documents_written = report.documents_written,
                final_count = report.final_count,
                interrupted = report.interrupted,
                "Failure line import completed"
            );
            Ok(())
        }
        Err(ReindexError::PreconditionConflict { index }) => {
            info!(index = %index, "Import skipped, index already exists");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Failure line import failed");
            Err(e.into())
        }
    }
}
