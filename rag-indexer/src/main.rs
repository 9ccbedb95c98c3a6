//! Binary entry point for the RAG pipeline.
//!
//! Subcommands:
//!
//! - `ingest <event.json>`: run one ingestion for an object notification
//! - `ask <question>`: answer a question against the index
//! - `drop-index`: delete the index (idempotent)

use std::env;
use std::process;

use tracing::{error, info};

use rag_indexer::{AppError, Dependencies};
use rag_ingest::source::ObjectCreatedNotification;
use rag_repository::DeleteOutcome;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let result = match (args.get(1).map(String::as_str), args.get(2)) {
        (Some("ingest"), Some(event_path)) => run_ingest(event_path).await,
        (Some("ask"), Some(question)) => run_ask(question).await,
        (Some("drop-index"), None) => run_drop_index().await,
        _ => {
            eprintln!("Usage: rag-indexer ingest <event.json> | ask <question> | drop-index");
            process::exit(2);
        }
    };

    if let Err(e) = result {
        error!(error = %e, "Command failed");
        process::exit(1);
    }
}

/// Run one ingestion for the notification in the given file.
async fn run_ingest(event_path: &str) -> Result<(), AppError> {
    let event_json = tokio::fs::read_to_string(event_path).await?;
    let notification = ObjectCreatedNotification::from_json(&event_json)
        .map_err(AppError::IngestError)?;
    let object = notification.object().map_err(AppError::IngestError)?;

    let deps = Dependencies::new().await?;
    let report = deps.orchestrator.run(&object).await?;

    info!(
        records = report.records,
        indexed = report.indexed,
        failed = report.failed,
        "Ingestion complete"
    );
    Ok(())
}

/// Answer a question against the index.
async fn run_ask(question: &str) -> Result<(), AppError> {
    let deps = Dependencies::new().await?;
    let answer = deps.chain.answer(question).await?;

    println!("{}", answer);
    Ok(())
}

/// Delete the index. A missing index is treated as success.
async fn run_drop_index() -> Result<(), AppError> {
    let deps = Dependencies::new().await?;

    match deps.store.delete_index(&deps.index).await? {
        DeleteOutcome::Deleted => info!(index = %deps.index, "Index deleted"),
        DeleteOutcome::NotFound => info!(index = %deps.index, "Index not found, nothing to delete"),
    }
    Ok(())
}
