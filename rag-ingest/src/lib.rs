//! # RAG Ingest
//!
//! This crate provides the ingestion components for loading text records
//! into the vector index.
//!
//! ## Architecture
//!
//! The ingestion follows a Fetch-Parse-Embed-Load flow:
//!
//! 1. **Source**: Fetches the notified object to a transient local path
//! 2. **Records**: Parses the line-delimited record file
//! 3. **Loader**: Batches embedded documents and bulk-writes them
//! 4. **Orchestrator**: Provisions the index and coordinates a run

pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod records;
pub mod source;

pub use errors::IngestError;
pub use loader::{DocumentLoader, LoaderConfig};
pub use orchestrator::{IngestReport, IngestionConfig, IngestionOrchestrator};
pub use source::{LocalObjectStore, ObjectFetcher, ObjectRef};
