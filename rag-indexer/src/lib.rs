//! # RAG Indexer
//!
//! Main library for the RAG pipeline binary.
//!
//! This crate provides the entry point and configuration for running
//! ingestion and retrieval against the vector index.

pub mod config;

pub use config::Dependencies;

use thiserror::Error;

/// Errors that can occur during startup or execution of the binary.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Ingestion error.
    #[error("Ingestion error: {0}")]
    IngestError(#[from] rag_ingest::IngestError),

    /// Retrieval error.
    #[error("Retrieval error: {0}")]
    RetrieveError(#[from] rag_retrieve::RetrieveError),

    /// Vector store error.
    #[error("Vector store error: {0}")]
    StoreError(#[from] rag_repository::VectorStoreError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
