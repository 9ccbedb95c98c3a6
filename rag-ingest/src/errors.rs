//! Error types for the ingestion pipeline.

use thiserror::Error;

use rag_embedding::EmbeddingError;
use rag_repository::VectorStoreError;

/// Errors that can occur during an ingestion run.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The notified object could not be fetched.
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// The triggering event could not be decoded.
    #[error("Event error: {0}")]
    EventError(String),

    /// A line of the record file could not be decoded.
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Index provisioning failed.
    #[error("Provisioning error: {0}")]
    ProvisionError(String),

    /// An embedding vector did not match the index dimension.
    #[error("Schema error: expected dimension {expected}, got {actual}")]
    SchemaError { expected: usize, actual: usize },

    /// Error from the embedding generator.
    #[error("Embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    /// Error from the vector store.
    #[error("Vector store error: {0}")]
    StoreError(#[from] VectorStoreError),

    /// IO error reading the local file.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IngestError {
    /// Create a fetch error.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::FetchError(msg.into())
    }

    /// Create an event error.
    pub fn event(msg: impl Into<String>) -> Self {
        Self::EventError(msg.into())
    }

    /// Create a parse error for the given 1-based line number.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create a provisioning error.
    pub fn provision(msg: impl Into<String>) -> Self {
        Self::ProvisionError(msg.into())
    }

    /// Create a schema error for a dimension mismatch.
    pub fn schema(expected: usize, actual: usize) -> Self {
        Self::SchemaError { expected, actual }
    }
}
