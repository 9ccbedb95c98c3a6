//! Error types for the retrieval path.

use thiserror::Error;

use rag_embedding::EmbeddingError;
use rag_repository::VectorStoreError;

/// Errors that can occur while answering a question.
#[derive(Error, Debug)]
pub enum RetrieveError {
    /// Failed to embed the question.
    #[error("Embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    /// Failed to search the vector index.
    #[error("Vector store error: {0}")]
    StoreError(#[from] VectorStoreError),

    /// The completion request failed.
    #[error("Completion request error: {0}")]
    RequestError(String),

    /// The completion service responded with a non-success status.
    #[error("Completion service error: {0}")]
    ServiceError(String),

    /// The completion response did not contain an answer.
    #[error("Completion response error: {0}")]
    ResponseError(String),
}

impl RetrieveError {
    /// Create a completion request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::RequestError(msg.into())
    }

    /// Create a completion service error.
    pub fn service(msg: impl Into<String>) -> Self {
        Self::ServiceError(msg.into())
    }

    /// Create a completion response error.
    pub fn response(msg: impl Into<String>) -> Self {
        Self::ResponseError(msg.into())
    }
}
