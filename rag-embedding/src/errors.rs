//! Error types for embedding generation.

use thiserror::Error;

/// Errors that can occur while generating an embedding.
#[derive(Error, Debug, Clone)]
pub enum EmbeddingError {
    /// The request to the embedding service failed.
    #[error("Embedding request error: {0}")]
    RequestError(String),

    /// The service responded with a non-success status.
    #[error("Embedding service error: {0}")]
    ServiceError(String),

    /// The response body did not contain a usable embedding.
    #[error("Embedding response error: {0}")]
    ResponseError(String),
}

impl EmbeddingError {
    /// Create a request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::RequestError(msg.into())
    }

    /// Create a service error.
    pub fn service(msg: impl Into<String>) -> Self {
        Self::ServiceError(msg.into())
    }

    /// Create a response error.
    pub fn response(msg: impl Into<String>) -> Self {
        Self::ResponseError(msg.into())
    }
}
