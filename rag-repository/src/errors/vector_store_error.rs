//! Vector store error types.
//!
//! This module defines the error types that can occur during vector store operations.

use thiserror::Error;

/// Errors that can occur during vector store operations.
#[derive(Error, Debug, Clone)]
pub enum VectorStoreError {
    /// Failed to establish connection to the cluster.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to resolve the cluster endpoint.
    #[error("Endpoint resolution error: {0}")]
    EndpointError(String),

    /// Failed to resolve a credential.
    #[error("Credential error: {0}")]
    CredentialError(String),

    /// Failed to create the index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to set the index mapping.
    #[error("Mapping error: {0}")]
    MappingError(String),

    /// Bulk write operation failed entirely.
    #[error("Bulk write error: {0}")]
    BulkWriteError(String),

    /// Failed to delete the index.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// Nearest-neighbor search failed.
    #[error("Search error: {0}")]
    SearchError(String),

    /// Failed to parse a response from the cluster.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl VectorStoreError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an endpoint resolution error.
    pub fn endpoint(msg: impl Into<String>) -> Self {
        Self::EndpointError(msg.into())
    }

    /// Create a credential error.
    pub fn credential(msg: impl Into<String>) -> Self {
        Self::CredentialError(msg.into())
    }

    /// Create an index creation error.
    pub fn creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a mapping error.
    pub fn mapping(msg: impl Into<String>) -> Self {
        Self::MappingError(msg.into())
    }

    /// Create a bulk write error.
    pub fn bulk(msg: impl Into<String>) -> Self {
        Self::BulkWriteError(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create a search error.
    pub fn search(msg: impl Into<String>) -> Self {
        Self::SearchError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
