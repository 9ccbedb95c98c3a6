//! OpenSearch implementation of the vector index store.
//!
//! This module provides a concrete implementation of `VectorIndexStore`
//! using OpenSearch as the backend.

mod client;
mod index_config;
mod queries;

pub use client::OpenSearchVectorStore;
pub use index_config::IndexSchema;
