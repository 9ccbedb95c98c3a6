//! # RAG Repository
//!
//! This crate provides traits and implementations for interacting with the
//! vector index. It includes definitions for errors, interfaces, and a
//! concrete implementation for OpenSearch.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use config::StoreConfig;
pub use errors::VectorStoreError;
pub use interfaces::{
    EndpointResolver, EnvSecretProvider, SecretProvider, StaticEndpoint, VectorIndexStore,
};
pub use opensearch::{IndexSchema, OpenSearchVectorStore};
pub use types::{BulkSummary, DeleteOutcome};
