//! Error types for the RAG repository.

mod vector_store_error;

pub use vector_store_error::VectorStoreError;
