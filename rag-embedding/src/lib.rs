//! # RAG Embedding
//!
//! This crate defines the `EmbeddingGenerator` capability and a client for
//! a remote text-embedding model. The model itself is an opaque external
//! service; the client only handles the JSON wire contract.

pub mod client;
pub mod errors;
pub mod generator;

pub use client::RemoteEmbeddingClient;
pub use errors::EmbeddingError;
pub use generator::EmbeddingGenerator;
