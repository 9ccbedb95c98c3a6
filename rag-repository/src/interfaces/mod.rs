//! Interface definitions for the vector store and its external collaborators.
//!
//! This module defines the abstract `VectorIndexStore` trait that allows
//! for dependency injection and swappable search backend implementations,
//! plus the single-method capability traits for endpoint and secret lookup.

mod collaborators;
mod vector_index_store;

pub use collaborators::{EndpointResolver, EnvSecretProvider, SecretProvider, StaticEndpoint};
pub use vector_index_store::VectorIndexStore;
