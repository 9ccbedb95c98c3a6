//! # RAG Retrieve
//!
//! This crate composes the embedding generator, the vector store, and a
//! language-model completion into single-shot question answering: embed the
//! question, retrieve nearest neighbors, and synthesize an answer.

pub mod chain;
pub mod completion;
pub mod errors;
pub mod prompt;

pub use chain::{RetrievalChain, RetrievalConfig};
pub use completion::{CompletionModel, RemoteCompletionClient};
pub use errors::RetrieveError;
