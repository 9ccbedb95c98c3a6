//! Embedding generator trait definition.

use async_trait::async_trait;

use crate::errors::EmbeddingError;

/// Produces a fixed-dimension numeric vector for a piece of text.
///
/// The embedding model is a remote single-shot call with no internal state;
/// implementations are injected so the ingestion and retrieval orchestrators
/// can be tested with deterministic stand-ins.
#[async_trait]
pub trait EmbeddingGenerator: Send + Sync {
    /// Generate the embedding vector for the given text.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<f32>)` - The embedding vector
    /// * `Err(EmbeddingError)` - If the remote call or response parsing fails
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}
