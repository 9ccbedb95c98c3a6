//! The retrieval chain: embed, search, synthesize.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::completion::CompletionModel;
use crate::errors::RetrieveError;
use crate::prompt;
use rag_embedding::EmbeddingGenerator;
use rag_repository::VectorIndexStore;

/// Configuration for the retrieval chain.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Index to retrieve from.
    pub index: String,
    /// Number of nearest neighbors to retrieve.
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            index: "rag".to_string(),
            top_k: 4,
        }
    }
}

/// Single-shot question answering over the vector index.
///
/// Composes the embedding generator, the vector store as a similarity
/// retriever, and a language-model completion. One request in, one answer
/// out; no iteration, no re-ranking, no multi-turn state.
pub struct RetrievalChain {
    embedder: Arc<dyn EmbeddingGenerator>,
    store: Arc<dyn VectorIndexStore>,
    model: Arc<dyn CompletionModel>,
    config: RetrievalConfig,
}

impl RetrievalChain {
    /// Create a chain with default configuration.
    pub fn new(
        embedder: Arc<dyn EmbeddingGenerator>,
        store: Arc<dyn VectorIndexStore>,
        model: Arc<dyn CompletionModel>,
    ) -> Self {
        Self::with_config(embedder, store, model, RetrievalConfig::default())
    }

    /// Create a chain with custom configuration.
    pub fn with_config(
        embedder: Arc<dyn EmbeddingGenerator>,
        store: Arc<dyn VectorIndexStore>,
        model: Arc<dyn CompletionModel>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            embedder,
            store,
            model,
            config,
        }
    }

    /// Answer a question using retrieved context.
    #[instrument(skip(self, question))]
    pub async fn answer(&self, question: &str) -> Result<String, RetrieveError> {
        let vector = self.embedder.embed(question).await?;

        let context = self
            .store
            .knn_search(&self.config.index, &vector, self.config.top_k)
            .await?;

        info!(
            index = %self.config.index,
            retrieved = context.len(),
            "Context retrieved for question"
        );

        let prompt = prompt::render(&context, question);
        self.model.complete(&prompt).await
    }
}
