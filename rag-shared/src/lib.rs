//! # RAG Shared
//!
//! Shared types and data structures used across the RAG pipeline crates.

use serde::{Deserialize, Serialize};

/// A document written to the vector index.
///
/// This is the unit of bulk ingestion: the original source text plus its
/// embedding vector, destined for the named index. The vector length must
/// match the dimension the target index was created with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingDocument {
    /// Target index name.
    pub index: String,
    /// Original source text.
    pub text: String,
    /// Embedding vector for the text.
    pub vector_field: Vec<f32>,
}

impl EmbeddingDocument {
    /// Create a new embedding document for the given index.
    pub fn new(index: impl Into<String>, text: impl Into<String>, vector_field: Vec<f32>) -> Self {
        Self {
            index: index.into(),
            text: text.into(),
            vector_field,
        }
    }

    /// The dimension of this document's embedding vector.
    pub fn dimension(&self) -> usize {
        self.vector_field.len()
    }
}

/// A document returned from a nearest-neighbor search, with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredDocument {
    /// The stored source text.
    pub text: String,
    /// Relevance score assigned by the search engine.
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_document_dimension() {
        let doc = EmbeddingDocument::new("rag", "hello", vec![0.1, 0.2, 0.3]);

        assert_eq!(doc.index, "rag");
        assert_eq!(doc.text, "hello");
        assert_eq!(doc.dimension(), 3);
    }
}
