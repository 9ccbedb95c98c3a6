//! OpenSearch index settings and mappings for the vector index.
//!
//! The index is created with k-NN enabled under cosine similarity, and its
//! mapping declares `vector_field` as a fixed-dimension dense vector and
//! `text` as a keyword field for exact retrieval of the source text.

use serde_json::{json, Value};

/// Default embedding dimension (the reference embedding model produces 1536).
pub const DEFAULT_DIMENSION: usize = 1536;

/// Schema settings for the vector index.
///
/// The dimension must match the length of every embedding vector written to
/// the index; the similarity space is cosine and is fixed at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSchema {
    /// Vector dimension declared on `vector_field`.
    pub dimension: usize,
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
        }
    }
}

impl IndexSchema {
    /// Create a schema with a custom vector dimension.
    pub fn with_dimension(dimension: usize) -> Self {
        Self { dimension }
    }

    /// Index settings body: k-NN enabled, cosine similarity space.
    pub fn settings(&self) -> Value {
        json!({
            "settings": {
                "index": {
                    "knn": true,
                    "knn.space_type": "cosinesimil"
                }
            }
        })
    }

    /// Field mapping body: fixed-dimension `knn_vector` plus keyword text.
    pub fn mapping(&self) -> Value {
        json!({
            "properties": {
                "vector_field": {
                    "type": "knn_vector",
                    "dimension": self.dimension
                },
                "text": {
                    "type": "keyword"
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_enable_knn_with_cosine() {
        let settings = IndexSchema::default().settings();

        assert_eq!(settings["settings"]["index"]["knn"], true);
        assert_eq!(settings["settings"]["index"]["knn.space_type"], "cosinesimil");
    }

    #[test]
    fn test_mapping_structure() {
        let mapping = IndexSchema::default().mapping();

        assert_eq!(mapping["properties"]["vector_field"]["type"], "knn_vector");
        assert_eq!(
            mapping["properties"]["vector_field"]["dimension"],
            DEFAULT_DIMENSION
        );
        assert_eq!(mapping["properties"]["text"]["type"], "keyword");
    }

    #[test]
    fn test_custom_dimension() {
        let mapping = IndexSchema::with_dimension(384).mapping();
        assert_eq!(mapping["properties"]["vector_field"]["dimension"], 384);
    }
}
