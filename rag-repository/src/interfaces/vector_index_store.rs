//! Vector index store trait definition.
//!
//! This module defines the abstract interface for vector index operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;

use crate::errors::VectorStoreError;
use crate::opensearch::IndexSchema;
use crate::types::{BulkSummary, DeleteOutcome};
use rag_shared::{EmbeddingDocument, ScoredDocument};

/// Abstracts the underlying vector index implementation.
///
/// This trait defines the interface for all vector store backend implementations.
/// Implementations are injected into the ingestion and retrieval orchestrators
/// to enable dependency injection and easy testing with mock implementations.
///
/// All methods return `Result<T, VectorStoreError>` for consistent error handling
/// across different backend implementations.
#[async_trait]
pub trait VectorIndexStore: Send + Sync {
    /// Check whether the named index exists on the cluster.
    ///
    /// This is a pure query with no side effects.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The index exists
    /// * `Ok(false)` - The index does not exist
    /// * `Err(VectorStoreError)` - If the check fails to execute
    async fn index_exists(&self, name: &str) -> Result<bool, VectorStoreError>;

    /// Create the named index with k-NN settings from the given schema.
    ///
    /// Callers should only invoke this when `index_exists` returned false;
    /// repeated ingestion runs against an already-provisioned index never
    /// attempt re-creation.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The cluster acknowledged the creation
    /// * `Ok(false)` - The cluster did not acknowledge
    /// * `Err(VectorStoreError)` - If the request fails
    async fn create_index(&self, name: &str, schema: &IndexSchema)
        -> Result<bool, VectorStoreError>;

    /// Set the field mapping on the named index.
    ///
    /// Declares `vector_field` as a fixed-dimension dense vector and `text`
    /// as a keyword field. Must be called immediately after a successful
    /// `create_index`.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The cluster acknowledged the mapping
    /// * `Ok(false)` - The cluster did not acknowledge
    /// * `Err(VectorStoreError)` - If the request fails
    async fn put_mapping(&self, name: &str, schema: &IndexSchema)
        -> Result<bool, VectorStoreError>;

    /// Write multiple documents to the named index in a single bulk call.
    ///
    /// Per-document failures are reported in the summary, not raised; only
    /// a transport-level failure of the whole call returns an error.
    ///
    /// # Returns
    ///
    /// * `Ok(BulkSummary)` - Per-document success/failure split
    /// * `Err(VectorStoreError)` - If the bulk call fails entirely
    async fn bulk_index(
        &self,
        name: &str,
        documents: &[EmbeddingDocument],
    ) -> Result<BulkSummary, VectorStoreError>;

    /// Delete the named index.
    ///
    /// Deletion is idempotent: a missing index yields `DeleteOutcome::NotFound`,
    /// which is success. This is a separate administrative operation, not part
    /// of normal ingestion.
    ///
    /// # Returns
    ///
    /// * `Ok(DeleteOutcome)` - Whether the index was deleted or absent
    /// * `Err(VectorStoreError)` - If a real failure occurred
    async fn delete_index(&self, name: &str) -> Result<DeleteOutcome, VectorStoreError>;

    /// Retrieve the `k` nearest neighbors of the given vector from the named index.
    ///
    /// Uses the similarity space the index was created with (cosine).
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ScoredDocument>)` - Matching documents ordered by relevance
    /// * `Err(VectorStoreError)` - If the search fails
    async fn knn_search(
        &self,
        name: &str,
        vector: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredDocument>, VectorStoreError>;
}
