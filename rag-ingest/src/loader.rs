//! Loader module for the ingestion pipeline.
//!
//! Batches embedded documents and bulk-writes them to the vector store in
//! bounded chunks, accumulating per-run success/failure totals.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::errors::IngestError;
use rag_repository::{VectorIndexStore, VectorStoreError};
use rag_shared::EmbeddingDocument;

/// Configuration for the document loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Number of documents to accumulate before flushing.
    pub flush_threshold: usize,
    /// Expected embedding dimension; documents with any other vector length
    /// are rejected before a network call is made.
    pub dimension: usize,
    /// Maximum number of retry attempts for a failed bulk write.
    pub max_retries: u32,
    /// Initial retry delay in milliseconds.
    pub initial_retry_delay_ms: u64,
    /// Maximum retry delay in milliseconds.
    pub max_retry_delay_ms: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            flush_threshold: 500,
            dimension: 1536,
            max_retries: 3,
            initial_retry_delay_ms: 100,
            max_retry_delay_ms: 5000,
        }
    }
}

/// Loader that bulk-writes documents into the vector index.
///
/// Documents are appended to an in-memory accumulator and flushed whenever
/// it reaches the configured threshold; callers flush once more after the
/// last record so the final partial chunk is always written. Every document
/// is flushed exactly once, in original order, in chunks no larger than the
/// threshold.
///
/// Per-document bulk failures are counted, not retried; only a
/// transport-level failure of a whole bulk call is retried with backoff.
pub struct DocumentLoader {
    store: Arc<dyn VectorIndexStore>,
    index: String,
    config: LoaderConfig,
    pending: Vec<EmbeddingDocument>,
    indexed: usize,
    failed: usize,
    flushes: usize,
}

impl DocumentLoader {
    /// Create a loader writing to the given index.
    pub fn new(store: Arc<dyn VectorIndexStore>, index: impl Into<String>) -> Self {
        Self::with_config(store, index, LoaderConfig::default())
    }

    /// Create a loader with custom configuration.
    pub fn with_config(
        store: Arc<dyn VectorIndexStore>,
        index: impl Into<String>,
        config: LoaderConfig,
    ) -> Self {
        let capacity = config.flush_threshold;
        Self {
            store,
            index: index.into(),
            config,
            pending: Vec::with_capacity(capacity),
            indexed: 0,
            failed: 0,
            flushes: 0,
        }
    }

    /// Append a document, flushing if the accumulator reaches the threshold.
    pub async fn push(&mut self, document: EmbeddingDocument) -> Result<(), IngestError> {
        if document.dimension() != self.config.dimension {
            return Err(IngestError::schema(
                self.config.dimension,
                document.dimension(),
            ));
        }

        self.pending.push(document);

        if self.pending.len() >= self.config.flush_threshold {
            self.flush().await?;
        }

        Ok(())
    }

    /// Flush all pending documents to the vector store.
    ///
    /// The accumulator is cleared regardless of outcome. Returned counts are
    /// folded into the running totals; a transport failure that survives all
    /// retries is fatal.
    pub async fn flush(&mut self) -> Result<(), IngestError> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let docs: Vec<EmbeddingDocument> = self.pending.drain(..).collect();
        let count = docs.len();

        debug!(index = %self.index, count, "Flushing documents to vector store");

        let summary = self.bulk_with_retry(&docs).await?;

        self.indexed += summary.succeeded;
        self.failed += summary.failed;
        self.flushes += 1;

        for error in &summary.errors {
            warn!(index = %self.index, error = %error, "Document failed to index");
        }

        info!(
            index = %self.index,
            saved = summary.succeeded,
            failed = summary.failed,
            "Bulk write completed"
        );

        Ok(())
    }

    /// Bulk-write documents with exponential backoff on transient failures.
    async fn bulk_with_retry(
        &self,
        docs: &[EmbeddingDocument],
    ) -> Result<rag_repository::BulkSummary, VectorStoreError> {
        let mut delay_ms = self.config.initial_retry_delay_ms;
        let mut last_error: Option<VectorStoreError> = None;

        for attempt in 0..=self.config.max_retries {
            match self.store.bulk_index(&self.index, docs).await {
                Ok(summary) => {
                    if attempt > 0 {
                        info!(attempt, count = docs.len(), "Bulk write succeeded after retry");
                    }
                    return Ok(summary);
                }
                Err(e) => {
                    let retryable = Self::is_retryable_error(&e);
                    last_error = Some(e.clone());

                    if !retryable {
                        debug!(error = %e, "Non-retryable bulk error");
                        return Err(e);
                    }

                    // Don't wait after the last attempt.
                    if attempt < self.config.max_retries {
                        warn!(
                            attempt = attempt + 1,
                            max_retries = self.config.max_retries,
                            delay_ms,
                            error = %e,
                            "Bulk write failed, retrying"
                        );

                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                        delay_ms = std::cmp::min(delay_ms * 2, self.config.max_retry_delay_ms);
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| VectorStoreError::bulk("Unknown error after retries")))
    }

    /// Determine whether a bulk error is a transient failure worth retrying.
    fn is_retryable_error(error: &VectorStoreError) -> bool {
        match error {
            VectorStoreError::ConnectionError(_) => true,
            VectorStoreError::BulkWriteError(msg) => {
                let msg_lower = msg.to_lowercase();
                msg_lower.contains("timeout")
                    || msg_lower.contains("connection")
                    || msg_lower.contains("503")
                    || msg_lower.contains("429")
            }
            _ => false,
        }
    }

    /// Number of documents indexed successfully so far.
    pub fn indexed(&self) -> usize {
        self.indexed
    }

    /// Number of documents that failed to index so far.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Number of bulk writes performed so far.
    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rag_repository::{BulkSummary, DeleteOutcome, IndexSchema};
    use rag_shared::ScoredDocument;
    use std::sync::Mutex;

    /// Mock vector store recording bulk calls.
    struct MockStore {
        /// Sizes of each received bulk call.
        bulk_sizes: Mutex<Vec<usize>>,
        /// Texts of every received document, in arrival order.
        texts: Mutex<Vec<String>>,
        /// Failures to report in the next bulk summary.
        failures_next_call: Mutex<usize>,
        /// Transport errors to raise before succeeding.
        transport_errors: Mutex<u32>,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                bulk_sizes: Mutex::new(Vec::new()),
                texts: Mutex::new(Vec::new()),
                failures_next_call: Mutex::new(0),
                transport_errors: Mutex::new(0),
            }
        }

        fn with_transport_errors(count: u32) -> Self {
            let store = Self::new();
            *store.transport_errors.lock().unwrap() = count;
            store
        }
    }

    #[async_trait]
    impl VectorIndexStore for MockStore {
        async fn index_exists(&self, _name: &str) -> Result<bool, VectorStoreError> {
            Ok(true)
        }

        async fn create_index(
            &self,
            _name: &str,
            _schema: &IndexSchema,
        ) -> Result<bool, VectorStoreError> {
            Ok(true)
        }

        async fn put_mapping(
            &self,
            _name: &str,
            _schema: &IndexSchema,
        ) -> Result<bool, VectorStoreError> {
            Ok(true)
        }

        async fn bulk_index(
            &self,
            _name: &str,
            documents: &[EmbeddingDocument],
        ) -> Result<BulkSummary, VectorStoreError> {
            {
                let mut remaining = self.transport_errors.lock().unwrap();
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(VectorStoreError::connection("connection refused"));
                }
            }

            self.bulk_sizes.lock().unwrap().push(documents.len());
            self.texts
                .lock()
                .unwrap()
                .extend(documents.iter().map(|d| d.text.clone()));

            let failed = std::mem::take(&mut *self.failures_next_call.lock().unwrap());
            Ok(BulkSummary {
                succeeded: documents.len() - failed,
                failed,
                errors: vec!["rejected".to_string(); failed],
            })
        }

        async fn delete_index(&self, _name: &str) -> Result<DeleteOutcome, VectorStoreError> {
            Ok(DeleteOutcome::NotFound)
        }

        async fn knn_search(
            &self,
            _name: &str,
            _vector: &[f32],
            _k: usize,
        ) -> Result<Vec<ScoredDocument>, VectorStoreError> {
            Ok(vec![])
        }
    }

    fn doc(text: &str, dimension: usize) -> EmbeddingDocument {
        EmbeddingDocument::new("rag", text, vec![0.5; dimension])
    }

    fn test_config(flush_threshold: usize, dimension: usize) -> LoaderConfig {
        LoaderConfig {
            flush_threshold,
            dimension,
            max_retries: 3,
            initial_retry_delay_ms: 1,
            max_retry_delay_ms: 10,
        }
    }

    #[tokio::test]
    async fn test_chunking_1001_records_threshold_500() {
        let store = Arc::new(MockStore::new());
        let mut loader = DocumentLoader::with_config(store.clone(), "rag", test_config(500, 4));

        for i in 0..1001 {
            loader.push(doc(&format!("record {}", i), 4)).await.unwrap();
        }
        loader.flush().await.unwrap();

        let sizes = store.bulk_sizes.lock().unwrap().clone();
        assert_eq!(sizes, vec![500, 500, 1]);
        assert_eq!(loader.indexed(), 1001);
        assert_eq!(loader.failed(), 0);
        assert_eq!(loader.flushes(), 3);
    }

    #[tokio::test]
    async fn test_order_preserved_across_flushes() {
        let store = Arc::new(MockStore::new());
        let mut loader = DocumentLoader::with_config(store.clone(), "rag", test_config(2, 4));

        for i in 0..5 {
            loader.push(doc(&format!("record {}", i), 4)).await.unwrap();
        }
        loader.flush().await.unwrap();

        let texts = store.texts.lock().unwrap().clone();
        let expected: Vec<String> = (0..5).map(|i| format!("record {}", i)).collect();
        assert_eq!(texts, expected);
    }

    #[tokio::test]
    async fn test_empty_flush_is_a_no_op() {
        let store = Arc::new(MockStore::new());
        let mut loader = DocumentLoader::with_config(store.clone(), "rag", test_config(500, 4));

        loader.flush().await.unwrap();

        assert!(store.bulk_sizes.lock().unwrap().is_empty());
        assert_eq!(loader.flushes(), 0);
    }

    #[tokio::test]
    async fn test_partial_failures_counted_run_continues() {
        let store = Arc::new(MockStore::new());
        let mut loader = DocumentLoader::with_config(store.clone(), "rag", test_config(500, 4));

        *store.failures_next_call.lock().unwrap() = 3;

        for i in 0..500 {
            loader.push(doc(&format!("record {}", i), 4)).await.unwrap();
        }

        // The chunk flushed despite failures; the next chunk still loads.
        loader.push(doc("next chunk", 4)).await.unwrap();
        loader.flush().await.unwrap();

        assert_eq!(loader.failed(), 3);
        assert_eq!(loader.indexed(), 498);
        assert_eq!(store.bulk_sizes.lock().unwrap().clone(), vec![500, 1]);
    }

    #[tokio::test]
    async fn test_dimension_mismatch_rejected_before_write() {
        let store = Arc::new(MockStore::new());
        let mut loader = DocumentLoader::with_config(store.clone(), "rag", test_config(1, 4));

        let result = loader.push(doc("wrong dimension", 3)).await;

        assert!(matches!(
            result,
            Err(IngestError::SchemaError {
                expected: 4,
                actual: 3
            })
        ));
        assert!(store.bulk_sizes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transient_bulk_failure_retried() {
        let store = Arc::new(MockStore::with_transport_errors(2));
        let mut loader = DocumentLoader::with_config(store.clone(), "rag", test_config(500, 4));

        loader.push(doc("retry me", 4)).await.unwrap();
        loader.flush().await.unwrap();

        assert_eq!(store.bulk_sizes.lock().unwrap().clone(), vec![1]);
        assert_eq!(loader.indexed(), 1);
    }

    #[tokio::test]
    async fn test_exhausted_retries_are_fatal() {
        let store = Arc::new(MockStore::with_transport_errors(10));
        let mut loader = DocumentLoader::with_config(store.clone(), "rag", test_config(500, 4));

        loader.push(doc("doomed", 4)).await.unwrap();
        let result = loader.flush().await;

        assert!(matches!(result, Err(IngestError::StoreError(_))));
    }
}
