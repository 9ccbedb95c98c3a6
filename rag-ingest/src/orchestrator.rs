//! Orchestrator module for the ingestion pipeline.
//!
//! Coordinates the fetch, provisioning, parsing, embedding, and loading
//! steps of one ingestion run.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::errors::IngestError;
use crate::loader::{DocumentLoader, LoaderConfig};
use crate::records;
use crate::source::{ObjectFetcher, ObjectRef};
use rag_embedding::EmbeddingGenerator;
use rag_repository::{IndexSchema, VectorIndexStore};
use rag_shared::EmbeddingDocument;

/// Configuration for an ingestion run.
#[derive(Debug, Clone)]
pub struct IngestionConfig {
    /// Target index name.
    pub index: String,
    /// Schema the index is provisioned with.
    pub schema: IndexSchema,
    /// Loader batching/retry settings. The loader's dimension check always
    /// follows `schema.dimension`.
    pub loader: LoaderConfig,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            index: "rag".to_string(),
            schema: IndexSchema::default(),
            loader: LoaderConfig::default(),
        }
    }
}

/// Aggregate result of one ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    /// Number of records read from the input file.
    pub records: usize,
    /// Number of documents indexed successfully.
    pub indexed: usize,
    /// Number of documents that failed to index.
    pub failed: usize,
    /// Number of bulk writes performed.
    pub flushes: usize,
}

/// Orchestrator for one ingestion run.
///
/// Invoked once per arriving data object: provisions the target index if
/// absent, then streams records through embedding and chunked bulk writes
/// until the input is exhausted. Each run owns its accumulator and counters;
/// the orchestrator itself holds no cross-run state.
pub struct IngestionOrchestrator {
    fetcher: Arc<dyn ObjectFetcher>,
    embedder: Arc<dyn EmbeddingGenerator>,
    store: Arc<dyn VectorIndexStore>,
    config: IngestionConfig,
}

impl IngestionOrchestrator {
    /// Create an orchestrator with default configuration.
    pub fn new(
        fetcher: Arc<dyn ObjectFetcher>,
        embedder: Arc<dyn EmbeddingGenerator>,
        store: Arc<dyn VectorIndexStore>,
    ) -> Self {
        Self::with_config(fetcher, embedder, store, IngestionConfig::default())
    }

    /// Create an orchestrator with custom configuration.
    pub fn with_config(
        fetcher: Arc<dyn ObjectFetcher>,
        embedder: Arc<dyn EmbeddingGenerator>,
        store: Arc<dyn VectorIndexStore>,
        config: IngestionConfig,
    ) -> Self {
        Self {
            fetcher,
            embedder,
            store,
            config,
        }
    }

    /// Run one ingestion for the notified object.
    ///
    /// # Returns
    ///
    /// * `Ok(IngestReport)` - Aggregate success/failure counts for the run
    /// * `Err(IngestError)` - On the first fatal failure (fetch, provisioning,
    ///   parse, embedding, or an unrecoverable bulk write)
    #[instrument(skip(self, object), fields(bucket = %object.bucket, key = %object.key))]
    pub async fn run(&self, object: &ObjectRef) -> Result<IngestReport, IngestError> {
        info!(index = %self.config.index, "Starting ingestion run");

        let path = self.fetcher.fetch(object).await?;

        self.provision().await?;

        let all_records = records::read_records(&path).await?;
        info!(count = all_records.len(), "Records read from local file");

        let loader_config = LoaderConfig {
            dimension: self.config.schema.dimension,
            ..self.config.loader.clone()
        };
        let mut loader =
            DocumentLoader::with_config(self.store.clone(), &self.config.index, loader_config);

        for (i, record) in all_records.iter().enumerate() {
            let vector = self.embedder.embed(record.text()).await?;
            debug!(record = i, "Embedding created");

            loader
                .push(EmbeddingDocument::new(
                    &self.config.index,
                    record.text(),
                    vector,
                ))
                .await?;
        }

        // The last chunk is usually undersized; always write it out.
        loader.flush().await?;

        let report = IngestReport {
            records: all_records.len(),
            indexed: loader.indexed(),
            failed: loader.failed(),
            flushes: loader.flushes(),
        };

        info!(
            records = report.records,
            indexed = report.indexed,
            failed = report.failed,
            flushes = report.flushes,
            "Ingestion run finished"
        );

        Ok(report)
    }

    /// Ensure the target index exists with the configured schema.
    ///
    /// Provisioning is idempotent: when the index already exists, no
    /// creation or mapping call is made.
    pub async fn provision(&self) -> Result<(), IngestError> {
        let name = &self.config.index;

        if self.store.index_exists(name).await? {
            debug!(index = %name, "Index already exists");
            return Ok(());
        }

        info!(index = %name, "Creating index");
        let acknowledged = self.store.create_index(name, &self.config.schema).await?;
        if !acknowledged {
            // Without an acknowledged create the index may be schema-less;
            // mapping is not attempted and the run stops here.
            warn!(index = %name, "Index creation was not acknowledged, skipping mapping");
            return Err(IngestError::provision(format!(
                "creation of index {} was not acknowledged",
                name
            )));
        }

        info!(index = %name, "Creating index mapping");
        let mapped = self.store.put_mapping(name, &self.config.schema).await?;
        if !mapped {
            warn!(index = %name, "Index mapping was not acknowledged");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rag_embedding::EmbeddingError;
    use rag_repository::{BulkSummary, DeleteOutcome, VectorStoreError};
    use rag_shared::ScoredDocument;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Fetcher serving a fixed local file.
    struct FixedFileFetcher {
        path: PathBuf,
    }

    #[async_trait]
    impl ObjectFetcher for FixedFileFetcher {
        async fn fetch(&self, _object: &ObjectRef) -> Result<PathBuf, IngestError> {
            Ok(self.path.clone())
        }
    }

    /// Embedder returning a constant-dimension vector.
    struct FixedEmbedder {
        dimension: usize,
    }

    #[async_trait]
    impl EmbeddingGenerator for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Ok(vec![0.1; self.dimension])
        }
    }

    /// Mock store recording provisioning and bulk activity.
    struct MockStore {
        exists: bool,
        create_calls: AtomicUsize,
        mapping_calls: AtomicUsize,
        bulk_sizes: Mutex<Vec<usize>>,
        texts: Mutex<Vec<String>>,
        acknowledge_create: bool,
    }

    impl MockStore {
        fn new(exists: bool) -> Self {
            Self {
                exists,
                create_calls: AtomicUsize::new(0),
                mapping_calls: AtomicUsize::new(0),
                bulk_sizes: Mutex::new(Vec::new()),
                texts: Mutex::new(Vec::new()),
                acknowledge_create: true,
            }
        }

        fn unacknowledged(exists: bool) -> Self {
            let mut store = Self::new(exists);
            store.acknowledge_create = false;
            store
        }
    }

    #[async_trait]
    impl VectorIndexStore for MockStore {
        async fn index_exists(&self, _name: &str) -> Result<bool, VectorStoreError> {
            Ok(self.exists)
        }

        async fn create_index(
            &self,
            _name: &str,
            _schema: &IndexSchema,
        ) -> Result<bool, VectorStoreError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.acknowledge_create)
        }

        async fn put_mapping(
            &self,
            _name: &str,
            _schema: &IndexSchema,
        ) -> Result<bool, VectorStoreError> {
            self.mapping_calls.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }

        async fn bulk_index(
            &self,
            _name: &str,
            documents: &[EmbeddingDocument],
        ) -> Result<BulkSummary, VectorStoreError> {
            self.bulk_sizes.lock().unwrap().push(documents.len());
            self.texts
                .lock()
                .unwrap()
                .extend(documents.iter().map(|d| d.text.clone()));
            Ok(BulkSummary::all_succeeded(documents.len()))
        }

        async fn delete_index(&self, _name: &str) -> Result<DeleteOutcome, VectorStoreError> {
            Ok(DeleteOutcome::Deleted)
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

    fn test_object() -> ObjectRef {
        ObjectRef {
            bucket: "bucket".to_string(),
            key: "key".to_string(),
        }
    }

    fn orchestrator_for(
        contents: &str,
        store: Arc<MockStore>,
        flush_threshold: usize,
    ) -> (IngestionOrchestrator, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();

        let config = IngestionConfig {
            index: "rag".to_string(),
            schema: IndexSchema::with_dimension(4),
            loader: LoaderConfig {
                flush_threshold,
                dimension: 4,
                max_retries: 0,
                initial_retry_delay_ms: 1,
                max_retry_delay_ms: 1,
            },
        };

        let orchestrator = IngestionOrchestrator::with_config(
            Arc::new(FixedFileFetcher {
                path: file.path().to_path_buf(),
            }),
            Arc::new(FixedEmbedder { dimension: 4 }),
            store,
            config,
        );

        (orchestrator, file)
    }

    #[tokio::test]
    async fn test_run_embeds_and_loads_all_records() {
        let store = Arc::new(MockStore::new(true));
        let (orchestrator, _file) = orchestrator_for(
            "[\"q1\", \"a1\"]\n[\"q2\", \"a2\"]\n[\"q3\", \"a3\"]\n",
            store.clone(),
            2,
        );

        let report = orchestrator.run(&test_object()).await.unwrap();

        assert_eq!(
            report,
            IngestReport {
                records: 3,
                indexed: 3,
                failed: 0,
                flushes: 2,
            }
        );
        assert_eq!(store.bulk_sizes.lock().unwrap().clone(), vec![2, 1]);
        assert_eq!(
            store.texts.lock().unwrap().clone(),
            vec!["q1".to_string(), "q2".to_string(), "q3".to_string()]
        );
    }

    #[tokio::test]
    async fn test_empty_input_provisions_without_writing() {
        let store = Arc::new(MockStore::new(false));
        let (orchestrator, _file) = orchestrator_for("", store.clone(), 500);

        let report = orchestrator.run(&test_object()).await.unwrap();

        assert_eq!(report.records, 0);
        assert_eq!(report.flushes, 0);
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.mapping_calls.load(Ordering::SeqCst), 1);
        assert!(store.bulk_sizes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_provisioning_is_idempotent() {
        let store = Arc::new(MockStore::new(true));
        let (orchestrator, _file) = orchestrator_for("", store.clone(), 500);

        orchestrator.provision().await.unwrap();
        orchestrator.provision().await.unwrap();

        assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.mapping_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unacknowledged_create_skips_mapping() {
        let store = Arc::new(MockStore::unacknowledged(false));
        let (orchestrator, _file) = orchestrator_for("", store.clone(), 500);

        let result = orchestrator.provision().await;

        assert!(matches!(result, Err(IngestError::ProvisionError(_))));
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.mapping_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_line_aborts_run() {
        let store = Arc::new(MockStore::new(true));
        let (orchestrator, _file) =
            orchestrator_for("[\"ok\"]\n{broken\n", store.clone(), 500);

        let result = orchestrator.run(&test_object()).await;

        assert!(matches!(
            result,
            Err(IngestError::ParseError { line: 2, .. })
        ));
        assert!(store.bulk_sizes.lock().unwrap().is_empty());
    }
}
