//! Dependency initialization and wiring for the RAG pipeline.

use std::env;
use std::sync::Arc;

use tracing::info;

use crate::AppError;
use rag_embedding::client::DEFAULT_EMBEDDING_MODEL;
use rag_embedding::RemoteEmbeddingClient;
use rag_ingest::{IngestionConfig, IngestionOrchestrator, LocalObjectStore};
use rag_repository::{
    EnvSecretProvider, OpenSearchVectorStore, StaticEndpoint, StoreConfig, VectorIndexStore,
};
use rag_retrieve::completion::DEFAULT_COMPLETION_MODEL;
use rag_retrieve::{RemoteCompletionClient, RetrievalChain, RetrievalConfig};

/// Default cloud region.
const DEFAULT_REGION: &str = "us-east-1";

/// Default index name.
const DEFAULT_INDEX_NAME: &str = "rag";

/// Default index admin username.
const DEFAULT_USERNAME: &str = "osmaster";

/// Default root directory for locally synced objects.
const DEFAULT_DATA_ROOT: &str = "/tmp";

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured ingestion orchestrator.
    pub orchestrator: IngestionOrchestrator,
    /// The configured retrieval chain.
    pub chain: RetrievalChain,
    /// The vector store, for administrative operations.
    pub store: Arc<dyn VectorIndexStore>,
    /// The target index name.
    pub index: String,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AWS_REGION`: Cloud region (default: us-east-1)
    /// - `INDEX_NAME`: Target index name (default: rag)
    /// - `INDEX_USERNAME`: Index admin username (default: osmaster)
    /// - `INDEX_PASSWORD`: Index admin password (required)
    /// - `OPENSEARCH_ENDPOINT`: Cluster hostname (required)
    /// - `MODEL_ENDPOINT`: Embedding/completion service base URL (required)
    /// - `EMBEDDING_MODEL_ID`: Embedding model (default: amazon.titan-embed-text-v1)
    /// - `COMPLETION_MODEL_ID`: Completion model (default: anthropic.claude-3-sonnet)
    /// - `DATA_ROOT`: Root directory for locally synced objects (default: /tmp)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - If initialization fails
    pub async fn new() -> Result<Self, AppError> {
        let region = env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());
        let index = env::var("INDEX_NAME").unwrap_or_else(|_| DEFAULT_INDEX_NAME.to_string());
        let username =
            env::var("INDEX_USERNAME").unwrap_or_else(|_| DEFAULT_USERNAME.to_string());
        let endpoint = env::var("OPENSEARCH_ENDPOINT")
            .map_err(|_| AppError::config("OPENSEARCH_ENDPOINT is not set"))?;
        let model_endpoint = env::var("MODEL_ENDPOINT")
            .map_err(|_| AppError::config("MODEL_ENDPOINT is not set"))?;
        let embedding_model = env::var("EMBEDDING_MODEL_ID")
            .unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.to_string());
        let completion_model = env::var("COMPLETION_MODEL_ID")
            .unwrap_or_else(|_| DEFAULT_COMPLETION_MODEL.to_string());
        let data_root = env::var("DATA_ROOT").unwrap_or_else(|_| DEFAULT_DATA_ROOT.to_string());

        info!(
            region = %region,
            index = %index,
            endpoint = %endpoint,
            "Initializing dependencies"
        );

        let store_config = StoreConfig {
            name: index.clone(),
            region: region.clone(),
            username,
            ..StoreConfig::default()
        };
        let resolver = StaticEndpoint::new(endpoint);
        let secrets = EnvSecretProvider::new("INDEX_PASSWORD");

        let store: Arc<dyn VectorIndexStore> = Arc::new(
            OpenSearchVectorStore::connect(&store_config, &resolver, &secrets).await?,
        );

        let embedder = Arc::new(
            RemoteEmbeddingClient::new(&model_endpoint, embedding_model)
                .map_err(|e| AppError::config(e.to_string()))?,
        );
        let completion = Arc::new(
            RemoteCompletionClient::new(&model_endpoint, completion_model)
                .map_err(|e| AppError::config(e.to_string()))?,
        );

        let fetcher = Arc::new(LocalObjectStore::new(data_root));

        let orchestrator = IngestionOrchestrator::with_config(
            fetcher,
            embedder.clone(),
            store.clone(),
            IngestionConfig {
                index: index.clone(),
                ..IngestionConfig::default()
            },
        );

        let chain = RetrievalChain::with_config(
            embedder,
            store.clone(),
            completion,
            RetrievalConfig {
                index: index.clone(),
                ..RetrievalConfig::default()
            },
        );

        Ok(Self {
            orchestrator,
            chain,
            store,
            index,
        })
    }
}
