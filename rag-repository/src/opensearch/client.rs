//! OpenSearch vector store implementation.
//!
//! This module provides the concrete implementation of `VectorIndexStore`
//! using the OpenSearch Rust client over HTTPS with basic authentication.

use std::time::Duration;

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{
        IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts, IndicesPutMappingParts,
    },
    BulkParts, OpenSearch, SearchParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::config::StoreConfig;
use crate::errors::VectorStoreError;
use crate::interfaces::{EndpointResolver, SecretProvider, VectorIndexStore};
use crate::opensearch::index_config::IndexSchema;
use crate::opensearch::queries;
use crate::types::{BulkSummary, DeleteOutcome};
use rag_shared::{EmbeddingDocument, ScoredDocument};

/// OpenSearch implementation of the vector index store.
///
/// Connects to a remote cluster over HTTPS (port 443) with basic
/// authentication and verified TLS. The connection is stateless across
/// calls; the only session state is the underlying HTTP transport.
///
/// # Example
///
/// ```ignore
/// use rag_repository::{OpenSearchVectorStore, StoreConfig, StaticEndpoint, EnvSecretProvider};
///
/// let config = StoreConfig::default();
/// let resolver = StaticEndpoint::new("search-rag.us-east-1.example.com");
/// let secrets = EnvSecretProvider::new("INDEX_PASSWORD");
/// let store = OpenSearchVectorStore::connect(&config, &resolver, &secrets).await?;
/// ```
pub struct OpenSearchVectorStore {
    client: OpenSearch,
}

impl OpenSearchVectorStore {
    /// Connect to the cluster, resolving the endpoint and password through
    /// the injected collaborators.
    ///
    /// # Arguments
    ///
    /// * `config` - Connection settings (index name, region, username, timeout)
    /// * `resolver` - Resolves the logical name to a cluster hostname
    /// * `secrets` - Resolves the index password
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchVectorStore)` - A connected store
    /// * `Err(VectorStoreError)` - If resolution or transport setup fails
    pub async fn connect(
        config: &StoreConfig,
        resolver: &dyn EndpointResolver,
        secrets: &dyn SecretProvider,
    ) -> Result<Self, VectorStoreError> {
        let endpoint = resolver.resolve(&config.name, &config.region).await?;
        let password = secrets.get_secret(&config.name, &config.region).await?;

        let url = format!("https://{}:{}", endpoint, config.port);
        let store = Self::new(&url, &config.username, &password, config.timeout_secs)?;

        info!(
            endpoint = %endpoint,
            port = config.port,
            username = %config.username,
            "Connected to OpenSearch cluster"
        );

        Ok(store)
    }

    /// Create a store for an explicit URL and credentials.
    pub fn new(
        url: &str,
        username: &str,
        password: &str,
        timeout_secs: u64,
    ) -> Result<Self, VectorStoreError> {
        let parsed_url =
            Url::parse(url).map_err(|e| VectorStoreError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .auth(Credentials::Basic(
                username.to_string(),
                password.to_string(),
            ))
            .timeout(Duration::from_secs(timeout_secs))
            .disable_proxy()
            .build()
            .map_err(|e| VectorStoreError::connection(e.to_string()))?;

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }

    /// Parse a bulk response body into a per-document success/failure split.
    fn parse_bulk_response(body: &Value, total: usize) -> BulkSummary {
        let items = match body["items"].as_array() {
            Some(items) => items,
            // No item detail; assume the whole batch landed.
            None => return BulkSummary::all_succeeded(total),
        };

        let mut summary = BulkSummary::default();
        for item in items {
            let op = &item["index"];
            let status = op["status"].as_u64().unwrap_or(0);
            if (200..300).contains(&status) {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
                let reason = op["error"]["reason"]
                    .as_str()
                    .unwrap_or("unknown bulk failure")
                    .to_string();
                summary.errors.push(reason);
            }
        }
        summary
    }
}

#[async_trait]
impl VectorIndexStore for OpenSearchVectorStore {
    async fn index_exists(&self, name: &str) -> Result<bool, VectorStoreError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[name]))
            .send()
            .await
            .map_err(|e| VectorStoreError::connection(e.to_string()))?;

        let status = response.status_code();
        if status.is_success() {
            return Ok(true);
        }
        if status.as_u16() == 404 {
            return Ok(false);
        }

        Err(VectorStoreError::connection(format!(
            "Existence check for {} failed with status {}",
            name, status
        )))
    }

    async fn create_index(
        &self,
        name: &str,
        schema: &IndexSchema,
    ) -> Result<bool, VectorStoreError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(name))
            .body(schema.settings())
            .send()
            .await
            .map_err(|e| VectorStoreError::creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %name, status = %status, body = %error_body, "Index creation failed");
            return Err(VectorStoreError::creation(format!(
                "Create failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| VectorStoreError::parse(e.to_string()))?;
        let acknowledged = body["acknowledged"].as_bool().unwrap_or(false);

        debug!(index = %name, acknowledged, "Index created");
        Ok(acknowledged)
    }

    async fn put_mapping(
        &self,
        name: &str,
        schema: &IndexSchema,
    ) -> Result<bool, VectorStoreError> {
        let response = self
            .client
            .indices()
            .put_mapping(IndicesPutMappingParts::Index(&[name]))
            .body(schema.mapping())
            .send()
            .await
            .map_err(|e| VectorStoreError::mapping(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %name, status = %status, body = %error_body, "Put mapping failed");
            return Err(VectorStoreError::mapping(format!(
                "Put mapping failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| VectorStoreError::parse(e.to_string()))?;
        let acknowledged = body["acknowledged"].as_bool().unwrap_or(false);

        debug!(index = %name, acknowledged, "Index mapping set");
        Ok(acknowledged)
    }

    async fn bulk_index(
        &self,
        name: &str,
        documents: &[EmbeddingDocument],
    ) -> Result<BulkSummary, VectorStoreError> {
        if documents.is_empty() {
            return Ok(BulkSummary::default());
        }

        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(documents.len() * 2);
        for doc in documents {
            body.push(json!({ "index": { "_index": doc.index } }).into());
            body.push(
                json!({
                    "text": doc.text,
                    "vector_field": doc.vector_field
                })
                .into(),
            );
        }

        debug!(index = %name, count = documents.len(), "Sending bulk write");

        let response = self
            .client
            .bulk(BulkParts::Index(name))
            .body(body)
            .send()
            .await
            .map_err(|e| VectorStoreError::bulk(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %name, status = %status, body = %error_body, "Bulk write failed");
            return Err(VectorStoreError::bulk(format!(
                "Bulk write failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| VectorStoreError::parse(e.to_string()))?;

        Ok(Self::parse_bulk_response(&response_body, documents.len()))
    }

    async fn delete_index(&self, name: &str) -> Result<DeleteOutcome, VectorStoreError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[name]))
            .send()
            .await
            .map_err(|e| VectorStoreError::delete(e.to_string()))?;

        let status = response.status_code();

        // A missing index is not an error; the cleanup is idempotent.
        if status.as_u16() == 404 {
            info!(index = %name, "Index not found, nothing to delete");
            return Ok(DeleteOutcome::NotFound);
        }

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %name, status = %status, body = %error_body, "Index deletion failed");
            return Err(VectorStoreError::delete(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %name, "Index deleted");
        Ok(DeleteOutcome::Deleted)
    }

    async fn knn_search(
        &self,
        name: &str,
        vector: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredDocument>, VectorStoreError> {
        let query = queries::build_knn_query(vector, k);

        let response = self
            .client
            .search(SearchParts::Index(&[name]))
            .body(query)
            .send()
            .await
            .map_err(|e| VectorStoreError::search(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %name, status = %status, body = %error_body, "k-NN search failed");
            return Err(VectorStoreError::search(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| VectorStoreError::parse(e.to_string()))?;

        let hits = body["hits"]["hits"]
            .as_array()
            .map(|hits| hits.iter().filter_map(queries::parse_hit).collect())
            .unwrap_or_default();

        Ok(hits)
    }
}
