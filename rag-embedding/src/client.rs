//! HTTP client for a remote embedding model.
//!
//! Wire contract: POST `{endpoint}/model/{model_id}/invoke` with a JSON body
//! `{"inputText": <text>}`; the response carries the vector in an
//! `embedding` field.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::EmbeddingError;
use crate::generator::EmbeddingGenerator;

/// Default embedding model identifier.
pub const DEFAULT_EMBEDDING_MODEL: &str = "amazon.titan-embed-text-v1";

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    #[serde(rename = "inputText")]
    input_text: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

/// Client for a remote text-embedding model endpoint.
pub struct RemoteEmbeddingClient {
    client: Client,
    endpoint: String,
    model_id: String,
}

impl RemoteEmbeddingClient {
    /// Create a client for the given service endpoint and model.
    pub fn new(
        endpoint: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Result<Self, EmbeddingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| EmbeddingError::request(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model_id: model_id.into(),
        })
    }

    fn invoke_url(&self) -> String {
        format!(
            "{}/model/{}/invoke",
            self.endpoint.trim_end_matches('/'),
            self.model_id
        )
    }
}

#[async_trait]
impl EmbeddingGenerator for RemoteEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request = EmbeddingRequest { input_text: text };

        let response = self
            .client
            .post(self.invoke_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| EmbeddingError::request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::service(format!(
                "Embedding call failed with status {}: {}",
                status, body
            )));
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::response(e.to_string()))?;

        if body.embedding.is_empty() {
            return Err(EmbeddingError::response("embedding field is empty"));
        }

        debug!(dimension = body.embedding.len(), "Embedding generated");
        Ok(body.embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let request = EmbeddingRequest {
            input_text: "hello world",
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value, json!({ "inputText": "hello world" }));
    }

    #[test]
    fn test_response_wire_shape() {
        let body = json!({ "embedding": [0.25, -0.5, 1.0] });
        let response: EmbeddingResponse = serde_json::from_value(body).unwrap();

        assert_eq!(response.embedding, vec![0.25, -0.5, 1.0]);
    }

    #[test]
    fn test_invoke_url() {
        let client =
            RemoteEmbeddingClient::new("https://models.example.com/", DEFAULT_EMBEDDING_MODEL)
                .unwrap();

        assert_eq!(
            client.invoke_url(),
            "https://models.example.com/model/amazon.titan-embed-text-v1/invoke"
        );
    }
}
