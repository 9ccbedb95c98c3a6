//! Language-model completion interface and remote client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::RetrieveError;

/// Default completion model identifier.
pub const DEFAULT_COMPLETION_MODEL: &str = "anthropic.claude-3-sonnet-20240229-v1:0";

/// Produces an answer text for a fully rendered prompt.
///
/// A single-shot remote call with no conversation state; implementations
/// are injected so the chain can be tested with deterministic stand-ins.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Generate a completion for the given prompt.
    async fn complete(&self, prompt: &str) -> Result<String, RetrieveError>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    input: &'a str,
    parameters: CompletionParams,
}

#[derive(Serialize)]
struct CompletionParams {
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionResult {
    generated_text: String,
}

#[derive(Deserialize)]
struct CompletionResponse {
    results: Vec<CompletionResult>,
}

/// Client for a remote language-model completion endpoint.
pub struct RemoteCompletionClient {
    client: Client,
    endpoint: String,
    model_id: String,
}

impl RemoteCompletionClient {
    /// Create a client for the given service endpoint and model.
    pub fn new(
        endpoint: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Result<Self, RetrieveError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| RetrieveError::request(e.to_string()))?;

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
impl CompletionModel for RemoteCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, RetrieveError> {
        let request = CompletionRequest {
            input: prompt,
            // Deterministic answers for retrieval QA.
            parameters: CompletionParams { temperature: 0.0 },
        };

        let response = self
            .client
            .post(self.invoke_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| RetrieveError::request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RetrieveError::service(format!(
                "Completion call failed with status {}: {}",
                status, body
            )));
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| RetrieveError::response(e.to_string()))?;

        let answer = body
            .results
            .into_iter()
            .next()
            .map(|r| r.generated_text)
            .ok_or_else(|| RetrieveError::response("results field is empty"))?;

        debug!(answer_len = answer.len(), "Completion generated");
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let request = CompletionRequest {
            input: "Question: hi\nAnswer:",
            parameters: CompletionParams { temperature: 0.0 },
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["input"], "Question: hi\nAnswer:");
        assert_eq!(value["parameters"]["temperature"], 0.0);
    }

    #[test]
    fn test_response_wire_shape() {
        let body = json!({ "results": [ { "generated_text": "42" } ] });
        let response: CompletionResponse = serde_json::from_value(body).unwrap();

        assert_eq!(response.results[0].generated_text, "42");
    }
}
