//! External collaborator capability traits.
//!
//! The cluster endpoint and the index password come from opaque managed
//! lookups in deployment. Each lookup is modeled as a single-method trait
//! so the wiring code can swap in deterministic stand-ins for tests.

use std::env;

use async_trait::async_trait;

use crate::errors::VectorStoreError;

/// Resolves a secret value (the index password) for an index name and region.
#[async_trait]
pub trait SecretProvider: Send + Sync {
    /// Look up the secret for the given index name and region.
    async fn get_secret(&self, name: &str, region: &str) -> Result<String, VectorStoreError>;
}

/// Resolves a logical index/domain name plus region to a network endpoint.
#[async_trait]
pub trait EndpointResolver: Send + Sync {
    /// Resolve the cluster hostname for the given domain name and region.
    async fn resolve(&self, name: &str, region: &str) -> Result<String, VectorStoreError>;
}

/// Secret provider backed by an environment variable.
#[derive(Debug, Clone)]
pub struct EnvSecretProvider {
    var: String,
}

impl EnvSecretProvider {
    /// Create a provider that reads the secret from the given variable.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl SecretProvider for EnvSecretProvider {
    async fn get_secret(&self, _name: &str, _region: &str) -> Result<String, VectorStoreError> {
        env::var(&self.var)
            .map_err(|_| VectorStoreError::credential(format!("{} is not set", self.var)))
    }
}

/// Endpoint resolver that returns a fixed hostname.
#[derive(Debug, Clone)]
pub struct StaticEndpoint {
    endpoint: String,
}

impl StaticEndpoint {
    /// Create a resolver that always returns the given hostname.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl EndpointResolver for StaticEndpoint {
    async fn resolve(&self, _name: &str, _region: &str) -> Result<String, VectorStoreError> {
        if self.endpoint.is_empty() {
            return Err(VectorStoreError::endpoint("endpoint is empty"));
        }
        Ok(self.endpoint.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_endpoint_resolves() {
        let resolver = StaticEndpoint::new("search.example.com");
        let endpoint = resolver.resolve("rag", "us-east-1").await.unwrap();
        assert_eq!(endpoint, "search.example.com");
    }

    #[tokio::test]
    async fn test_static_endpoint_rejects_empty() {
        let resolver = StaticEndpoint::new("");
        assert!(resolver.resolve("rag", "us-east-1").await.is_err());
    }

    #[tokio::test]
    async fn test_env_secret_missing_var() {
        let provider = EnvSecretProvider::new("RAG_TEST_SECRET_THAT_IS_NOT_SET");
        let result = provider.get_secret("rag", "us-east-1").await;
        assert!(matches!(result, Err(VectorStoreError::CredentialError(_))));
    }
}
