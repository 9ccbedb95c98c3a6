//! Configuration types for the vector store connection.

/// Connection settings for the vector store cluster.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Logical index/domain name used for endpoint and secret lookup.
    pub name: String,
    /// Cloud region the cluster lives in.
    pub region: String,
    /// Basic-auth username for the cluster.
    pub username: String,
    /// HTTPS port on the cluster.
    pub port: u16,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "rag".to_string(),
            region: "us-east-1".to_string(),
            username: "osmaster".to_string(),
            port: 443,
            timeout_secs: 30,
        }
    }
}

impl StoreConfig {
    /// Create a config for the given index name, keeping the other defaults.
    pub fn for_index(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.name, "rag");
        assert_eq!(config.username, "osmaster");
        assert_eq!(config.port, 443);
        assert_eq!(config.timeout_secs, 30);
    }
}
