use std::time::Duration;

/// Conventional local development node endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8545";

#[derive(Debug, Clone)]
pub struct RpcConfig {
    pub endpoint: String,

    // Timeout policy belongs to the transport, not the controller; None
    // leaves the request open until the node answers.
    pub request_timeout: Option<Duration>,
}

impl RpcConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            request_timeout: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_node_without_timeout() {
        let config = RpcConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn builder_sets_timeout() {
        let config =
            RpcConfig::new("http://127.0.0.1:7545").with_request_timeout(Duration::from_secs(5));
        assert_eq!(config.endpoint, "http://127.0.0.1:7545");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    }
}
