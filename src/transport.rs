use async_trait::async_trait;

use crate::{config::RpcConfig, errors::RpcError, request::RpcRequest, response::RpcResponse};

/// Transport seam between the client and the node.
///
/// The production implementation posts the envelope over HTTP; tests inject
/// scripted transports. One `send` is one request on the wire: no retries,
/// no batching, no cancellation once issued.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RpcRequest) -> Result<RpcResponse, RpcError>;
}

// HTTP transport over a single reqwest client
pub struct HttpTransport {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &RpcConfig) -> Result<Self, RpcError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| RpcError::ConfigError(e.to_string()))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &RpcRequest) -> Result<RpcResponse, RpcError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| RpcError::ConnectionError(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| RpcError::ConnectionError(e.to_string()))?;

        Ok(serde_json::from_str(&body)?)
    }
}
