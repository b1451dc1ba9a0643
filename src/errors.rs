use serde_json::Value;
use thiserror::Error;

// Core RPC error types
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Node error {code}: {message}")]
    NodeError {
        code: i64,
        message: String,
        data: Option<Value>,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
