use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::RpcError;

// JSON-RPC response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<NodeErrorPayload>,
}

/// Error payload returned by the node, forwarded verbatim to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeErrorPayload {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcResponse {
    pub fn new(id: u64, result: Option<Value>, error: Option<NodeErrorPayload>) -> Self {
        Self { id, result, error }
    }

    pub fn success(id: u64, result: Value) -> Self {
        Self::new(id, Some(result), None)
    }

    pub fn failure(id: u64, code: i64, message: impl Into<String>) -> Self {
        Self::new(
            id,
            None,
            Some(NodeErrorPayload {
                code,
                message: message.into(),
                data: None,
            }),
        )
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&NodeErrorPayload> {
        self.error.as_ref()
    }

    /// Unwraps the single result field, or surfaces the node's error payload.
    pub fn into_result(self) -> Result<Value, RpcError> {
        match (self.result, self.error) {
            (_, Some(err)) => Err(RpcError::NodeError {
                code: err.code,
                message: err.message,
                data: err.data,
            }),
            (Some(result), None) => Ok(result),
            (None, None) => Err(RpcError::InvalidResponse(
                "response carried neither result nor error".to_string(),
            )),
        }
    }
}
