use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol version tag carried by every request.
pub const JSONRPC_VERSION: &str = "2.0";

// JSON-RPC request envelope, built fresh per call and never reused
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    jsonrpc: String,
    id: u64,
    method: String,
    params: Vec<Value>,
}

impl RpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.into(),
            params,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_carries_version_tag_and_params_in_order() {
        let req = RpcRequest::new(7, "evm_setTime", vec![json!(86_400_000), json!(true)]);
        let wire = serde_json::to_value(&req).unwrap();

        assert_eq!(wire["jsonrpc"], "2.0");
        assert_eq!(wire["id"], 7);
        assert_eq!(wire["method"], "evm_setTime");
        assert_eq!(wire["params"], json!([86_400_000, true]));
    }

    #[test]
    fn empty_params_serialize_as_empty_array() {
        let req = RpcRequest::new(1, "evm_mine", vec![]);
        let wire = serde_json::to_value(&req).unwrap();

        assert_eq!(wire["params"], json!([]));
    }
}
