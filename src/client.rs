use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tracing::debug;

use crate::{
    config::RpcConfig,
    errors::RpcError,
    request::RpcRequest,
    response::RpcResponse,
    transport::{HttpTransport, Transport},
};

// RPC client: one logical transport, sequential single-shot calls
pub struct RpcClient {
    transport: Box<dyn Transport>,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Connects over HTTP to the node named by `config`.
    pub fn connect(config: RpcConfig) -> Result<Self, RpcError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(Box::new(transport)))
    }

    /// Wraps an explicit transport handle. Tests use this to inject
    /// scripted transports.
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            next_id: AtomicU64::new(1),
        }
    }

    /// Issues a single request and unwraps the result field.
    ///
    /// Every call gets a fresh id from the counter; a response carrying a
    /// different id is rejected rather than matched against other calls.
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = RpcRequest::new(id, method, params);
        debug!(method, id, "issuing RPC request");

        let response: RpcResponse = self.transport.send(&request).await?;

        if response.id() != id {
            return Err(RpcError::InvalidResponse(format!(
                "response id {} does not match request id {}",
                response.id(),
                id
            )));
        }

        response.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct PlannedTransport {
        plan: Mutex<VecDeque<Result<RpcResponse, RpcError>>>,
    }

    impl PlannedTransport {
        fn new(plan: VecDeque<Result<RpcResponse, RpcError>>) -> Self {
            Self {
                plan: Mutex::new(plan),
            }
        }
    }

    #[async_trait]
    impl Transport for PlannedTransport {
        async fn send(&self, _request: &RpcRequest) -> Result<RpcResponse, RpcError> {
            self.plan
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(RpcError::ConnectionError("plan exhausted".into())))
        }
    }

    // Echoes the request id back so sequential ids can be observed.
    struct EchoTransport;

    #[async_trait]
    impl Transport for EchoTransport {
        async fn send(&self, request: &RpcRequest) -> Result<RpcResponse, RpcError> {
            Ok(RpcResponse::success(request.id(), json!(request.method())))
        }
    }

    #[tokio::test]
    async fn call_unwraps_result() {
        let plan = VecDeque::from([Ok(RpcResponse::success(1, json!("0xa")))]);
        let client = RpcClient::with_transport(Box::new(PlannedTransport::new(plan)));

        let result = client.call("evm_snapshot", vec![]).await.unwrap();
        assert_eq!(result, json!("0xa"));
    }

    #[tokio::test]
    async fn call_rejects_mismatched_response_id() {
        let plan = VecDeque::from([Ok(RpcResponse::success(99, json!(true)))]);
        let client = RpcClient::with_transport(Box::new(PlannedTransport::new(plan)));

        let err = client.call("evm_mine", vec![]).await.unwrap_err();
        assert!(matches!(err, RpcError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn call_propagates_node_error() {
        let plan = VecDeque::from([Ok(RpcResponse::failure(1, -32000, "revert failed"))]);
        let client = RpcClient::with_transport(Box::new(PlannedTransport::new(plan)));

        let err = client.call("evm_revert", vec![json!("0x1")]).await.unwrap_err();
        match err {
            RpcError::NodeError { code, message, .. } => {
                assert_eq!(code, -32000);
                assert_eq!(message, "revert failed");
            }
            other => panic!("expected NodeError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn ids_increment_across_calls() {
        let client = RpcClient::with_transport(Box::new(EchoTransport));

        // EchoTransport mirrors the request id, so a stable sequence of
        // successful calls proves each one carried a fresh id.
        for _ in 0..3 {
            client.call("evm_mine", vec![]).await.unwrap();
        }
        assert_eq!(client.next_id.load(Ordering::SeqCst), 4);
    }
}
