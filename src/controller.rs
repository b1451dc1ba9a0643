use serde_json::{json, Value};
use tracing::debug;

use crate::{client::RpcClient, errors::RpcError};

pub const METHOD_SNAPSHOT: &str = "evm_snapshot";
pub const METHOD_REVERT: &str = "evm_revert";
pub const METHOD_MINE: &str = "evm_mine";
pub const METHOD_SET_TIME: &str = "evm_setTime";
pub const METHOD_GET_BLOCK_BY_NUMBER: &str = "eth_getBlockByNumber";

/// Opaque snapshot identifier, returned verbatim by the node.
///
/// Valid until consumed by a revert or until the node resets; no expiry
/// tracking happens on this side.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotHandle(Value);

impl SnapshotHandle {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for SnapshotHandle {
    fn from(raw: Value) -> Self {
        Self::new(raw)
    }
}

/// Time and snapshot controller for a development node.
///
/// Each operation is one independent, stateless RPC call (except the
/// documented mine-after-set-time pair); sequencing such as
/// snapshot-before-test and revert-after-test is the caller's job. Callers
/// running tests concurrently against one node must serialize access
/// themselves.
pub struct EvmController {
    client: RpcClient,
}

impl EvmController {
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }

    /// Captures the current chain state; the handle comes back verbatim
    /// with no shape validation.
    pub async fn take_snapshot(&self) -> Result<SnapshotHandle, RpcError> {
        let raw = self.client.call(METHOD_SNAPSHOT, vec![]).await?;
        Ok(SnapshotHandle::new(raw))
    }

    /// Rolls the chain back to `handle`. A handle reverts exactly once;
    /// reverting it again (or passing an unknown handle) fails with the
    /// node's error.
    pub async fn revert_to_snapshot(&self, handle: &SnapshotHandle) -> Result<Value, RpcError> {
        self.client
            .call(METHOD_REVERT, vec![handle.as_value().clone()])
            .await
    }

    /// Mines one block. Used standalone and as the corrective step after a
    /// time jump.
    pub async fn mine_block(&self) -> Result<Value, RpcError> {
        self.client.call(METHOD_MINE, vec![]).await
    }

    /// Jumps the node's simulated clock to `target` (seconds since epoch).
    ///
    /// A missing or zero target is a designed no-op: no RPC is issued and
    /// `Ok(None)` comes back. Otherwise the target goes out in milliseconds,
    /// followed by a block mine.
    pub async fn advance_time_to(&self, target: Option<u64>) -> Result<Option<Value>, RpcError> {
        let target_secs = match target {
            None | Some(0) => return Ok(None),
            Some(secs) => secs,
        };
        debug!(target_secs, "jumping simulated time");

        let set_time = self
            .client
            .call(METHOD_SET_TIME, vec![json!(target_secs * 1000)])
            .await;

        // Hack: mine a block even when evm_setTime failed, to work around
        // nodes where gas estimation keeps using the old block time until a
        // block is mined after the time change. Without it, estimateGas
        // rejects transactions submitted after a jump to the future.
        // https://github.com/trufflesuite/ganache/issues/3528
        let mined = self.mine_block().await;

        set_time?;
        mined.map(Some)
    }

    /// Jumps the simulated clock `secs` seconds past the latest block's
    /// timestamp. `advance_time_by(0)` is the same no-op as a zero target.
    pub async fn advance_time_by(&self, secs: u64) -> Result<Option<Value>, RpcError> {
        if secs == 0 {
            return Ok(None);
        }
        let now = self.latest_block_timestamp().await?;
        self.advance_time_to(Some(now + secs)).await
    }

    /// Reads the latest block header's timestamp, decoding the node's hex
    /// string to seconds since epoch.
    pub async fn latest_block_timestamp(&self) -> Result<u64, RpcError> {
        let block = self
            .client
            .call(METHOD_GET_BLOCK_BY_NUMBER, vec![json!("latest"), json!(false)])
            .await?;

        let raw = block
            .get("timestamp")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                RpcError::InvalidResponse("latest block has no timestamp field".to_string())
            })?;

        decode_hex_quantity(raw)
    }
}

fn decode_hex_quantity(raw: &str) -> Result<u64, RpcError> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    u64::from_str_radix(digits, 16)
        .map_err(|e| RpcError::InvalidResponse(format!("bad hex quantity {raw:?}: {e}")))
}
