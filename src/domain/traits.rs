//! Domain traits defining contracts for external systems.

use async_trait::async_trait;
use serde_json::Value;

use super::error::RpcError;

/// Read-only gateway to a ledger node's JSON-RPC interface.
///
/// Abstracted behind a trait so services can be exercised against a scripted
/// mock instead of a live node. Implementations issue each call exactly once:
/// no retry, no caching.
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Issue a single JSON-RPC call and return the `result` member verbatim.
    ///
    /// A node answering `result: null` yields `Ok(Value::Null)`; callers
    /// decide what a null result means for their entity.
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcError>;
}
