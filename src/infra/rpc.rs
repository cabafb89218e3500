//! JSON-RPC 2.0 HTTP client for the ledger node.
//!
//! Each call is attempted exactly once: callers that need resilience must
//! loop explicitly. The block scanner's per-slot skip is a different
//! mechanism (tolerating missing data, not transient failure) and lives in
//! the service layer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::domain::{LedgerRpc, RpcError};

/// Public devnet endpoint used when no URL is configured.
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Default per-call timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration for the RPC client, set once at startup.
#[derive(Debug, Clone)]
pub struct RpcClientConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for RpcClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: &'static str,
    id: u32,
    method: String,
    params: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    /// `Value::Null` both when the member is absent and when the node
    /// answered `result: null`; the distinction does not matter to callers.
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<Value>,
}

/// HTTP-based [`LedgerRpc`] implementation.
pub struct SolanaRpcClient {
    http_client: Client,
    url: String,
}

impl SolanaRpcClient {
    /// Build a client from the given configuration.
    ///
    /// The timeout applies to the whole request; a call exceeding it fails
    /// with [`RpcError::Transport`] and is not retried.
    pub fn new(config: &RpcClientConfig) -> Result<Self, RpcError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        Ok(Self {
            http_client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl LedgerRpc for SolanaRpcClient {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: method.to_string(),
            params,
        };

        debug!(method = %method, url = %self.url, "Issuing JSON-RPC call");

        let response = self
            .http_client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RpcError::Transport(format!("timeout: {e}"))
                } else {
                    RpcError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Transport(format!(
                "unexpected HTTP status {status}"
            )));
        }

        let rpc_response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| RpcError::Transport(format!("unreadable response body: {e}")))?;

        if let Some(error) = rpc_response.error {
            debug!(method = %method, error = %error, "Node returned an RPC error");
            return Err(RpcError::Protocol(error));
        }

        Ok(rpc_response.result)
    }
}
