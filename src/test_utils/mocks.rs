//! Mock implementations for testing.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{LedgerRpc, RpcError};

/// One recorded call against the mock gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub params: Vec<Value>,
}

/// Scripted [`LedgerRpc`] implementation.
///
/// Responses are queued per method and consumed in FIFO order, so a test can
/// script the block scanner's sequence of `getBlock` probes call by call.
/// Any call with no scripted response fails with a transport error, which
/// callers either tolerate (scanner) or translate (resolvers) exactly as
/// they would a real network failure.
#[derive(Default)]
pub struct MockLedgerRpc {
    responses: Mutex<HashMap<String, VecDeque<Result<Value, RpcError>>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockLedgerRpc {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response for `method`.
    #[must_use]
    pub fn respond(self, method: &str, result: Value) -> Self {
        self.push(method, Ok(result));
        self
    }

    /// Queue a failure for `method`.
    #[must_use]
    pub fn fail(self, method: &str, error: RpcError) -> Self {
        self.push(method, Err(error));
        self
    }

    /// Queue a generic transport failure for `method`.
    #[must_use]
    pub fn fail_transport(self, method: &str) -> Self {
        self.fail(method, RpcError::Transport("mock transport failure".to_string()))
    }

    /// Every call issued so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, method: &str, response: Result<Value, RpcError>) {
        self.responses
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(response);
    }
}

#[async_trait]
impl LedgerRpc for MockLedgerRpc {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: method.to_string(),
            params,
        });

        let mut responses = self.responses.lock().unwrap();
        responses
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(RpcError::Transport(format!(
                    "no scripted response for {method}"
                )))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn responses_are_consumed_in_order() {
        let mock = MockLedgerRpc::new()
            .respond("getSlot", json!(100))
            .respond("getSlot", json!(101));

        assert_eq!(mock.call("getSlot", Vec::new()).await.unwrap(), json!(100));
        assert_eq!(mock.call("getSlot", Vec::new()).await.unwrap(), json!(101));
        assert!(mock.call("getSlot", Vec::new()).await.is_err());
    }

    #[tokio::test]
    async fn calls_are_recorded_with_params() {
        let mock = MockLedgerRpc::new().respond("getBalance", json!({"value": 1}));
        mock.call("getBalance", vec![json!("addr")]).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "getBalance");
        assert_eq!(calls[0].params, vec![json!("addr")]);
    }
}
