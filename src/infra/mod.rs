//! Infrastructure layer implementations.

pub mod rpc;

pub use rpc::{DEFAULT_RPC_URL, DEFAULT_TIMEOUT_SECS, RpcClientConfig, SolanaRpcClient};
