//! Domain types for explorer responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Smallest ledger unit; 1 SOL = 1_000_000_000 lamports.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Convert a lamport amount to SOL.
///
/// Exact for any integer lamport amount divisible by 10^9.
#[must_use]
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Typed lookup intent for a free-text search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchIntent {
    /// A slot number, possibly entered with grouping separators.
    Slot(u64),
    /// A Base58 token in the address length range.
    Address(String),
    /// A Base58 token in the transaction signature length range.
    Signature(String),
    /// Anything else; the reason is a user-facing message.
    Invalid(String),
}

/// One TPS sample derived from the node's performance samples.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct TpsSample {
    pub slot: u64,
    pub tps: f64,
}

/// Network-statistics snapshot assembled from several RPC calls.
///
/// Supply figures are in SOL (lamports / 10^9). `tps` is the most recent
/// sample's rate, or null when the node returned no samples.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct NetworkStats {
    #[schema(example = 2.5)]
    pub tps: Option<f64>,
    /// Most recent sample first.
    pub tps_series: Vec<TpsSample>,
    pub total_supply_sol: f64,
    pub circulating_supply_sol: f64,
    pub non_circulating_supply_sol: f64,
    pub current_slot: u64,
    pub epoch: u64,
    pub slots_in_epoch: u64,
}

/// One transaction row on the home page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct RecentTransaction {
    #[schema(example = "5eykt4UsFv8P8NJdTREpY1vzqKqZKvdpKuc147dw2N9d")]
    pub signature: String,
    /// True iff the node reported no error for the transaction.
    pub success: bool,
    pub fee_lamports: u64,
}

/// Home-page snapshot: epoch context plus the most recent on-chain activity
/// located by the backward block scanner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct HomeSnapshot {
    /// Display label of the cluster being queried (e.g. "Devnet").
    pub network: String,
    pub current_slot: u64,
    pub epoch: u64,
    pub slot_index: u64,
    pub slots_in_epoch: u64,
    /// The last 10 slots, newest first. For display only; not all of them
    /// were probed for blocks.
    pub latest_slots: Vec<u64>,
    /// Up to 10 transactions from the newest non-empty probed block.
    pub recent_transactions: Vec<RecentTransaction>,
    /// The slot the transactions came from; null when none of the probed
    /// slots yielded any transactions (a valid outcome, not an error).
    pub source_slot: Option<u64>,
}

/// Summary of one confirmed block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct BlockSummary {
    pub slot: u64,
    /// Unix timestamp; the node may omit it for old blocks.
    pub block_time: Option<i64>,
    pub blockhash: String,
    pub parent_slot: u64,
    /// True transaction count, not limited by the signature list cap.
    pub transaction_count: u64,
    /// First signature of each transaction, capped at 50 for display.
    pub signatures: Vec<String>,
}

/// Summary of one confirmed transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct TransactionSummary {
    pub signature: String,
    pub slot: u64,
    pub block_time: Option<i64>,
    pub success: bool,
    pub fee_lamports: u64,
    /// Account keys referenced by the transaction message.
    pub accounts: Vec<String>,
    pub instruction_count: u64,
}

/// One entry of an account's recent signature history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct AccountTransaction {
    pub signature: String,
    pub slot: u64,
    pub success: bool,
    pub block_time: Option<i64>,
}

/// Summary of one account: balance plus recent signature history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct AccountSummary {
    #[schema(example = "HvwC9QSAzwEXkUkwqNNGhfNHoVqXJYfPvPZfQvJmHWcF")]
    pub address: String,
    pub balance_lamports: u64,
    pub balance_sol: f64,
    /// Most recent first, capped at 20.
    pub transactions: Vec<AccountTransaction>,
}

/// Overall health of the service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Result of probing one dependency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ComponentHealth {
    pub healthy: bool,
    pub error: Option<String>,
}

/// Health report returned by the `/health` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    /// The upstream ledger node probe.
    pub rpc: ComponentHealth,
    pub checked_at: DateTime<Utc>,
}

/// JSON error envelope returned by all failing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Machine-readable code plus human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ErrorDetail {
    #[schema(example = "not_found")]
    pub code: String,
    #[schema(example = "Block not found")]
    pub message: String,
}
