//! Application service layer: query resolution over the ledger RPC gateway.

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use crate::domain::{
    AccountSummary, AccountTransaction, AppError, BlockSummary, ComponentHealth, HealthResponse,
    HealthStatus, HomeSnapshot, LedgerRpc, NetworkStats, RecentTransaction, RpcError, TpsSample,
    TransactionSummary, lamports_to_sol,
};

/// Number of descending slot candidates shown on the home page.
const LATEST_SLOT_WINDOW: usize = 10;

/// How many of those candidates are actually probed for a block.
const SCAN_DEPTH: usize = 6;

/// Transactions taken from the first non-empty block.
const RECENT_TX_LIMIT: usize = 10;

/// Signatures listed per block detail page.
const SLOT_SIGNATURE_CAP: usize = 50;

/// Signature-history entries fetched per account.
const ACCOUNT_HISTORY_LIMIT: usize = 20;

/// Performance samples requested per stats snapshot.
const PERFORMANCE_SAMPLE_COUNT: usize = 10;

// ---------------------------------------------------------------------------
// Node response shapes. Fields the node may legitimately omit carry
// `#[serde(default)]`; fields we rely on are required, and their absence
// surfaces as `RpcError::Malformed`.
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct SupplyResponse {
    #[serde(default)]
    value: SupplyValue,
}

#[derive(Debug, Default, Deserialize)]
struct SupplyValue {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    circulating: u64,
    #[serde(default, rename = "nonCirculating")]
    non_circulating: u64,
}

#[derive(Debug, Default, Deserialize)]
struct PerformanceSample {
    #[serde(default)]
    slot: u64,
    #[serde(default, rename = "numTransactions")]
    num_transactions: u64,
    #[serde(default, rename = "samplePeriodSecs")]
    sample_period_secs: u64,
}

impl PerformanceSample {
    /// A zero or absent sample period is floored to one second so the rate
    /// is always defined.
    fn tps(&self) -> f64 {
        self.num_transactions as f64 / self.sample_period_secs.max(1) as f64
    }
}

#[derive(Debug, Default, Deserialize)]
struct EpochInfo {
    #[serde(default)]
    epoch: u64,
    #[serde(default, rename = "slotIndex")]
    slot_index: u64,
    #[serde(default, rename = "slotsInEpoch")]
    slots_in_epoch: u64,
}

#[derive(Debug, Default, Deserialize)]
struct BlockResponse {
    #[serde(default, rename = "blockTime")]
    block_time: Option<i64>,
    #[serde(default)]
    blockhash: String,
    #[serde(default, rename = "parentSlot")]
    parent_slot: u64,
    #[serde(default)]
    transactions: Vec<BlockTransaction>,
}

#[derive(Debug, Default, Deserialize)]
struct BlockTransaction {
    #[serde(default)]
    transaction: TransactionEnvelope,
    #[serde(default)]
    meta: TransactionMeta,
}

#[derive(Debug, Default, Deserialize)]
struct TransactionEnvelope {
    #[serde(default)]
    signatures: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TransactionMeta {
    /// The node reports `err: null` for successful transactions.
    #[serde(default)]
    err: Value,
    #[serde(default)]
    fee: u64,
}

impl TransactionMeta {
    fn success(&self) -> bool {
        self.err.is_null()
    }
}

#[derive(Debug, Deserialize)]
struct TransactionResponse {
    #[serde(default)]
    slot: u64,
    #[serde(default, rename = "blockTime")]
    block_time: Option<i64>,
    // Required: a non-null transaction response without these is malformed.
    meta: TransactionMeta,
    transaction: TransactionPayload,
}

#[derive(Debug, Deserialize)]
struct TransactionPayload {
    message: TransactionMessage,
}

#[derive(Debug, Deserialize)]
struct TransactionMessage {
    #[serde(default, rename = "accountKeys")]
    account_keys: Vec<String>,
    #[serde(default)]
    instructions: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct BalanceResponse {
    #[serde(default)]
    value: u64,
}

#[derive(Debug, Default, Deserialize)]
struct SignatureRecord {
    #[serde(default)]
    signature: String,
    #[serde(default)]
    slot: u64,
    #[serde(default)]
    err: Value,
    #[serde(default, rename = "blockTime")]
    block_time: Option<i64>,
}

fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, RpcError> {
    serde_json::from_value(payload).map_err(|e| RpcError::Malformed(e.to_string()))
}

/// Read-only explorer queries against a ledger node.
///
/// All RPC calls are issued strictly sequentially; every request builds its
/// own transient records and nothing is cached between requests.
pub struct ExplorerService {
    rpc: Arc<dyn LedgerRpc>,
    network: String,
}

impl ExplorerService {
    #[must_use]
    pub fn new(rpc: Arc<dyn LedgerRpc>, network: impl Into<String>) -> Self {
        Self {
            rpc,
            network: network.into(),
        }
    }

    /// Home-page snapshot: epoch context plus the newest on-chain activity.
    ///
    /// Walks backward from the current slot over [`SCAN_DEPTH`] candidates
    /// and stops at the first block with a non-empty transaction list.
    /// Per-candidate failures are tolerated, not surfaced; if every probed
    /// slot is empty the snapshot carries an empty list and a null source
    /// slot, which is a valid outcome.
    #[instrument(skip(self))]
    pub async fn latest_activity(&self) -> Result<HomeSnapshot, AppError> {
        let (current_slot, epoch) = self.slot_and_epoch().await.map_err(|err| {
            warn!(error = %err, "Ledger context unavailable");
            AppError::NotFound("RPC unavailable".to_string())
        })?;

        let latest_slots: Vec<u64> = (0..LATEST_SLOT_WINDOW as u64)
            .filter_map(|back| current_slot.checked_sub(back))
            .collect();

        let mut recent_transactions = Vec::new();
        let mut source_slot = None;

        for &slot in latest_slots.iter().take(SCAN_DEPTH) {
            let payload = match self
                .rpc
                .call(
                    "getBlock",
                    vec![json!(slot), json!({"maxSupportedTransactionVersion": 0})],
                )
                .await
            {
                Ok(payload) => payload,
                Err(err) => {
                    debug!(slot, error = %err, "Skipping slot: block fetch failed");
                    continue;
                }
            };
            if payload.is_null() {
                debug!(slot, "Skipping slot: no block");
                continue;
            }
            let block: BlockResponse = match decode(payload) {
                Ok(block) => block,
                Err(err) => {
                    debug!(slot, error = %err, "Skipping slot: undecodable block");
                    continue;
                }
            };
            if block.transactions.is_empty() {
                debug!(slot, "Skipping slot: empty block");
                continue;
            }

            for tx in block.transactions.iter().take(RECENT_TX_LIMIT) {
                let Some(signature) = tx.transaction.signatures.first() else {
                    continue;
                };
                recent_transactions.push(RecentTransaction {
                    signature: signature.clone(),
                    success: tx.meta.success(),
                    fee_lamports: tx.meta.fee,
                });
            }

            source_slot = Some(slot);
            break;
        }

        Ok(HomeSnapshot {
            network: self.network.clone(),
            current_slot,
            epoch: epoch.epoch,
            slot_index: epoch.slot_index,
            slots_in_epoch: epoch.slots_in_epoch,
            latest_slots,
            recent_transactions,
            source_slot,
        })
    }

    /// Network-statistics snapshot.
    ///
    /// All-or-nothing: if any of the four underlying calls fails, the whole
    /// snapshot fails and no partial statistics are returned.
    #[instrument(skip(self))]
    pub async fn network_stats(&self) -> Result<NetworkStats, AppError> {
        let supply: SupplyResponse = decode(self.rpc.call("getSupply", Vec::new()).await?)?;

        let samples: Vec<PerformanceSample> = decode(
            self.rpc
                .call(
                    "getRecentPerformanceSamples",
                    vec![json!(PERFORMANCE_SAMPLE_COUNT)],
                )
                .await?,
        )?;

        let current_slot: u64 = decode(self.rpc.call("getSlot", Vec::new()).await?)?;
        let epoch: EpochInfo = decode(self.rpc.call("getEpochInfo", Vec::new()).await?)?;

        let tps_series: Vec<TpsSample> = samples
            .iter()
            .map(|sample| TpsSample {
                slot: sample.slot,
                tps: sample.tps(),
            })
            .collect();
        let tps = tps_series.first().map(|sample| sample.tps);

        Ok(NetworkStats {
            tps,
            tps_series,
            total_supply_sol: lamports_to_sol(supply.value.total),
            circulating_supply_sol: lamports_to_sol(supply.value.circulating),
            non_circulating_supply_sol: lamports_to_sol(supply.value.non_circulating),
            current_slot,
            epoch: epoch.epoch,
            slots_in_epoch: epoch.slots_in_epoch,
        })
    }

    /// Resolve one block by slot.
    #[instrument(skip(self))]
    pub async fn slot_detail(&self, slot: u64) -> Result<BlockSummary, AppError> {
        let payload = self
            .rpc
            .call(
                "getBlock",
                vec![
                    json!(slot),
                    json!({"encoding": "json", "maxSupportedTransactionVersion": 0}),
                ],
            )
            .await
            .map_err(|err| {
                debug!(slot, error = %err, "Block fetch failed");
                AppError::NotFound("Block not found".to_string())
            })?;

        if payload.is_null() {
            return Err(AppError::NotFound("Block not found".to_string()));
        }

        let block: BlockResponse = decode(payload).map_err(|err| {
            warn!(slot, error = %err, "Undecodable block response");
            AppError::NotFound("Block not found".to_string())
        })?;

        let mut signatures: Vec<String> = block
            .transactions
            .iter()
            .filter_map(|tx| tx.transaction.signatures.first().cloned())
            .collect();
        let transaction_count = signatures.len() as u64;
        signatures.truncate(SLOT_SIGNATURE_CAP);

        Ok(BlockSummary {
            slot,
            block_time: block.block_time,
            blockhash: block.blockhash,
            parent_slot: block.parent_slot,
            transaction_count,
            signatures,
        })
    }

    /// Resolve one transaction by signature.
    #[instrument(skip(self, signature), fields(signature = %signature))]
    pub async fn transaction_detail(
        &self,
        signature: &str,
    ) -> Result<TransactionSummary, AppError> {
        let payload = self
            .rpc
            .call(
                "getTransaction",
                vec![
                    json!(signature),
                    json!({"encoding": "json", "maxSupportedTransactionVersion": 0}),
                ],
            )
            .await
            .map_err(|err| {
                debug!(error = %err, "Transaction fetch failed");
                AppError::NotFound("Transaction not found".to_string())
            })?;

        if payload.is_null() {
            return Err(AppError::NotFound("Transaction not found".to_string()));
        }

        let tx: TransactionResponse = decode(payload).map_err(|err| {
            warn!(error = %err, "Undecodable transaction response");
            AppError::NotFound("Transaction not found".to_string())
        })?;

        Ok(TransactionSummary {
            signature: signature.to_string(),
            slot: tx.slot,
            block_time: tx.block_time,
            success: tx.meta.success(),
            fee_lamports: tx.meta.fee,
            accounts: tx.transaction.message.account_keys,
            instruction_count: tx.transaction.message.instructions.len() as u64,
        })
    }

    /// Resolve one account: balance plus recent signature history.
    ///
    /// Any RPC failure on either call surfaces as the account not being
    /// found; there is no distinction from a genuinely missing account.
    #[instrument(skip(self, address), fields(address = %address))]
    pub async fn account_detail(&self, address: &str) -> Result<AccountSummary, AppError> {
        let not_found = |err: RpcError| {
            debug!(error = %err, "Account lookup failed");
            AppError::NotFound("Account not found".to_string())
        };

        let balance_payload = self
            .rpc
            .call("getBalance", vec![json!(address)])
            .await
            .map_err(not_found)?;
        let balance: BalanceResponse = decode(balance_payload).map_err(not_found)?;

        let history_payload = self
            .rpc
            .call(
                "getSignaturesForAddress",
                vec![json!(address), json!({"limit": ACCOUNT_HISTORY_LIMIT})],
            )
            .await
            .map_err(not_found)?;
        // The node answers null rather than an empty list for some addresses.
        let history: Vec<SignatureRecord> = if history_payload.is_null() {
            Vec::new()
        } else {
            decode(history_payload).map_err(not_found)?
        };

        let transactions = history
            .into_iter()
            .map(|record| AccountTransaction {
                signature: record.signature,
                slot: record.slot,
                success: record.err.is_null(),
                block_time: record.block_time,
            })
            .collect();

        Ok(AccountSummary {
            address: address.to_string(),
            balance_lamports: balance.value,
            balance_sol: lamports_to_sol(balance.value),
            transactions,
        })
    }

    /// Probe the upstream node for the health endpoints.
    pub async fn health_check(&self) -> HealthResponse {
        let rpc = match self.rpc.call("getHealth", Vec::new()).await {
            Ok(result) if result.as_str() == Some("ok") => ComponentHealth {
                healthy: true,
                error: None,
            },
            Ok(result) => ComponentHealth {
                healthy: false,
                error: Some(format!("unexpected health result: {result}")),
            },
            Err(err) => ComponentHealth {
                healthy: false,
                error: Some(err.to_string()),
            },
        };

        HealthResponse {
            status: if rpc.healthy {
                HealthStatus::Healthy
            } else {
                HealthStatus::Unhealthy
            },
            rpc,
            checked_at: chrono::Utc::now(),
        }
    }

    async fn slot_and_epoch(&self) -> Result<(u64, EpochInfo), RpcError> {
        let current_slot: u64 = decode(self.rpc.call("getSlot", Vec::new()).await?)?;
        let epoch: EpochInfo = decode(self.rpc.call("getEpochInfo", Vec::new()).await?)?;
        Ok((current_slot, epoch))
    }
}
