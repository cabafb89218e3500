//! HTTP request handlers with OpenAPI documentation.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Redirect,
};
use serde::Deserialize;
use tracing::error;
use utoipa::OpenApi;

use crate::app::{AppState, classify};
use crate::domain::{
    AccountSummary, AccountTransaction, AppError, BlockSummary, ComponentHealth, ErrorDetail,
    ErrorResponse, HealthResponse, HealthStatus, HomeSnapshot, NetworkStats, RecentTransaction,
    SearchIntent, TpsSample, TransactionSummary,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Solana Explorer API",
        version = "0.1.0",
        description = "Read-only JSON API over a Solana node's JSON-RPC interface",
        license(name = "MIT")
    ),
    paths(
        home_handler,
        stats_handler,
        search_handler,
        slot_handler,
        transaction_handler,
        account_handler,
        health_check_handler,
        liveness_handler,
        readiness_handler,
    ),
    components(schemas(
        HomeSnapshot,
        RecentTransaction,
        NetworkStats,
        TpsSample,
        BlockSummary,
        TransactionSummary,
        AccountSummary,
        AccountTransaction,
        HealthResponse,
        HealthStatus,
        ComponentHealth,
        ErrorResponse,
        ErrorDetail,
    )),
    tags(
        (name = "explorer", description = "Ledger query endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Home-page snapshot
///
/// Epoch context plus the most recent transactions, located by walking
/// backward from the current slot until a non-empty block is found.
#[utoipa::path(
    get,
    path = "/",
    tag = "explorer",
    responses(
        (status = 200, description = "Current ledger context and recent activity", body = HomeSnapshot),
        (status = 404, description = "Ledger node unreachable", body = ErrorResponse)
    )
)]
pub async fn home_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HomeSnapshot>, AppError> {
    let snapshot = state.service.latest_activity().await?;
    Ok(Json(snapshot))
}

/// Network statistics snapshot
///
/// All-or-nothing: any upstream failure yields 503 with an error body,
/// never a partially populated document.
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "explorer",
    responses(
        (status = 200, description = "Network statistics", body = NetworkStats),
        (status = 503, description = "Statistics unavailable", body = ErrorResponse)
    )
)]
pub async fn stats_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NetworkStats>, AppError> {
    let stats = state.service.network_stats().await.map_err(|err| {
        error!(error = %err, "Stats aggregation failed");
        AppError::StatsUnavailable
    })?;
    Ok(Json(stats))
}

/// Classify a free-text query and redirect to the matching detail resource
#[utoipa::path(
    get,
    path = "/search",
    tag = "explorer",
    params(("q" = String, Query, description = "Slot number, address, or transaction signature")),
    responses(
        (status = 303, description = "Redirect to /slot/{slot}, /tx/{signature}, or /account/{address}"),
        (status = 400, description = "Unclassifiable input", body = ErrorResponse)
    )
)]
pub async fn search_handler(Query(query): Query<SearchQuery>) -> Result<Redirect, AppError> {
    match classify(&query.q) {
        SearchIntent::Slot(slot) => Ok(Redirect::to(&format!("/slot/{slot}"))),
        SearchIntent::Signature(signature) => Ok(Redirect::to(&format!("/tx/{signature}"))),
        SearchIntent::Address(address) => Ok(Redirect::to(&format!("/account/{address}"))),
        SearchIntent::Invalid(reason) => Err(AppError::InvalidInput(reason)),
    }
}

/// Block detail by slot
#[utoipa::path(
    get,
    path = "/slot/{slot}",
    tag = "explorer",
    params(("slot" = u64, Path, description = "Slot number")),
    responses(
        (status = 200, description = "Block summary", body = BlockSummary),
        (status = 404, description = "No block at this slot", body = ErrorResponse)
    )
)]
pub async fn slot_handler(
    State(state): State<Arc<AppState>>,
    Path(slot): Path<u64>,
) -> Result<Json<BlockSummary>, AppError> {
    let block = state.service.slot_detail(slot).await?;
    Ok(Json(block))
}

/// Transaction detail by signature
#[utoipa::path(
    get,
    path = "/tx/{signature}",
    tag = "explorer",
    params(("signature" = String, Path, description = "Base58 transaction signature")),
    responses(
        (status = 200, description = "Transaction summary", body = TransactionSummary),
        (status = 404, description = "Unknown transaction", body = ErrorResponse)
    )
)]
pub async fn transaction_handler(
    State(state): State<Arc<AppState>>,
    Path(signature): Path<String>,
) -> Result<Json<TransactionSummary>, AppError> {
    let tx = state.service.transaction_detail(&signature).await?;
    Ok(Json(tx))
}

/// Account detail by address
#[utoipa::path(
    get,
    path = "/account/{address}",
    tag = "explorer",
    params(("address" = String, Path, description = "Base58 account address")),
    responses(
        (status = 200, description = "Account summary", body = AccountSummary),
        (status = 404, description = "Account not found or node unreachable", body = ErrorResponse)
    )
)]
pub async fn account_handler(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<AccountSummary>, AppError> {
    let account = state.service.account_detail(&address).await?;
    Ok(Json(account))
}

/// Detailed health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Health status", body = HealthResponse))
)]
pub async fn health_check_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let health = state.service.health_check().await;
    Json(health)
}

/// Kubernetes liveness probe
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    responses((status = 200, description = "Application is alive"))
)]
pub async fn liveness_handler() -> StatusCode {
    StatusCode::OK
}

/// Kubernetes readiness probe
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Upstream node reachable"),
        (status = 503, description = "Upstream node unreachable")
    )
)]
pub async fn readiness_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    let health = state.service.health_check().await;
    match health.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}
