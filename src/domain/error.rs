//! Application error types and their HTTP mappings.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::types::{ErrorDetail, ErrorResponse};

/// Failures produced by the JSON-RPC transport boundary.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Network failure, timeout, or a non-2xx HTTP status from the node.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The node answered with a JSON-RPC `error` member; the payload is
    /// carried verbatim.
    #[error("node reported an error: {0}")]
    Protocol(serde_json::Value),

    /// The node answered successfully but the `result` did not have the
    /// expected shape.
    #[error("malformed node response: {0}")]
    Malformed(String),
}

/// Top-level application error.
///
/// Transport-level causes stay opaque inside [`RpcError`]; the service layer
/// decides per call site whether to skip, translate to `NotFound`, or let the
/// cause propagate.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// The requested entity does not exist (or the resolver could not reach
    /// the node, which surfaces identically).
    #[error("{0}")]
    NotFound(String),

    /// The search input failed classification; the message is user-facing.
    #[error("{0}")]
    InvalidInput(String),

    /// One of the calls behind an all-or-nothing aggregate failed; no
    /// partial statistics are available.
    #[error("RPC unavailable")]
    StatsUnavailable,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Rpc(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::StatsUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Rpc(_) => "upstream_error",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::StatsUnavailable => "stats_unavailable",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
