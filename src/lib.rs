//! Read-only JSON API over a Solana node's JSON-RPC interface.
//!
//! The crate is split the usual way: `domain` holds types, the `LedgerRpc`
//! trait seam, and the error taxonomy; `infra` implements the JSON-RPC HTTP
//! transport; `app` hosts the search classifier and the query services
//! (block scanner, metrics aggregator, detail resolvers); `api` is the axum
//! shell mapping service results onto JSON responses and status codes.
//!
//! Every query is answered live from the remote node: there is no
//! persistence, no caching, and no retry. Each RPC call is attempted exactly
//! once per request.

pub mod api;
pub mod app;
pub mod domain;
pub mod infra;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
