//! Application state management.

use std::sync::Arc;

use crate::domain::LedgerRpc;

use super::service::ExplorerService;

/// Shared application state, constructed once at startup and read-only
/// thereafter.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ExplorerService>,
    pub rpc: Arc<dyn LedgerRpc>,
}

impl AppState {
    #[must_use]
    pub fn new(rpc: Arc<dyn LedgerRpc>, network: impl Into<String>) -> Self {
        let service = Arc::new(ExplorerService::new(Arc::clone(&rpc), network));
        Self { service, rpc }
    }
}
