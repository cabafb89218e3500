//! Application layer: search classification and query services.

pub mod search;
pub mod service;
pub mod state;

pub use search::classify;
pub use service::ExplorerService;
pub use state::AppState;
