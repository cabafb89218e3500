//! Router assembly and middleware stack.

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::app::AppState;

use super::handlers::{
    ApiDoc, account_handler, health_check_handler, home_handler, liveness_handler,
    readiness_handler, search_handler, slot_handler, stats_handler, transaction_handler,
};

/// Outer request deadline; generous enough for the scanner's worst case of
/// sequential probes against a slow node.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Build the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/api/stats", get(stats_handler))
        .route("/search", get(search_handler))
        .route("/slot/{slot}", get(slot_handler))
        .route("/tx/{signature}", get(transaction_handler))
        .route("/account/{address}", get(account_handler))
        .route("/health", get(health_check_handler))
        .route("/health/live", get(liveness_handler))
        .route("/health/ready", get(readiness_handler))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
