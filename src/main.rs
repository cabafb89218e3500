//! Application entry point.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use solana_explorer_api::api::create_router;
use solana_explorer_api::app::AppState;
use solana_explorer_api::infra::{
    DEFAULT_RPC_URL, DEFAULT_TIMEOUT_SECS, RpcClientConfig, SolanaRpcClient,
};

/// Application configuration, read once from the environment at startup.
struct Config {
    rpc_url: String,
    rpc_timeout: Duration,
    network: String,
    host: String,
    port: u16,
}

impl Config {
    fn from_env() -> Self {
        let rpc_url =
            env::var("SOLANA_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());
        let rpc_timeout = env::var("RPC_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let network = env::var("NETWORK_NAME").unwrap_or_else(|_| "Devnet".to_string());
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        Self {
            rpc_url,
            rpc_timeout,
            network,
            host,
            port,
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    info!("🔭 Solana Explorer API v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    info!(
        rpc_url = %config.rpc_url,
        network = %config.network,
        "Using ledger endpoint"
    );

    let rpc_config = RpcClientConfig {
        url: config.rpc_url.clone(),
        timeout: config.rpc_timeout,
    };
    let rpc_client = SolanaRpcClient::new(&rpc_config)?;
    info!("   ✓ RPC client created");

    let app_state = Arc::new(AppState::new(Arc::new(rpc_client), config.network.clone()));
    let router = create_router(app_state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🚀 Server starting on http://{}", addr);
    info!("📖 Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
