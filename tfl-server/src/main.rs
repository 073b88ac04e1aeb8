use std::net::SocketAddr;
use std::sync::Arc;

use tfl_server::cache::{CacheConfig, CachedLineProvider, LineCache};
use tfl_server::tfl::{TflClient, TflConfig};
use tfl_server::web::{AppState, create_router};
use tracing_subscriber::EnvFilter;

/// Address used when `LISTEN_ADDR` is not set.
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Credentials, modes and base URL come from the environment
    let tfl_config = TflConfig::from_env().expect("Invalid TfL configuration");
    tracing::info!(
        base_url = %tfl_config.base_url,
        modes = %tfl_config.supported_modes.join(","),
        "configured TfL client"
    );
    let tfl_client = TflClient::new(tfl_config).expect("Failed to create TfL client");

    // Process-wide cache; the provider only owns the client
    let cache = LineCache::new(&CacheConfig::default());
    let provider = Arc::new(CachedLineProvider::new(tfl_client, cache));

    let app = create_router(AppState::new(provider.clone()));

    let addr: SocketAddr = std::env::var("LISTEN_ADDR")
        .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
        .parse()
        .expect("LISTEN_ADDR must be a socket address");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!("TfL line server listening on http://{addr}");
    tracing::info!("  GET  /health     - Health check");
    tracing::info!("  GET  /api/lines  - Current lines");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    provider.close();
}

/// Resolves on Ctrl-C. Never resolves if the signal handler cannot be installed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
