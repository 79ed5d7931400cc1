//! ChaosCart HTTP Server
//!
//! Main entry point for the demo order service with the embedded chaos
//! injection engine.

use infrastructure::AppConfig;
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "chaoscart_server=debug,presentation_http=debug,infrastructure=debug,tower_http=debug".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("ChaosCart v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load and validate configuration; a bad chaos section fails the boot.
    let config = AppConfig::load()?;

    info!(
        host = %config.server.host,
        port = %config.server.port,
        chaos_enabled = config.chaos.enabled,
        endpoints = config.chaos.endpoints.len(),
        scenarios = config.chaos.scenarios.len(),
        "Configuration loaded"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Build state and router; the chaos interceptor is wired inside.
    let state = AppState::new(config);
    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    // Ignore the error: if the signal handler cannot be installed the
    // server simply runs until killed.
    let _ = signal::ctrl_c().await;
    info!("Shutdown signal received");
}
