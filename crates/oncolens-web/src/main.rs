//! OncoLens Web Server
//!
//! Run with: cargo run -p oncolens-web

use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use oncolens_common::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; RUST_LOG overrides the default level
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting OncoLens Web Server...");

    let config = Config::load()?;
    let addr: SocketAddr = config.server.bind.parse()?;
    info!(
        endpoint = %config.prediction.endpoint,
        timeout_secs = config.prediction.timeout_secs,
        policy = ?config.input.source_policy,
        "Prediction service configured"
    );

    // Create app state
    let state = oncolens_web::state::AppState::from_config(config)?;

    // Build router
    let app = oncolens_web::router::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
