mod api;
mod config;
mod errors;
mod models;
mod prover;
mod state;

use crate::config::AppConfig;
use crate::errors::StartupError;
use crate::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();

    let state = AppState::load(&config)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to start server"))?;

    let static_dir = config.static_dir.is_dir().then_some(config.static_dir.as_path());
    let app = api::router(state, static_dir);

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .map_err(StartupError::Bind)?;

    tracing::info!(addr = %config.addr, "crowdfund backend listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
