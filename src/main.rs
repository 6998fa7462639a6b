//! Video Time server: watch-progress tracking for video activities.
//!
//! Main entry point that wires all crates together and starts the server.

use std::future::IntoFuture;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinError;
use tracing_subscriber::{EnvFilter, fmt};

use videotime_api::state::Stores;
use videotime_api::{AppState, build_app};
use videotime_core::config::AppConfig;
use videotime_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `VIDEOTIME_CONFIG` or the `config/` directory.
fn load_configuration() -> Result<AppConfig, AppError> {
    match std::env::var("VIDEOTIME_CONFIG") {
        Ok(path) => AppConfig::load_from(&path),
        Err(_) => {
            let env = std::env::var("VIDEOTIME_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.is_json() {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Video Time v{}", env!("CARGO_PKG_VERSION"));

    let stores = Stores::from_config(&config).await?;
    let db = stores.db.clone();
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = AppState::build(config, stores).await?;
    tracing::info!(
        tabs = ?state.plugins.plugin_registry().tab_names().await,
        players = ?state.plugins.plugin_registry().player_names().await,
        "Plugins registered"
    );

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(address = %addr, "Video Time server listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = shutdown_rx.changed().await;
    });
    let mut handle = tokio::spawn(server.into_future());

    tokio::select! {
        result = &mut handle => return server_result(result),
        () = shutdown_signal() => {}
    }

    let _ = shutdown_tx.send(true);
    match tokio::time::timeout(grace, handle).await {
        Ok(result) => server_result(result)?,
        Err(_) => tracing::warn!(grace_seconds = grace.as_secs(), "Server did not drain in time"),
    }

    if let Some(db) = db {
        db.close().await;
    }
    tracing::info!("Video Time server stopped");
    Ok(())
}

fn server_result(result: Result<std::io::Result<()>, JoinError>) -> Result<(), AppError> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(AppError::internal(format!("Server error: {e}"))),
        Err(e) => Err(AppError::internal(format!("Server task failed: {e}"))),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
