use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use items_api_rust::app::app;
use items_api_rust::auth::{Argon2Hasher, PasswordHasher};
use items_api_rust::cli::{ServeArgs, StorageKind};
use items_api_rust::config;
use items_api_rust::database::DatabaseManager;
use items_api_rust::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, APP_ENV, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = ServeArgs::parse();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Items API in {:?} mode", config.environment);

    let hasher: Arc<dyn PasswordHasher> = Arc::new(
        Argon2Hasher::from_config(&config.security).context("invalid password hashing config")?,
    );

    let state = match args.storage {
        StorageKind::Postgres => {
            let database = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            if config.database.run_migrations && !args.skip_migrations {
                database.migrate().await.context("failed to apply migrations")?;
            }
            AppState::postgres(database, hasher)?
        }
        StorageKind::Memory => {
            tracing::warn!("Using in-memory storage; all data is lost on exit");
            AppState::memory(hasher)?
        }
    };

    let router = app(state.clone(), config);

    let bind_addr = args.bind_addr(&config.api);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Items API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(database) = &state.database {
        database.close().await;
    }
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
