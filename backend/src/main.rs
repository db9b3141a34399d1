//! MacroMasters Backend
//!
//! Onboarding, profile and nutrition-plan service.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Services: onboarding workflow, profile recalculation, stats
//! - Repositories: user record storage (in-memory or PostgreSQL)
//! - Shared crate: the pure calculator

use anyhow::Result;
use macromasters_backend::config::{self, StorageBackend};
use macromasters_backend::repositories::{InMemoryUserStore, PgUserStore, UserStore};
use macromasters_backend::{db, routes, state::AppState};
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        storage = ?config.storage.backend,
        "Starting MacroMasters Backend"
    );

    let store = create_store(&config).await?;
    let state = AppState::new(store, config.clone());

    let app = routes::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Build the configured user store
async fn create_store(config: &config::AppConfig) -> Result<Arc<dyn UserStore>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            if config::AppConfig::is_production() {
                warn!("Using in-memory storage in production; user data will not survive a restart");
            }
            Ok(Arc::new(InMemoryUserStore::new()))
        }
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = db::create_pool(&config.database).await?;

            // Skipped in production, where a separate migration job runs
            if !config::AppConfig::is_production() {
                db::run_migrations(&pool).await?;
            }

            Ok(Arc::new(PgUserStore::new(pool)))
        }
    }
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "macromasters_backend=info,tower_http=info".into()
        } else {
            "macromasters_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Graceful shutdown signal handler
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
