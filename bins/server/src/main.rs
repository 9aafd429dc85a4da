//! Kapsa API Server
//!
//! Main entry point for the Kapsa backend service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kapsa_api::{AppState, create_router};
use kapsa_core::points::{AwardDispatcher, MemoryPointsStore, PointsLedger, PointsStore};
use kapsa_db::{PointsRepository, PoolOptions, connect};
use kapsa_shared::{AppConfig, JwtConfig, JwtService, PointsStoreKind};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kapsa=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect(
        &config.database.url,
        PoolOptions {
            max_connections: config.database.max_connections,
            min_connections: config.database.min_connections,
        },
    )
    .await
    .context("Failed to connect to database")?;

    let jwt_service = JwtService::new(JwtConfig::from(&config.jwt));

    let store: Arc<dyn PointsStore> = match config.points.store {
        PointsStoreKind::Postgres => Arc::new(PointsRepository::new(db.clone())),
        PointsStoreKind::Memory => Arc::new(MemoryPointsStore::new()),
    };
    info!(store = ?config.points.store, "Points store configured");

    let ledger = Arc::new(PointsLedger::new(store));
    let (awards, worker) =
        AwardDispatcher::channel(Arc::clone(&ledger), config.points.queue_capacity);
    let worker_handle = tokio::spawn(worker.run());

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        ledger,
        awards,
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    // The router owns the last dispatcher handles; once it is dropped the
    // worker drains the queue and exits.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let stats = worker_handle.await.context("Award worker panicked")?;
    info!(
        applied = stats.applied,
        failed = stats.failed,
        "Server stopped"
    );

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
