//! Startup sequencing.
//!
//! The order is an invariant: connect, sync the schema, build the registry,
//! and only then bind the listener. The router does not exist until sync has
//! resolved, so no request can ever observe an unsynced database.

use crate::config::Config;
use crate::db::Store;
use crate::error::AtriumError;
use crate::graphql::build_schema;
use crate::registry::{ModelRegistry, catalog::CATALOG};
use crate::router::{AtriumState, atrium_router};
use axum::Router;
use backon::{ExponentialBuilder, Retryable};
use sqlx::SqlitePool;
use std::{net::SocketAddr, sync::Arc, sync::LazyLock, time::Duration};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

static SCHEMA_SYNC_RETRY_POLICY: LazyLock<ExponentialBuilder> = LazyLock::new(|| {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(100))
        .with_max_delay(Duration::from_millis(500))
        .with_max_times(3)
        .with_jitter()
});

/// Reconciles the live database with the model catalog by executing every
/// descriptor's DDL. Idempotent; retried under a bounded backoff policy and
/// fatal once the attempt budget is spent.
pub async fn sync_schema(store: &Store) -> Result<(), AtriumError> {
    (|| async { apply_ddl(store.pool()).await })
        .retry(&*SCHEMA_SYNC_RETRY_POLICY)
        .when(AtriumError::is_retryable)
        .notify(|err, dur: Duration| {
            warn!("schema sync retrying after error {} in {:?}", err, dur);
        })
        .await?;

    info!(models = CATALOG.len(), "database schema synchronized");
    Ok(())
}

async fn apply_ddl(pool: &SqlitePool) -> Result<(), AtriumError> {
    for desc in CATALOG {
        for stmt in desc.ddl.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(pool).await?;
        }
    }
    Ok(())
}

/// Runs the full pre-listen sequence and returns the ready-to-serve router
/// together with the built registry.
pub async fn prepare(cfg: &Config) -> Result<(Router, Arc<ModelRegistry>), AtriumError> {
    let profile = cfg.database()?;
    let store = Store::connect(&profile.url()).await?;

    sync_schema(&store).await?;

    let registry = Arc::new(ModelRegistry::build(&store, CATALOG).await?);
    let schema = build_schema(registry.clone());
    let app = atrium_router(AtriumState::new(schema));

    Ok((app, registry))
}

/// Prepares, binds, and serves until shutdown, then closes the store.
pub async fn run(cfg: &Config) -> Result<(), AtriumError> {
    let (app, registry) = prepare(cfg).await?;

    let addr = SocketAddr::from((cfg.listen_addr, cfg.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("GraphQL server ready at http://{addr}/graphql");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    registry.store().close().await;
    info!("Server has shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { /* ... */ },
        _ = terminate => { /* ... */ },
    }
}
