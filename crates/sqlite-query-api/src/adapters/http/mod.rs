mod handler;
mod params;

use std::{net::SocketAddr, sync::Arc};

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ServiceConfig,
    core::connection::Database,
    error::{AppError, AppResult},
};

/// Shared by every request: the immutable configuration and the database handle.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub db: Database,
}

pub fn run(config: ServiceConfig) -> AppResult<()> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    rt.block_on(async move {
        let state = bootstrap(config).await?;
        serve(state).await
    })
}

/// Opens the database and checks that the configured table is there.
pub async fn bootstrap(config: ServiceConfig) -> AppResult<AppState> {
    let db = Database::open(&config.db_path)?;
    tracing::info!(path = %db.db_path.display(), "opened database (read-only)");

    if !db.table_exists(config.table.clone()).await? {
        return Err(AppError::TableNotFound {
            table: config.table,
            path: db.db_path,
        });
    }

    Ok(AppState {
        config: Arc::new(config),
        db,
    })
}

/// Exactly one route, `/<table>`; method checking happens in the handler.
pub fn router(state: AppState) -> Router {
    let route = state.config.route();
    Router::new()
        .route(&route, any(handler::table_rows))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn serve(state: AppState) -> AppResult<()> {
    let port = state.config.port;
    let route = state.config.route();
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server started on port {port}");
    tracing::info!("Access at: http://localhost:{port}{route}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
