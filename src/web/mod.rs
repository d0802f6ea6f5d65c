//! JSON API over the same kind of store the terminal form uses. Records posted here are kept
//! verbatim, nothing is validated beyond being well formed JSON.

pub mod handlers;
pub mod shutdown;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::tracker::store::{CategoryLayout, RecordStore};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
        }
    }
}

/// Shared router state. Each server instance owns exactly one store.
#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<RecordStore<Value>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(RecordStore::new(CategoryLayout::Flat))),
        }
    }

    pub async fn record_count(&self) -> usize {
        self.store.read().await.len()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/add", post(handlers::add_workout))
        .route("/view", get(handlers::view_workouts))
        .with_state(state)
}

/// Serves on an already bound listener until `shutdown` is cancelled.
pub async fn serve_on(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<()> {
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;
    info!("Server stopped");
    Ok(())
}

pub async fn serve(config: ServerConfig, shutdown: CancellationToken) -> Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    serve_on(listener, AppState::new(), shutdown).await
}
