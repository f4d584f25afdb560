//! HTTP front door: renders whatever snapshot is current on every request.

pub mod render;

use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::app::Result;
use crate::store::SnapshotStore;

/// Front door configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on (default: 0.0.0.0:9060)
    pub bind: String,

    /// Heading and <title> of the page
    pub page_title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:9060".to_string(),
            page_title: "Top Stories".to_string(),
        }
    }
}

#[derive(Clone)]
struct ServerState {
    store: SnapshotStore,
    page_title: Arc<str>,
}

pub fn router(store: SnapshotStore, config: &ServerConfig) -> Router {
    let state = ServerState {
        store,
        page_title: Arc::from(config.page_title.as_str()),
    };

    Router::new()
        .route("/", get(index))
        .route("/api/snapshot", get(snapshot))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves until `shutdown` is cancelled.
pub async fn serve(
    store: SnapshotStore,
    config: &ServerConfig,
    shutdown: CancellationToken,
) -> Result<()> {
    let listener = TcpListener::bind(&config.bind).await?;
    info!("Serving on http://{}", listener.local_addr()?);

    axum::serve(listener, router(store, config))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    Ok(())
}

async fn index(State(state): State<ServerState>) -> Html<String> {
    let snapshot = state.store.current();
    Html(render::page(&snapshot, &state.page_title, Utc::now()))
}

async fn snapshot(State(state): State<ServerState>) -> Response {
    let snapshot = state.store.current();
    Json(&*snapshot).into_response()
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: u64,
    items: usize,
}

async fn health(State(state): State<ServerState>) -> Json<Health> {
    let snapshot = state.store.current();
    Json(Health {
        status: "ok",
        version: snapshot.version,
        items: snapshot.len(),
    })
}
