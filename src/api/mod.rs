pub mod dividend;
pub mod error;

use anyhow::Result;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::fetch::PageFetcher;

pub use error::ApiError;

/// Shared application state, handed to route handlers via `axum::extract::State`.
pub struct AppState {
    pub config: ServerConfig,
    pub fetcher: PageFetcher,
}

impl AppState {
    /// Needs a tokio runtime: the fetcher spawns its throttle task.
    pub fn new(config: ServerConfig) -> Result<Arc<Self>> {
        let fetcher = PageFetcher::new(&config.upstream_url, config.min_spacing, config.fetch_timeout)?;
        Ok(Arc::new(Self { config, fetcher }))
    }
}

/// Assemble the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/dividend", get(dividend::api_dividend))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
