//! Result cache administration.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::metrics;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ClearCacheResponse {
    pub message: String,
    pub cleared: usize,
}

/// Drop every cached analysis result.
pub async fn clear_cache(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let cleared = state.cache.clear().await;
    metrics::set_cache_size(0);
    info!(cleared, "Result cache cleared");

    Json(ClearCacheResponse {
        message: "Cache cleared".to_string(),
        cleared,
    })
}
