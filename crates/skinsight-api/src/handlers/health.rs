//! Health check handlers.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

/// Banner returned at the root path.
#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Unix seconds.
    pub timestamp: f64,
    pub cache_size: usize,
}

/// Service banner.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Skincare Analyzer Backend is running!".to_string(),
    })
}

/// Health check endpoint (liveness probe).
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().timestamp_millis() as f64 / 1000.0,
        cache_size: state.cache.len().await,
    })
}
