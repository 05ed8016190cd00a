//! Axum HTTP API server for skin analysis.
//!
//! This crate provides:
//! - Image upload and skin report endpoints
//! - An in-memory cache of recent results
//! - Security headers, request ids and Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::{AnalyzeOutcome, SkinAnalyzer};
pub use state::AppState;
