//! Prometheus metrics for the API server.

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "skinsight_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "skinsight_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "skinsight_http_requests_in_flight";

    // Analysis metrics
    pub const ANALYSES_TOTAL: &str = "skinsight_analyses_total";
    pub const DETECTOR_ATTEMPTS_TOTAL: &str = "skinsight_detector_attempts_total";
    pub const DETECTOR_DURATION_SECONDS: &str = "skinsight_detector_duration_seconds";

    // Cache metrics
    pub const CACHE_LOOKUPS_TOTAL: &str = "skinsight_cache_lookups_total";
    pub const CACHE_ENTRIES: &str = "skinsight_cache_entries";
}

/// Routes reported with their own label; anything else is "other".
const KNOWN_PATHS: &[&str] = &["/", "/analyze/skin", "/health", "/healthz", "/clear-cache", "/metrics"];

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record the end of an analysis request ("analyzed", "cached", "rejected", or a failure reason).
pub fn record_analysis(outcome: &str) {
    let labels = [("outcome", outcome.to_string())];
    counter!(names::ANALYSES_TOTAL, &labels).increment(1);
}

/// Record one detector call.
pub fn record_detector_attempt(outcome: &str, duration_secs: f64) {
    let labels = [("outcome", outcome.to_string())];
    counter!(names::DETECTOR_ATTEMPTS_TOTAL, &labels).increment(1);
    histogram!(names::DETECTOR_DURATION_SECONDS).record(duration_secs);
}

/// Record a cache lookup.
pub fn record_cache_lookup(hit: bool) {
    let labels = [("result", if hit { "hit" } else { "miss" }.to_string())];
    counter!(names::CACHE_LOOKUPS_TOTAL, &labels).increment(1);
}

/// Update cache size gauge.
pub fn set_cache_size(entries: usize) {
    gauge!(names::CACHE_ENTRIES).set(entries as f64);
}

/// Collapse unknown paths so scanners can't blow up label cardinality.
fn sanitize_path(path: &str) -> String {
    if KNOWN_PATHS.contains(&path) {
        path.to_string()
    } else {
        "other".to_string()
    }
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
