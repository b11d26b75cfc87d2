//! Prometheus metrics for poster-server.
//!
//! Provides metrics collection and a Prometheus-compatible `/metrics` endpoint.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

// Metric names as constants for consistency
const HTTP_REQUESTS_TOTAL: &str = "poster_http_requests_total";
const HTTP_REQUEST_DURATION: &str = "poster_http_request_duration_seconds";
const STYLE_PROJECTIONS_TOTAL: &str = "poster_style_projections_total";
const OVERLAY_EDITS_TOTAL: &str = "poster_overlay_edits_total";
const OVERLAY_RESETS_TOTAL: &str = "poster_overlay_resets_total";
const OVERLAY_IMPORTS_TOTAL: &str = "poster_overlay_imports_total";
const VALIDATION_FAILURES_TOTAL: &str = "poster_validation_failures_total";

/// Initialize metrics and return the Prometheus handle.
///
/// # Errors
///
/// Returns an error if the Prometheus recorder cannot be installed
/// (e.g., if another recorder is already installed).
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Record an HTTP request.
///
/// # Arguments
///
/// * `method` - HTTP method (GET, POST, etc.)
/// * `path` - Matched route template
/// * `status` - HTTP status code
/// * `duration_secs` - Request duration in seconds
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        HTTP_REQUEST_DURATION,
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

/// Middleware recording every routed request.
///
/// Uses the route template (`/api/config/{visual_type}`) rather than the raw
/// path to keep label cardinality bounded.
pub async fn track_http(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |p| p.as_str().to_string());

    let response = next.run(request).await;
    record_http_request(
        &method,
        &path,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    response
}

/// Record a style projection.
///
/// # Arguments
///
/// * `space` - "relative" or "absolute"
pub fn record_style_projection(space: &str) {
    counter!(STYLE_PROJECTIONS_TOTAL, "space" => space.to_string()).increment(1);
}

/// Record a dev overlay edit.
///
/// # Arguments
///
/// * `outcome` - "applied", "rejected" or "disabled"
pub fn record_overlay_edit(outcome: &str) {
    counter!(OVERLAY_EDITS_TOTAL, "outcome" => outcome.to_string()).increment(1);
}

/// Record an overlay reset.
pub fn record_overlay_reset(theme: &str) {
    counter!(OVERLAY_RESETS_TOTAL, "theme" => theme.to_string()).increment(1);
}

/// Record an overlay import.
///
/// # Arguments
///
/// * `success` - Whether the document was imported
pub fn record_overlay_import(success: bool) {
    counter!(OVERLAY_IMPORTS_TOTAL, "success" => success.to_string()).increment(1);
}

/// Record an input validation failure.
///
/// # Arguments
///
/// * `validation_type` - What failed validation (element, variant, visual_type, import)
pub fn record_validation_failure(validation_type: &str) {
    counter!(
        VALIDATION_FAILURES_TOTAL,
        "type" => validation_type.to_string()
    )
    .increment(1);
}
