//! Health check endpoints.
//!
//! - `/health/live` - Liveness probe (restart if fails)
//! - `/health/ready` - Readiness probe (remove from LB if fails)

use axum::{extract::State, http::StatusCode, Json};
use poster_core::{ConfigSource, Theme};
use serde::Serialize;

use crate::AppState;

/// Health status response.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Overall status: "healthy" or "unhealthy"
    pub status: &'static str,
    /// Server version
    pub version: &'static str,
    /// Whether dev-mode editing is on
    pub dev_mode: bool,
    /// Individual component checks
    pub checks: HealthChecks,
}

/// Individual health checks.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// Color layouts loaded
    pub color_config: bool,
    /// Black-and-white layouts loaded
    pub bw_config: bool,
}

/// Liveness probe - is the server running?
#[tracing::instrument(name = "liveness_probe")]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe - can the engine serve layouts?
///
/// A canonical document that degraded to empty at load time makes the
/// server unready.
#[tracing::instrument(name = "readiness_probe", skip(state))]
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let engine = state.engine();
    let store = engine.store();
    let checks = HealthChecks {
        color_config: !store.document(Theme::Color).visuals.is_empty(),
        bw_config: !store.document(Theme::BlackAndWhite).visuals.is_empty(),
    };
    let all_ok = checks.color_config && checks.bw_config;

    let status = HealthStatus {
        status: if all_ok { "healthy" } else { "unhealthy" },
        version: env!("CARGO_PKG_VERSION"),
        dev_mode: engine.dev_mode(),
        checks,
    };

    let code = if all_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(status))
}
