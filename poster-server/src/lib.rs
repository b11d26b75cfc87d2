//! # Poster Server Library
//!
//! HTTP surface over the poster layout engine, used by the dev-tuning UI.
//! This library is used by both the binary and integration tests.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use poster_core::{LayoutEngine, OverlayBackend};

pub mod config;
pub mod error;
pub mod health;
pub mod metrics;
pub mod routes;
pub mod validation;

pub use config::{CliArgs, ServerConfig, DEFAULT_PORT};
pub use error::ApiError;

/// Overlay backend chosen at startup.
pub type DynBackend = Box<dyn OverlayBackend + Send + Sync>;

/// Layout engine as served.
pub type ServerEngine = LayoutEngine<DynBackend>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<RwLock<ServerEngine>>,
}

impl AppState {
    /// Wrap an engine for sharing across handlers.
    #[must_use]
    pub fn new(engine: ServerEngine) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }

    /// Read access to the engine.
    pub fn engine(&self) -> RwLockReadGuard<'_, ServerEngine> {
        self.engine.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access to the engine.
    pub fn engine_mut(&self) -> RwLockWriteGuard<'_, ServerEngine> {
        self.engine.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Build the API and health router.
///
/// The `/metrics` endpoint and transport layers (CORS, tracing, request ids)
/// are added by the binary.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/api/dimensions/{visual_type}", get(routes::dimensions))
        .route(
            "/api/export-target/{visual_type}",
            get(routes::export_target),
        )
        .route("/api/config/{visual_type}", get(routes::resolved_config))
        .route("/api/style", post(routes::style))
        .route("/api/overlay/status", get(routes::overlay_status))
        .route("/api/overlay/update", post(routes::overlay_update))
        .route("/api/overlay/reset", post(routes::overlay_reset))
        .route(
            "/api/overlay/export/{visual_type}",
            get(routes::overlay_export),
        )
        .route("/api/overlay/import", post(routes::overlay_import))
        .route_layer(middleware::from_fn(metrics::track_http))
        .with_state(state)
}
