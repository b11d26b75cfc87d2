//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use poster_core::LayoutError;
use thiserror::Error;

use crate::metrics;
use crate::validation::ValidationError;

/// Errors returned by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The engine rejected the request.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Overlay edits need dev mode.
    #[error("dev mode is disabled")]
    DevModeDisabled,
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::Layout(
                LayoutError::UnknownProperty(_)
                | LayoutError::InvalidValue { .. }
                | LayoutError::Import(_),
            ) => StatusCode::BAD_REQUEST,
            Self::Layout(LayoutError::Serialization(_) | LayoutError::Storage(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::DevModeDisabled => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Validation(e) => {
                metrics::record_validation_failure(e.kind());
                tracing::debug!("Rejected request: {e}");
            }
            _ if status.is_server_error() => tracing::error!("Request failed: {self}"),
            _ => tracing::debug!("Rejected request: {self}"),
        }
        (
            status,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
