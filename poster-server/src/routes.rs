//! API route handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use poster_core::{
    dimensions_for, CoordinateSpace, Dimensions, ElementConfig, ExportFormat, ExportTarget,
    OverlayState, PropertyValue, StyleMap, Theme, TransportDocument, VisualConfig,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::metrics;
use crate::validation::{
    validate_element_name, validate_import_size, validate_variant, validate_visual_type,
};
use crate::AppState;

/// `?theme=` query.
#[derive(Debug, Default, Deserialize)]
pub struct ThemeQuery {
    /// `color` (default) or `bw`.
    #[serde(default)]
    pub theme: Theme,
}

/// `?variant=&theme=` query.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigQuery {
    /// Variant to apply on top of the base layout.
    pub variant: Option<String>,
    /// `color` (default) or `bw`.
    #[serde(default)]
    pub theme: Theme,
}

/// `?format=&stem=` query.
#[derive(Debug, Default, Deserialize)]
pub struct ExportTargetQuery {
    /// Output format (defaults to PDF).
    #[serde(default)]
    pub format: ExportFormat,
    /// File name stem for the download.
    pub stem: Option<String>,
}

/// Export target plus the suggested download file name.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTargetResponse {
    /// Export parameters.
    #[serde(flatten)]
    pub target: ExportTarget,
    /// Suggested file name.
    pub file_name: String,
}

/// Body of `POST /api/style`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRequest {
    /// Visual-type key.
    pub visual_type: String,
    /// Element name.
    pub element: String,
    /// Caller overrides merged on top of the resolved config.
    pub overrides: Option<ElementConfig>,
    /// Variant to apply.
    pub variant: Option<String>,
    /// Theme to resolve against.
    #[serde(default)]
    pub theme: Theme,
    /// Coordinate space to project into.
    #[serde(default)]
    pub space: CoordinateSpace,
}

/// Projected style.
#[derive(Debug, Serialize)]
pub struct StyleResponse {
    /// camelCase style object.
    pub style: StyleMap,
    /// Same style as inline CSS.
    pub css: String,
}

/// Body of `POST /api/overlay/update`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayUpdateRequest {
    /// Visual-type key.
    pub visual_type: String,
    /// Element name.
    pub element: String,
    /// camelCase property name (`fontSize`).
    pub property: String,
    /// New value.
    pub value: PropertyValue,
    /// Theme to edit.
    #[serde(default)]
    pub theme: Theme,
}

/// Result of an overlay edit.
#[derive(Debug, Serialize)]
pub struct OverlayUpdateResponse {
    /// Element config after the edit.
    pub element: ElementConfig,
    /// Whether the edit reached durable storage.
    pub persisted: bool,
}

/// Dev overlay status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayStatus {
    /// Whether edits are accepted.
    pub dev_mode: bool,
    /// Storage namespace.
    pub namespace: String,
    /// Color overlay persistence state.
    pub color: OverlayState,
    /// Black-and-white overlay persistence state.
    pub bw: OverlayState,
}

/// Get export dimensions (poster dimensions for unknown types).
pub async fn dimensions(Path(visual_type): Path<String>) -> Result<Json<Dimensions>, ApiError> {
    validate_visual_type(&visual_type)?;
    Ok(Json(dimensions_for(&visual_type)))
}

/// Get the export target of a visual type.
pub async fn export_target(
    Path(visual_type): Path<String>,
    Query(query): Query<ExportTargetQuery>,
) -> Result<Json<ExportTargetResponse>, ApiError> {
    validate_visual_type(&visual_type)?;
    let target = ExportTarget::for_visual(&visual_type, query.format);
    let file_name = target.file_name(query.stem.as_deref().unwrap_or_default());
    Ok(Json(ExportTargetResponse { target, file_name }))
}

/// Get the resolved layout of a visual type.
pub async fn resolved_config(
    State(state): State<AppState>,
    Path(visual_type): Path<String>,
    Query(query): Query<ConfigQuery>,
) -> Result<Json<VisualConfig>, ApiError> {
    validate_visual_type(&visual_type)?;
    validate_variant(query.variant.as_deref())?;
    let config = state
        .engine()
        .resolve(&visual_type, query.variant.as_deref(), query.theme);
    Ok(Json(config))
}

/// Project an element's style.
pub async fn style(
    State(state): State<AppState>,
    Json(request): Json<StyleRequest>,
) -> Result<Json<StyleResponse>, ApiError> {
    validate_visual_type(&request.visual_type)?;
    validate_element_name(&request.element)?;
    validate_variant(request.variant.as_deref())?;

    let style = state.engine().style(
        request.space,
        &request.visual_type,
        &request.element,
        request.overrides.as_ref(),
        request.variant.as_deref(),
        request.theme,
    );
    metrics::record_style_projection(match request.space {
        CoordinateSpace::Relative => "relative",
        CoordinateSpace::Absolute => "absolute",
    });
    let css = style.to_css();
    Ok(Json(StyleResponse { style, css }))
}

/// Dev overlay status.
pub async fn overlay_status(State(state): State<AppState>) -> Json<OverlayStatus> {
    let engine = state.engine();
    let (namespace, color, bw) = engine.overlay().map_or_else(
        || (String::new(), OverlayState::Clean, OverlayState::Clean),
        |overlay| {
            (
                overlay.namespace().to_string(),
                overlay.state(Theme::Color),
                overlay.state(Theme::BlackAndWhite),
            )
        },
    );
    Json(OverlayStatus {
        dev_mode: engine.dev_mode(),
        namespace,
        color,
        bw,
    })
}

/// Edit one property in the dev overlay.
pub async fn overlay_update(
    State(state): State<AppState>,
    Json(request): Json<OverlayUpdateRequest>,
) -> Result<Json<OverlayUpdateResponse>, ApiError> {
    validate_visual_type(&request.visual_type)?;
    validate_element_name(&request.element)?;

    let mut engine = state.engine_mut();
    let applied = engine
        .update_by_name(
            &request.visual_type,
            &request.element,
            &request.property,
            request.value,
            request.theme,
        )
        .inspect_err(|_| metrics::record_overlay_edit("rejected"))?;
    if !applied {
        metrics::record_overlay_edit("disabled");
        return Err(ApiError::DevModeDisabled);
    }
    metrics::record_overlay_edit("applied");

    let element =
        engine.resolve_element(&request.visual_type, &request.element, None, request.theme);
    let persisted = engine
        .overlay()
        .is_some_and(|o| o.state(request.theme) == OverlayState::Clean);
    Ok(Json(OverlayUpdateResponse { element, persisted }))
}

/// Reset a theme's overlay to the canonical defaults.
pub async fn overlay_reset(
    State(state): State<AppState>,
    Query(query): Query<ThemeQuery>,
) -> Json<serde_json::Value> {
    let reset = state.engine_mut().reset(query.theme);
    if reset {
        metrics::record_overlay_reset(theme_label(query.theme));
    }
    Json(serde_json::json!({ "reset": reset, "theme": query.theme }))
}

/// Export one visual type's layout as a transport document.
pub async fn overlay_export(
    State(state): State<AppState>,
    Path(visual_type): Path<String>,
    Query(query): Query<ThemeQuery>,
) -> Result<Json<TransportDocument>, ApiError> {
    validate_visual_type(&visual_type)?;
    Ok(Json(state.engine().export(&visual_type, query.theme)))
}

/// Import a transport document (raw JSON body) into the overlay.
pub async fn overlay_import(
    State(state): State<AppState>,
    Query(query): Query<ThemeQuery>,
    body: String,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate_import_size(&body)?;
    let result = state.engine_mut().import(&body, query.theme);
    metrics::record_overlay_import(result.is_ok());
    let imported = result?;
    Ok(Json(serde_json::json!({ "imported": imported })))
}

fn theme_label(theme: Theme) -> &'static str {
    if theme.is_black_and_white() {
        "bw"
    } else {
        "color"
    }
}
