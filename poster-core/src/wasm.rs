//! WebAssembly bindings for the browser editor.
//!
//! Exposes the layout engine to JavaScript with the dev overlay persisted in
//! `window.localStorage`. Structured results cross the boundary as JSON
//! strings.

use wasm_bindgen::prelude::*;

use crate::overlay::DEFAULT_NAMESPACE;
use crate::{
    dimensions_for, ConfigStore, ElementConfig, ExportFormat, ExportTarget, LayoutEngine,
    LayoutError, OverlayBackend, PropertyValue, StorageError, Theme,
};

/// Initialize the layout WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Export dimensions of a visual type as JSON.
#[wasm_bindgen(js_name = getDimensionsJson)]
#[must_use]
pub fn get_dimensions_json(visual_type: &str) -> String {
    serde_json::to_string(&dimensions_for(visual_type)).unwrap_or_default()
}

/// Export target of a visual type as JSON.
///
/// # Errors
///
/// Returns an error string for an unsupported format.
#[wasm_bindgen(js_name = getExportTargetJson)]
pub fn get_export_target_json(visual_type: &str, format: &str) -> Result<String, String> {
    let format: ExportFormat = format.parse().map_err(|e: LayoutError| e.to_string())?;
    serde_json::to_string(&ExportTarget::for_visual(visual_type, format)).map_err(|e| e.to_string())
}

/// Overlay backend over the browser's `localStorage`.
#[derive(Debug, Clone, Default)]
pub struct LocalStorageBackend {
    storage: Option<web_sys::Storage>,
}

impl LocalStorageBackend {
    /// Attach to `window.localStorage`; storage may be unavailable in private
    /// browsing or sandboxed frames.
    #[must_use]
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            tracing::warn!("localStorage unavailable, overlay edits will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StorageError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage".to_string()))
    }
}

fn js_error(e: &JsValue) -> StorageError {
    StorageError::Unavailable(format!("{e:?}"))
}

impl OverlayBackend for LocalStorageBackend {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(|e| js_error(&e))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(|e| js_error(&e))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(|e| js_error(&e))
    }
}

/// Layout engine instance for WASM.
#[wasm_bindgen]
pub struct WasmLayout {
    engine: LayoutEngine<LocalStorageBackend>,
}

#[wasm_bindgen]
#[allow(clippy::needless_pass_by_value)]
impl WasmLayout {
    /// Create an engine over the built-in layouts.
    ///
    /// `namespace` defaults to `poster`.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(namespace: Option<String>, dev_mode: bool) -> Self {
        let namespace = namespace.unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        Self {
            engine: LayoutEngine::with_overlay(
                ConfigStore::builtin(),
                LocalStorageBackend::new(),
                namespace,
                dev_mode,
            ),
        }
    }

    /// Whether dev-mode editing is on.
    #[wasm_bindgen(js_name = isDevMode)]
    #[must_use]
    pub fn is_dev_mode(&self) -> bool {
        self.engine.dev_mode()
    }

    /// Turn dev-mode editing on or off.
    #[wasm_bindgen(js_name = setDevMode)]
    pub fn set_dev_mode(&mut self, enabled: bool) {
        self.engine.set_dev_mode(enabled);
    }

    /// Resolved layout of a visual type as JSON.
    #[wasm_bindgen(js_name = resolveJson)]
    #[must_use]
    pub fn resolve_json(&self, visual_type: &str, variant: Option<String>, bw: bool) -> String {
        let config = self
            .engine
            .resolve(visual_type, variant.as_deref(), Theme::from(bw));
        serde_json::to_string(&config).unwrap_or_default()
    }

    /// Preview style of an element as a JSON style object.
    ///
    /// # Errors
    ///
    /// Returns an error string if `overrides_json` is not a valid element
    /// config.
    #[wasm_bindgen(js_name = relativeStyleJson)]
    pub fn relative_style_json(
        &self,
        visual_type: &str,
        element: &str,
        overrides_json: Option<String>,
        variant: Option<String>,
        bw: bool,
    ) -> Result<String, String> {
        let overrides = parse_overrides(overrides_json.as_deref())?;
        let style = self.engine.relative_style(
            visual_type,
            element,
            overrides.as_ref(),
            variant.as_deref(),
            Theme::from(bw),
        );
        serde_json::to_string(&style).map_err(|e| e.to_string())
    }

    /// Export style of an element as a JSON style object.
    ///
    /// # Errors
    ///
    /// Returns an error string if `overrides_json` is not a valid element
    /// config.
    #[wasm_bindgen(js_name = absoluteStyleJson)]
    pub fn absolute_style_json(
        &self,
        visual_type: &str,
        element: &str,
        overrides_json: Option<String>,
        variant: Option<String>,
        bw: bool,
    ) -> Result<String, String> {
        let overrides = parse_overrides(overrides_json.as_deref())?;
        let style = self.engine.absolute_style(
            visual_type,
            element,
            overrides.as_ref(),
            variant.as_deref(),
            Theme::from(bw),
        );
        serde_json::to_string(&style).map_err(|e| e.to_string())
    }

    /// Set one property in the dev overlay; `value_json` is a JSON number or
    /// string. Returns whether the edit was applied.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown property or mistyped value.
    #[wasm_bindgen(js_name = updateProperty)]
    pub fn update_property(
        &mut self,
        visual_type: &str,
        element: &str,
        property: &str,
        value_json: &str,
        bw: bool,
    ) -> Result<bool, String> {
        let value = parse_value(value_json)?;
        self.engine
            .update_by_name(visual_type, element, property, value, Theme::from(bw))
            .map_err(|e| e.to_string())
    }

    /// Revert a theme's overlay to the built-in layouts.
    #[wasm_bindgen(js_name = resetOverlay)]
    pub fn reset_overlay(&mut self, bw: bool) {
        self.engine.reset(Theme::from(bw));
    }

    /// Transport document for one visual type.
    ///
    /// # Errors
    ///
    /// Returns an error string if serialization fails.
    #[wasm_bindgen(js_name = exportOverlay)]
    pub fn export_overlay(&self, visual_type: &str, bw: bool) -> Result<String, String> {
        self.engine
            .export(visual_type, Theme::from(bw))
            .to_json()
            .map_err(|e| e.to_string())
    }

    /// Import a transport document. Returns the number of visual types
    /// imported.
    ///
    /// # Errors
    ///
    /// Returns an error string if the document cannot be parsed; the overlay
    /// is left unchanged.
    #[wasm_bindgen(js_name = importOverlay)]
    pub fn import_overlay(&mut self, json: &str, bw: bool) -> Result<usize, String> {
        self.engine
            .import(json, Theme::from(bw))
            .map_err(|e| e.to_string())
    }
}

fn parse_overrides(json: Option<&str>) -> Result<Option<ElementConfig>, String> {
    json.filter(|s| !s.trim().is_empty())
        .map(|s| serde_json::from_str(s).map_err(|e| format!("Invalid overrides: {e}")))
        .transpose()
}

fn parse_value(json: &str) -> Result<PropertyValue, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid property value: {e}"))
}
