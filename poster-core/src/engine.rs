//! Session-scoped layout engine.
//!
//! The engine owns the canonical [`ConfigStore`] and an optional
//! [`DevOverlay`]. Reads go through whichever source is active: the overlay
//! while it exists and dev mode is on, the canonical store otherwise.

use crate::overlay::DevOverlay;
use crate::resolver::{resolve, resolve_element};
use crate::style::{CoordinateSpace, StyleMap, StyleProjector};
use crate::{
    ConfigDocument, ConfigSource, ConfigStore, ElementConfig, ElementProperty, LayoutError,
    LayoutResult, OverlayBackend, PropertyValue, Theme, TransportDocument, VisualConfig,
};

/// Layout engine for one editing session.
#[derive(Debug)]
pub struct LayoutEngine<B: OverlayBackend> {
    store: ConfigStore,
    overlay: Option<DevOverlay<B>>,
}

impl<B: OverlayBackend> LayoutEngine<B> {
    /// Engine reading only the canonical documents.
    #[must_use]
    pub fn new(store: ConfigStore) -> Self {
        Self {
            store,
            overlay: None,
        }
    }

    /// Engine with a dev overlay persisted through `backend`.
    #[must_use]
    pub fn with_overlay(
        store: ConfigStore,
        backend: B,
        namespace: impl Into<String>,
        dev_mode: bool,
    ) -> Self {
        let overlay = DevOverlay::initialize(store.clone(), backend, namespace, dev_mode);
        Self {
            store,
            overlay: Some(overlay),
        }
    }

    /// Canonical documents.
    #[must_use]
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// The dev overlay, if configured.
    #[must_use]
    pub fn overlay(&self) -> Option<&DevOverlay<B>> {
        self.overlay.as_ref()
    }

    /// Mutable access to the dev overlay, if configured.
    pub fn overlay_mut(&mut self) -> Option<&mut DevOverlay<B>> {
        self.overlay.as_mut()
    }

    /// Whether dev-mode editing is on.
    #[must_use]
    pub fn dev_mode(&self) -> bool {
        self.overlay.as_ref().is_some_and(DevOverlay::is_enabled)
    }

    /// Turn dev mode on or off. Returns `false` when no overlay is configured.
    pub fn set_dev_mode(&mut self, enabled: bool) -> bool {
        match self.overlay.as_mut() {
            Some(overlay) => {
                overlay.set_enabled(enabled);
                tracing::info!("Dev mode {}", if enabled { "enabled" } else { "disabled" });
                true
            }
            None => false,
        }
    }

    fn active(&self) -> &dyn ConfigSource {
        match &self.overlay {
            Some(overlay) if overlay.is_enabled() => overlay,
            _ => &self.store,
        }
    }

    /// Resolved layout of a visual type.
    #[must_use]
    pub fn resolve(&self, visual_type: &str, variant: Option<&str>, theme: Theme) -> VisualConfig {
        resolve(self.active(), visual_type, variant, theme)
    }

    /// Resolved configuration of one element.
    #[must_use]
    pub fn resolve_element(
        &self,
        visual_type: &str,
        element: &str,
        variant: Option<&str>,
        theme: Theme,
    ) -> ElementConfig {
        resolve_element(self.active(), visual_type, element, variant, theme)
    }

    /// Style of an element in the given coordinate space.
    #[must_use]
    pub fn style(
        &self,
        space: CoordinateSpace,
        visual_type: &str,
        element: &str,
        overrides: Option<&ElementConfig>,
        variant: Option<&str>,
        theme: Theme,
    ) -> StyleMap {
        StyleProjector::new(self.active()).style(
            space,
            visual_type,
            element,
            overrides,
            variant,
            theme,
        )
    }

    /// Percentage-based style for the live preview.
    #[must_use]
    pub fn relative_style(
        &self,
        visual_type: &str,
        element: &str,
        overrides: Option<&ElementConfig>,
        variant: Option<&str>,
        theme: Theme,
    ) -> StyleMap {
        self.style(
            CoordinateSpace::Relative,
            visual_type,
            element,
            overrides,
            variant,
            theme,
        )
    }

    /// Pixel-based style for export rendering.
    #[must_use]
    pub fn absolute_style(
        &self,
        visual_type: &str,
        element: &str,
        overrides: Option<&ElementConfig>,
        variant: Option<&str>,
        theme: Theme,
    ) -> StyleMap {
        self.style(
            CoordinateSpace::Absolute,
            visual_type,
            element,
            overrides,
            variant,
            theme,
        )
    }

    /// Edit one property in the dev overlay.
    ///
    /// Returns `Ok(false)` when there is no overlay or dev mode is off.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidValue`] if the value does not fit the
    /// property.
    pub fn update(
        &mut self,
        visual_type: &str,
        element: &str,
        property: ElementProperty,
        value: PropertyValue,
        theme: Theme,
    ) -> LayoutResult<bool> {
        match self.overlay.as_mut() {
            Some(overlay) => overlay.update(visual_type, element, property, value, theme),
            None => Ok(false),
        }
    }

    /// Edit one property by name in the dev overlay.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownProperty`] for a name outside the element
    /// schema, or [`LayoutError::InvalidValue`] for a mistyped value.
    pub fn update_by_name(
        &mut self,
        visual_type: &str,
        element: &str,
        property: &str,
        value: PropertyValue,
        theme: Theme,
    ) -> LayoutResult<bool> {
        let property: ElementProperty = property.parse()?;
        self.update(visual_type, element, property, value, theme)
    }

    /// Revert a theme's overlay to the canonical defaults.
    ///
    /// Returns `false` when there is no overlay.
    pub fn reset(&mut self, theme: Theme) -> bool {
        match self.overlay.as_mut() {
            Some(overlay) => {
                overlay.reset(theme);
                true
            }
            None => false,
        }
    }

    /// Package the active layout of one visual type for sharing.
    #[must_use]
    pub fn export(&self, visual_type: &str, theme: Theme) -> TransportDocument {
        match &self.overlay {
            Some(overlay) => overlay.export(visual_type, theme),
            None => TransportDocument::single(
                visual_type,
                self.store
                    .document(theme)
                    .visual(visual_type)
                    .cloned()
                    .unwrap_or_default(),
            ),
        }
    }

    /// Import a transport document into the dev overlay.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Import`] if the text cannot be parsed or no
    /// overlay is configured.
    pub fn import(&mut self, json: &str, theme: Theme) -> LayoutResult<usize> {
        match self.overlay.as_mut() {
            Some(overlay) => overlay.import(json, theme),
            None => Err(LayoutError::Import("no dev overlay configured".to_string())),
        }
    }
}

impl<B: OverlayBackend> ConfigSource for LayoutEngine<B> {
    fn document(&self, theme: Theme) -> &ConfigDocument {
        self.active().document(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::DOWNLOAD_VARIANT;
    use crate::style::StyleValue;
    use crate::{dimensions_for, MemoryBackend};

    fn engine(dev_mode: bool) -> (LayoutEngine<MemoryBackend>, MemoryBackend) {
        let backend = MemoryBackend::new();
        let engine =
            LayoutEngine::with_overlay(ConfigStore::builtin(), backend.clone(), "poster", dev_mode);
        (engine, backend)
    }

    #[test]
    fn builtin_poster_download_variant_enlarges_title() {
        let (engine, _) = engine(false);
        let base = engine.resolve_element("poster", "title", None, Theme::Color);
        let download = engine.resolve_element("poster", "title", Some(DOWNLOAD_VARIANT), Theme::Color);
        assert_eq!(download.font_size, Some(104.0));
        assert_eq!(download.top, base.top);
        assert_eq!(download.left, base.left);
    }

    #[test]
    fn edits_visible_only_while_dev_mode_on() {
        let (mut engine, _) = engine(true);
        engine
            .update("poster", "title", ElementProperty::Top, 33.0.into(), Theme::Color)
            .expect("update");
        assert_eq!(engine.resolve_element("poster", "title", None, Theme::Color).top, Some(33.0));

        assert!(engine.set_dev_mode(false));
        let canonical = engine
            .store()
            .document(Theme::Color)
            .visual("poster")
            .expect("poster")["title"]
            .top;
        assert_eq!(engine.resolve_element("poster", "title", None, Theme::Color).top, canonical);
    }

    #[test]
    fn update_without_overlay_is_noop() {
        let mut engine: LayoutEngine<MemoryBackend> = LayoutEngine::new(ConfigStore::builtin());
        assert!(!engine.dev_mode());
        assert!(!engine.set_dev_mode(true));
        let applied = engine
            .update("poster", "title", ElementProperty::Top, 1.0.into(), Theme::Color)
            .expect("update");
        assert!(!applied);
        assert!(!engine.reset(Theme::Color));
        assert!(matches!(engine.import("{}", Theme::Color), Err(LayoutError::Import(_))));
    }

    #[test]
    fn disabled_overlay_rejects_edits() {
        let (mut engine, backend) = engine(false);
        let applied = engine
            .update_by_name("story", "title", "fontSize", 10.0.into(), Theme::Color)
            .expect("update");
        assert!(!applied);
        assert!(!backend.contains("poster_configs"));
    }

    #[test]
    fn absolute_style_reflects_overlay_edit() {
        let (mut engine, _) = engine(true);
        engine
            .update("poster", "title", ElementProperty::Top, 10.0.into(), Theme::Color)
            .expect("update");
        let style = engine.absolute_style("poster", "title", None, None, Theme::Color);
        let top = style.get("top").and_then(StyleValue::number).expect("top");
        assert!((top - 496.1).abs() < 1e-6);
        let relative = engine.relative_style("poster", "title", None, None, Theme::Color);
        assert_eq!(relative.get("top"), Some(&StyleValue::Percent(10.0)));
    }

    #[test]
    fn export_without_overlay_reads_store() {
        let engine: LayoutEngine<MemoryBackend> = LayoutEngine::new(ConfigStore::builtin());
        let doc = engine.export("story", Theme::BlackAndWhite);
        assert!(doc.get("story").is_some_and(|c| !c.is_empty()));
    }

    #[test]
    fn unknown_type_resolves_empty_with_poster_dimensions() {
        let (engine, _) = engine(true);
        assert!(engine.resolve("nonexistent-type", None, Theme::Color).is_empty());
        assert!(engine.relative_style("nonexistent-type", "title", None, None, Theme::Color).is_empty());
        assert_eq!(dimensions_for("nonexistent-type").width, 3508);
    }
}
