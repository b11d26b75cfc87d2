//! Dev-mode layout overlay.
//!
//! While tuning layouts, a designer edits element properties live. The
//! [`DevOverlay`] keeps one mutable copy of each theme's document, seeded from
//! the canonical defaults plus whatever was persisted in a previous session,
//! and writes the whole theme document back to its [`OverlayBackend`] after
//! every mutation.
//!
//! Persistence is best-effort: a failed write is logged and leaves the theme
//! [`OverlayState::Dirty`]; the in-memory overlay stays authoritative and
//! [`DevOverlay::flush`] can retry.

use serde::Serialize;

use crate::merge::Merge;
use crate::{
    ConfigDocument, ConfigSource, ConfigStore, ElementProperty, LayoutError, LayoutResult,
    OverlayBackend, PropertyValue, Theme, TransportDocument,
};

/// Default storage namespace.
pub const DEFAULT_NAMESPACE: &str = "poster";

/// Persistence state of one theme's overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayState {
    /// In-memory overlay matches durable storage.
    Clean,
    /// In-memory overlay has changes not yet written.
    Dirty,
}

#[derive(Debug, Clone)]
struct ThemeOverlay {
    document: ConfigDocument,
    state: OverlayState,
}

/// Session-scoped, persisted overlay of both theme documents.
#[derive(Debug)]
pub struct DevOverlay<B: OverlayBackend> {
    enabled: bool,
    namespace: String,
    defaults: ConfigStore,
    color: ThemeOverlay,
    black_and_white: ThemeOverlay,
    backend: B,
}

impl<B: OverlayBackend> DevOverlay<B> {
    /// Build the overlay for a session.
    ///
    /// For each theme, a persisted document is merged onto the canonical
    /// default with persisted values taking priority. Missing or unreadable
    /// persisted data falls back to the defaults verbatim.
    pub fn initialize(
        defaults: ConfigStore,
        backend: B,
        namespace: impl Into<String>,
        enabled: bool,
    ) -> Self {
        let namespace = namespace.into();
        let load = |theme: Theme| {
            let key = storage_key(&namespace, theme);
            let base = defaults.document(theme);
            let document = match backend.load(&key) {
                Ok(Some(json)) => match ConfigDocument::from_json(&json) {
                    Ok(persisted) => {
                        tracing::debug!("Restored persisted overlay {key}");
                        base.merged(&persisted)
                    }
                    Err(e) => {
                        tracing::warn!("Ignoring unparseable overlay {key}: {e}");
                        base.clone()
                    }
                },
                Ok(None) => base.clone(),
                Err(e) => {
                    tracing::warn!("Failed to load overlay {key}: {e}");
                    base.clone()
                }
            };
            ThemeOverlay {
                document,
                state: OverlayState::Clean,
            }
        };
        let color = load(Theme::Color);
        let black_and_white = load(Theme::BlackAndWhite);

        Self {
            enabled,
            namespace,
            defaults,
            color,
            black_and_white,
            backend,
        }
    }

    /// Whether dev-mode editing is on.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn dev-mode editing on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Storage namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Storage key for a theme, e.g. `poster_configs_bw`.
    #[must_use]
    pub fn storage_key(&self, theme: Theme) -> String {
        storage_key(&self.namespace, theme)
    }

    /// Persistence state of a theme.
    #[must_use]
    pub fn state(&self, theme: Theme) -> OverlayState {
        self.theme(theme).state
    }

    /// The canonical defaults the overlay resets to.
    #[must_use]
    pub fn defaults(&self) -> &ConfigStore {
        &self.defaults
    }

    /// The persistence backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn theme(&self, theme: Theme) -> &ThemeOverlay {
        match theme {
            Theme::Color => &self.color,
            Theme::BlackAndWhite => &self.black_and_white,
        }
    }

    fn theme_mut(&mut self, theme: Theme) -> &mut ThemeOverlay {
        match theme {
            Theme::Color => &mut self.color,
            Theme::BlackAndWhite => &mut self.black_and_white,
        }
    }

    /// Set one element property and persist the theme.
    ///
    /// Returns `Ok(false)` without touching anything when dev mode is off.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidValue`] when the value does not fit the
    /// property; the overlay is left unchanged.
    pub fn update(
        &mut self,
        visual_type: &str,
        element: &str,
        property: ElementProperty,
        value: PropertyValue,
        theme: Theme,
    ) -> LayoutResult<bool> {
        if !self.enabled {
            tracing::trace!(
                "Dev mode disabled, ignoring update of {visual_type}.{element}.{property}"
            );
            return Ok(false);
        }

        // Validate on a scratch copy so a rejected value creates no entries.
        let overlay = self.theme_mut(theme);
        let mut edited = overlay
            .document
            .visual(visual_type)
            .and_then(|v| v.get(element))
            .cloned()
            .unwrap_or_default();
        edited.set(property, value)?;
        *overlay.document.element_mut(visual_type, element) = edited;
        overlay.state = OverlayState::Dirty;

        tracing::debug!("Overlay update {visual_type}.{element}.{property} ({theme:?})");
        self.flush(theme);
        Ok(true)
    }

    /// [`update`](Self::update) with the property given by name.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownProperty`] for a name outside the element
    /// schema, or any error from [`update`](Self::update).
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

    /// Write a theme's overlay to storage if it is dirty.
    ///
    /// Returns whether the theme is clean afterwards.
    pub fn flush(&mut self, theme: Theme) -> bool {
        if self.state(theme) == OverlayState::Clean {
            return true;
        }
        let key = self.storage_key(theme);
        let result = self
            .theme(theme)
            .document
            .to_json()
            .and_then(|json| self.backend.save(&key, &json).map_err(LayoutError::from));
        match result {
            Ok(()) => {
                self.theme_mut(theme).state = OverlayState::Clean;
                true
            }
            Err(e) => {
                tracing::warn!("Failed to persist overlay {key}: {e}");
                false
            }
        }
    }

    /// Revert a theme to the canonical defaults and delete its stored entry.
    pub fn reset(&mut self, theme: Theme) {
        let key = self.storage_key(theme);
        if let Err(e) = self.backend.remove(&key) {
            tracing::warn!("Failed to delete overlay {key}: {e}");
        }
        let document = self.defaults.document(theme).clone();
        let overlay = self.theme_mut(theme);
        overlay.document = document;
        overlay.state = OverlayState::Clean;
        tracing::info!("Overlay reset ({theme:?})");
    }

    /// Package one visual type's overlay layout as a transport document.
    #[must_use]
    pub fn export(&self, visual_type: &str, theme: Theme) -> TransportDocument {
        let config = self
            .theme(theme)
            .document
            .visual(visual_type)
            .cloned()
            .unwrap_or_default();
        TransportDocument::single(visual_type, config)
    }

    /// Import a transport document into a theme.
    ///
    /// Each visual type in the document replaces the overlay's entry for that
    /// type; other visual types are untouched. Returns the number of visual
    /// types imported.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Import`] if the text cannot be parsed; the
    /// overlay is left unchanged.
    pub fn import(&mut self, json: &str, theme: Theme) -> LayoutResult<usize> {
        let document = TransportDocument::from_json(json).map_err(|e| {
            tracing::warn!("Rejected overlay import: {e}");
            e
        })?;
        let count = document.len();
        let overlay = self.theme_mut(theme);
        for (visual_type, config) in document {
            overlay.document.visuals.insert(visual_type, config);
        }
        overlay.state = OverlayState::Dirty;
        tracing::info!("Imported {count} visual type(s) into overlay ({theme:?})");
        self.flush(theme);
        Ok(count)
    }
}

impl<B: OverlayBackend> ConfigSource for DevOverlay<B> {
    fn document(&self, theme: Theme) -> &ConfigDocument {
        &self.theme(theme).document
    }
}

/// Storage key for a namespace and theme.
#[must_use]
pub fn storage_key(namespace: &str, theme: Theme) -> String {
    format!("{namespace}{}", theme.storage_suffix())
}
