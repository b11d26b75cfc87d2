//! Canonical configuration documents.
//!
//! The [`ConfigStore`] holds the color and black-and-white documents loaded
//! once at session start. Loading never fails: a missing or malformed
//! document degrades to an empty one and a warning is logged.

use std::path::Path;

use crate::{ConfigDocument, Theme};

/// File name of the color document inside a configuration directory.
pub const COLOR_CONFIG_FILE: &str = "configs.json";

/// File name of the black-and-white document inside a configuration directory.
pub const BW_CONFIG_FILE: &str = "configs_bw.json";

const BUILTIN_COLOR: &str = include_str!("../config/configs.json");
const BUILTIN_BW: &str = include_str!("../config/configs_bw.json");

/// Anything that can hand out a theme's configuration document.
///
/// Implemented by the static [`ConfigStore`] and by the dev overlay, so the
/// resolver reads from whichever is active.
pub trait ConfigSource {
    /// The document for `theme`.
    fn document(&self, theme: Theme) -> &ConfigDocument;
}

/// The two canonical configuration documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigStore {
    color: ConfigDocument,
    black_and_white: ConfigDocument,
}

impl ConfigStore {
    /// Create a store from already-parsed documents.
    #[must_use]
    pub fn new(color: ConfigDocument, black_and_white: ConfigDocument) -> Self {
        Self {
            color,
            black_and_white,
        }
    }

    /// The layouts shipped with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_COLOR, BUILTIN_BW)
    }

    /// Parse both documents, degrading each to empty on failure.
    #[must_use]
    pub fn from_json(color: &str, black_and_white: &str) -> Self {
        Self {
            color: ConfigDocument::from_json_or_empty("color", color),
            black_and_white: ConfigDocument::from_json_or_empty("black-and-white", black_and_white),
        }
    }

    /// Load `configs.json` and `configs_bw.json` from a directory.
    ///
    /// A file that cannot be read degrades to an empty document.
    #[must_use]
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).unwrap_or_else(|e| {
                tracing::warn!("Failed to read {}: {e}", path.display());
                String::new()
            })
        };
        let store = Self::from_json(&read(COLOR_CONFIG_FILE), &read(BW_CONFIG_FILE));
        tracing::info!(
            "Loaded layout configuration from {} ({} color visuals, {} bw visuals)",
            dir.display(),
            store.color.visuals.len(),
            store.black_and_white.visuals.len()
        );
        store
    }
}

impl ConfigSource for ConfigStore {
    fn document(&self, theme: Theme) -> &ConfigDocument {
        match theme {
            Theme::Color => &self.color,
            Theme::BlackAndWhite => &self.black_and_white,
        }
    }
}
