//! Transport format for sharing tuned layouts.
//!
//! A transport document is UTF-8 JSON of the shape
//! `{ "<visualType>": <VisualConfig> }` with no version field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{LayoutError, LayoutResult, VisualConfig};

/// Visual-type keyed layouts exchanged between designers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransportDocument(BTreeMap<String, VisualConfig>);

impl TransportDocument {
    /// A document labeled with a single visual type.
    #[must_use]
    pub fn single(visual_type: impl Into<String>, config: VisualConfig) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(visual_type.into(), config);
        Self(entries)
    }

    /// Parse a transport document.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Import`] if the text is not valid JSON of the
    /// expected shape.
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        serde_json::from_str(json).map_err(|e| LayoutError::Import(e.to_string()))
    }

    /// Serialize as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> LayoutResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Layout for one visual type.
    #[must_use]
    pub fn get(&self, visual_type: &str) -> Option<&VisualConfig> {
        self.0.get(visual_type)
    }

    /// Number of visual types carried.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the document carries no visual type.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate carried visual types and their layouts.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &VisualConfig)> {
        self.0.iter()
    }
}

impl IntoIterator for TransportDocument {
    type Item = (String, VisualConfig);
    type IntoIter = std::collections::btree_map::IntoIter<String, VisualConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
