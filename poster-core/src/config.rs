//! Layout configuration documents.
//!
//! A [`ConfigDocument`] maps visual-type keys to [`VisualConfig`]s, which map
//! element names (`title`, `qrCode`, `hostBadge`, ...) to an
//! [`ElementConfig`]. Documents may carry a `_variants` table of partial
//! overrides that only apply in specific contexts, such as download rendering.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{LayoutError, LayoutResult};

/// Numeric threshold above which `width`/`height` are read as pixels.
///
/// Values at or below the threshold are percentages of the container.
pub const ABSOLUTE_SIZE_THRESHOLD: f64 = 100.0;

/// CSS font weight: numeric (`700`) or keyword (`"bold"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontWeight {
    /// Numeric weight such as `400` or `700`.
    Numeric(u16),
    /// Keyword weight such as `"bold"`.
    Keyword(String),
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Keyword(k) => f.write_str(k),
        }
    }
}

/// Layout properties of one element within one visual type.
///
/// Every property is optional; an absent property emits no style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ElementConfig {
    /// Distance from the top edge, percent of container height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    /// Distance from the left edge, percent of container width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    /// Distance from the right edge, percent of container width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    /// Distance from the bottom edge, percent of container height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    /// Width: percent of container width, or pixels above 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height: percent of container height, or pixels above 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Font size in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Font weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    /// Letter spacing in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    /// Padding in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    /// Bottom padding, percent of container height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<f64>,
    /// Bottom margin in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f64>,
    /// Opacity between 0 and 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// QR code edge length in pixels; forces width and height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

/// Name of a recognized [`ElementConfig`] property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementProperty {
    /// `top`
    Top,
    /// `left`
    Left,
    /// `right`
    Right,
    /// `bottom`
    Bottom,
    /// `width`
    Width,
    /// `height`
    Height,
    /// `fontSize`
    FontSize,
    /// `fontWeight`
    FontWeight,
    /// `letterSpacing`
    LetterSpacing,
    /// `padding`
    Padding,
    /// `paddingBottom`
    PaddingBottom,
    /// `marginBottom`
    MarginBottom,
    /// `opacity`
    Opacity,
    /// `size`
    Size,
}

impl ElementProperty {
    /// Every property, in schema order.
    pub const ALL: [Self; 14] = [
        Self::Top,
        Self::Left,
        Self::Right,
        Self::Bottom,
        Self::Width,
        Self::Height,
        Self::FontSize,
        Self::FontWeight,
        Self::LetterSpacing,
        Self::Padding,
        Self::PaddingBottom,
        Self::MarginBottom,
        Self::Opacity,
        Self::Size,
    ];

    /// The camelCase name used in configuration documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Left => "left",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Width => "width",
            Self::Height => "height",
            Self::FontSize => "fontSize",
            Self::FontWeight => "fontWeight",
            Self::LetterSpacing => "letterSpacing",
            Self::Padding => "padding",
            Self::PaddingBottom => "paddingBottom",
            Self::MarginBottom => "marginBottom",
            Self::Opacity => "opacity",
            Self::Size => "size",
        }
    }
}

impl fmt::Display for ElementProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementProperty {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| LayoutError::UnknownProperty(s.to_string()))
    }
}

/// A single property value as edited in dev mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Numeric value (percent, pixels or opacity depending on the property).
    Number(f64),
    /// Text value; only valid for `fontWeight`.
    Text(String),
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl ElementConfig {
    /// Whether no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn numeric(&self, property: ElementProperty) -> Option<f64> {
        match property {
            ElementProperty::Top => self.top,
            ElementProperty::Left => self.left,
            ElementProperty::Right => self.right,
            ElementProperty::Bottom => self.bottom,
            ElementProperty::Width => self.width,
            ElementProperty::Height => self.height,
            ElementProperty::FontSize => self.font_size,
            ElementProperty::LetterSpacing => self.letter_spacing,
            ElementProperty::Padding => self.padding,
            ElementProperty::PaddingBottom => self.padding_bottom,
            ElementProperty::MarginBottom => self.margin_bottom,
            ElementProperty::Opacity => self.opacity,
            ElementProperty::Size => self.size,
            ElementProperty::FontWeight => None,
        }
    }

    fn numeric_slot(&mut self, property: ElementProperty) -> Option<&mut Option<f64>> {
        Some(match property {
            ElementProperty::Top => &mut self.top,
            ElementProperty::Left => &mut self.left,
            ElementProperty::Right => &mut self.right,
            ElementProperty::Bottom => &mut self.bottom,
            ElementProperty::Width => &mut self.width,
            ElementProperty::Height => &mut self.height,
            ElementProperty::FontSize => &mut self.font_size,
            ElementProperty::LetterSpacing => &mut self.letter_spacing,
            ElementProperty::Padding => &mut self.padding,
            ElementProperty::PaddingBottom => &mut self.padding_bottom,
            ElementProperty::MarginBottom => &mut self.margin_bottom,
            ElementProperty::Opacity => &mut self.opacity,
            ElementProperty::Size => &mut self.size,
            ElementProperty::FontWeight => return None,
        })
    }

    /// Read one property.
    #[must_use]
    pub fn get(&self, property: ElementProperty) -> Option<PropertyValue> {
        if property == ElementProperty::FontWeight {
            return self.font_weight.as_ref().map(|w| match w {
                FontWeight::Numeric(n) => PropertyValue::Number(f64::from(*n)),
                FontWeight::Keyword(k) => PropertyValue::Text(k.clone()),
            });
        }
        self.numeric(property).map(PropertyValue::Number)
    }

    /// Assign one property, leaving all other properties untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidValue`] when the value does not fit the
    /// property: text for a numeric property, a non-finite number, or a
    /// fractional/out-of-range numeric `fontWeight`.
    pub fn set(&mut self, property: ElementProperty, value: PropertyValue) -> LayoutResult<()> {
        if property == ElementProperty::FontWeight {
            self.font_weight = Some(match value {
                PropertyValue::Text(k) => FontWeight::Keyword(k),
                PropertyValue::Number(n) => FontWeight::Numeric(numeric_weight(n)?),
            });
            return Ok(());
        }

        let number = match value {
            PropertyValue::Number(n) if n.is_finite() => n,
            PropertyValue::Number(n) => {
                return Err(LayoutError::InvalidValue {
                    property: property.as_str(),
                    reason: format!("{n} is not a finite number"),
                })
            }
            PropertyValue::Text(t) => {
                return Err(LayoutError::InvalidValue {
                    property: property.as_str(),
                    reason: format!("expected a number, got {t:?}"),
                })
            }
        };
        if let Some(slot) = self.numeric_slot(property) {
            *slot = Some(number);
        }
        Ok(())
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn numeric_weight(n: f64) -> LayoutResult<u16> {
    if n.fract() == 0.0 && (1.0..=1000.0).contains(&n) {
        Ok(n as u16)
    } else {
        Err(LayoutError::InvalidValue {
            property: ElementProperty::FontWeight.as_str(),
            reason: format!("{n} is not a weight between 1 and 1000"),
        })
    }
}

/// Element name to element layout, for one visual type.
pub type VisualConfig = BTreeMap<String, ElementConfig>;

/// Variant name to per-visual-type partial overrides.
pub type VariantTable = BTreeMap<String, BTreeMap<String, VisualConfig>>;

/// A full theme document: every visual type's layout plus variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Partial overrides applied per variant.
    #[serde(rename = "_variants", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variants: VariantTable,
    /// Base layout per visual-type key.
    #[serde(flatten)]
    pub visuals: BTreeMap<String, VisualConfig>,
}

impl ConfigDocument {
    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Serialization`] when the text is not a valid
    /// document (malformed JSON or an unknown element property).
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a document, degrading to an empty document on failure.
    ///
    /// `label` names the document in the warning that is logged.
    #[must_use]
    pub fn from_json_or_empty(label: &str, json: &str) -> Self {
        match Self::from_json(json) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("Failed to parse {label} configuration, using empty document: {e}");
                Self::default()
            }
        }
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> LayoutResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Base layout for a visual type.
    #[must_use]
    pub fn visual(&self, visual_type: &str) -> Option<&VisualConfig> {
        self.visuals.get(visual_type)
    }

    /// The variant override fragment for a visual type, if any.
    #[must_use]
    pub fn variant_fragment(&self, variant: &str, visual_type: &str) -> Option<&VisualConfig> {
        self.variants.get(variant)?.get(visual_type)
    }

    /// Mutable access to one element, creating empty entries as needed.
    pub fn element_mut(&mut self, visual_type: &str, element: &str) -> &mut ElementConfig {
        self.visuals
            .entry(visual_type.to_string())
            .or_default()
            .entry(element.to_string())
            .or_default()
    }

    /// Names of every variant in the document.
    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }
}
