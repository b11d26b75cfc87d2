//! Style projection.
//!
//! Turns a resolved [`ElementConfig`] into render-ready style entries in one
//! of two coordinate spaces:
//!
//! - [`CoordinateSpace::Relative`] keeps position and size as percentages so
//!   the live preview scales with its on-screen container.
//! - [`CoordinateSpace::Absolute`] converts them to pixels against the visual
//!   type's export canvas, so the rasterized export matches print size.
//!
//! Both spaces share one interpretation table; only the unit target differs.
//! Typography and pixel spacing are copied through unchanged.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::config::ABSOLUTE_SIZE_THRESHOLD;
use crate::merge::Merge;
use crate::resolver::resolve_element;
use crate::units::percent_to_pixels;
use crate::{dimensions_for, ConfigSource, Dimensions, ElementConfig, FontWeight, Theme};

/// Which coordinate space a style is projected into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSpace {
    /// Percentages, for the live preview.
    #[default]
    Relative,
    /// Pixels on the export canvas.
    Absolute,
}

/// A single style value with its unit.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Percentage of the container.
    Percent(f64),
    /// Pixel length.
    Pixels(f64),
    /// Unitless number (opacity, numeric font weight).
    Number(f64),
    /// Keyword (`bold`).
    Keyword(String),
}

impl StyleValue {
    /// The numeric part of the value, if it has one.
    #[must_use]
    pub fn number(&self) -> Option<f64> {
        match self {
            Self::Percent(v) | Self::Pixels(v) | Self::Number(v) => Some(*v),
            Self::Keyword(_) => None,
        }
    }
}

/// Decimal places kept when a value is rendered as CSS.
const CSS_PRECISION: usize = 3;

/// Format `value` with at most [`CSS_PRECISION`] decimals, trailing zeros
/// trimmed (`2104.8`, `540`).
fn css_number(value: f64) -> String {
    let mut out = format!("{value:.prec$}", prec = CSS_PRECISION);
    if out.contains('.') {
        let trimmed = out.trim_end_matches('0').trim_end_matches('.').len();
        out.truncate(trimmed);
    }
    if out == "-0" {
        out.remove(0);
    }
    out
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(v) => write!(f, "{}%", css_number(*v)),
            Self::Pixels(v) => write!(f, "{}px", css_number(*v)),
            Self::Number(v) => f.write_str(&css_number(*v)),
            Self::Keyword(k) => f.write_str(k),
        }
    }
}

impl Serialize for StyleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Render-ready style: camelCase style keys to values.
///
/// Serializes as a React-style object of strings, e.g.
/// `{"fontSize":"32px","top":"5%"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyleMap(BTreeMap<&'static str, StyleValue>);

impl StyleMap {
    /// Value for a camelCase style key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.0.get(key)
    }

    /// Number of style entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no style entry is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &StyleValue)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    fn insert(&mut self, key: &'static str, value: StyleValue) {
        self.0.insert(key, value);
    }

    /// Render as inline CSS declarations (`font-size: 32px; top: 5%;`).
    #[must_use]
    pub fn to_css(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| format!("{}: {value};", kebab_case(key)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Project an element's properties into `space` against `dims`.
///
/// Absent properties emit no entry. `width`/`height` above
/// [`ABSOLUTE_SIZE_THRESHOLD`] are already pixels in both spaces, and `size`
/// replaces both with its pixel value.
#[must_use]
pub fn project(config: &ElementConfig, space: CoordinateSpace, dims: &Dimensions) -> StyleMap {
    let (ref_w, ref_h) = (dims.width_px(), dims.height_px());
    let percent = |value: f64, reference: f64| match space {
        CoordinateSpace::Relative => StyleValue::Percent(value),
        CoordinateSpace::Absolute => StyleValue::Pixels(percent_to_pixels(value, reference)),
    };
    let extent = |value: f64, reference: f64| {
        if value > ABSOLUTE_SIZE_THRESHOLD {
            StyleValue::Pixels(value)
        } else {
            percent(value, reference)
        }
    };

    let mut style = StyleMap::default();

    if let Some(v) = config.top {
        style.insert("top", percent(v, ref_h));
    }
    if let Some(v) = config.bottom {
        style.insert("bottom", percent(v, ref_h));
    }
    if let Some(v) = config.left {
        style.insert("left", percent(v, ref_w));
    }
    if let Some(v) = config.right {
        style.insert("right", percent(v, ref_w));
    }
    if let Some(v) = config.width {
        style.insert("width", extent(v, ref_w));
    }
    if let Some(v) = config.height {
        style.insert("height", extent(v, ref_h));
    }
    // Vertical breathing room: scaled by height, not width.
    if let Some(v) = config.padding_bottom {
        style.insert("paddingBottom", percent(v, ref_h));
    }

    if let Some(v) = config.font_size {
        style.insert("fontSize", StyleValue::Pixels(v));
    }
    if let Some(weight) = &config.font_weight {
        let value = match weight {
            FontWeight::Numeric(n) => StyleValue::Number(f64::from(*n)),
            FontWeight::Keyword(k) => StyleValue::Keyword(k.clone()),
        };
        style.insert("fontWeight", value);
    }
    if let Some(v) = config.letter_spacing {
        style.insert("letterSpacing", StyleValue::Pixels(v));
    }
    if let Some(v) = config.padding {
        style.insert("padding", StyleValue::Pixels(v));
    }
    if let Some(v) = config.margin_bottom {
        style.insert("marginBottom", StyleValue::Pixels(v));
    }
    if let Some(v) = config.opacity {
        style.insert("opacity", StyleValue::Number(v));
    }

    if let Some(size) = config.size {
        style.insert("width", StyleValue::Pixels(size));
        style.insert("height", StyleValue::Pixels(size));
    }

    style
}

/// Projects element styles out of a configuration source.
pub struct StyleProjector<'a, S: ConfigSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: ConfigSource + ?Sized> StyleProjector<'a, S> {
    /// Create a projector reading from `source`.
    #[must_use]
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Resolve an element and shallow-merge caller overrides on top.
    #[must_use]
    pub fn element_config(
        &self,
        visual_type: &str,
        element: &str,
        overrides: Option<&ElementConfig>,
        variant: Option<&str>,
        theme: Theme,
    ) -> ElementConfig {
        let mut config = resolve_element(self.source, visual_type, element, variant, theme);
        if let Some(overrides) = overrides {
            config.merge_from(overrides);
        }
        config
    }

    /// Style in the given coordinate space.
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
        let config = self.element_config(visual_type, element, overrides, variant, theme);
        let dims = dimensions_for(visual_type);
        tracing::trace!("Projecting {visual_type}.{element} into {space:?} space");
        project(&config, space, &dims)
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigDocument, ConfigStore, VisualTypeId};

    fn store() -> ConfigStore {
        let color = ConfigDocument::from_json(
            r#"{
                "poster": {
                    "title": {"top": 5, "left": 10, "fontSize": 32, "fontWeight": "bold"},
                    "image": {"top": 40, "left": 8, "width": 84, "height": 50},
                    "banner": {"top": 2, "width": 40, "height": 150},
                    "qrCode": {"top": 80, "left": 75, "width": 20, "height": 20, "size": 64},
                    "footer": {"bottom": 4, "right": 6, "paddingBottom": 2, "padding": 12,
                               "marginBottom": 8, "letterSpacing": 1.5, "opacity": 0.8}
                },
                "_variants": {"download": {"poster": {"title": {"fontSize": 40}}}}
            }"#,
        )
        .expect("color");
        ConfigStore::new(color, ConfigDocument::default())
    }

    #[test]
    fn relative_keeps_percentages() {
        let store = store();
        let projector = StyleProjector::new(&store);
        let style = projector.relative_style("poster", "title", None, None, Theme::Color);
        assert_eq!(style.get("top"), Some(&StyleValue::Percent(5.0)));
        assert_eq!(style.get("left"), Some(&StyleValue::Percent(10.0)));
        assert_eq!(style.get("fontSize"), Some(&StyleValue::Pixels(32.0)));
        assert_eq!(style.get("fontWeight"), Some(&StyleValue::Keyword("bold".into())));
        assert_eq!(style.len(), 4);
    }

    #[test]
    fn absolute_scales_by_axis() {
        let store = store();
        let projector = StyleProjector::new(&store);
        let dims = VisualTypeId::Poster.dimensions();
        let style = projector.absolute_style("poster", "image", None, None, Theme::Color);
        assert_eq!(style.get("top"), Some(&StyleValue::Pixels(0.40 * 4961.0)));
        assert_eq!(
            style.get("left"),
            Some(&StyleValue::Pixels(percent_to_pixels(8.0, dims.width_px())))
        );
        assert_eq!(
            style.get("width"),
            Some(&StyleValue::Pixels(percent_to_pixels(84.0, dims.width_px())))
        );
        assert_eq!(
            style.get("height"),
            Some(&StyleValue::Pixels(percent_to_pixels(50.0, dims.height_px())))
        );
    }

    #[test]
    fn absolute_matches_relative_scaled_by_dimensions() {
        let store = store();
        let projector = StyleProjector::new(&store);
        let dims = VisualTypeId::Poster.dimensions();
        for element in ["title", "image", "footer"] {
            let rel = projector.relative_style("poster", element, None, Some("download"), Theme::Color);
            let abs = projector.absolute_style("poster", element, None, Some("download"), Theme::Color);
            for (key, value) in rel.iter() {
                let StyleValue::Percent(pct) = value else {
                    assert_eq!(abs.get(key), Some(value), "{element}.{key} copied through");
                    continue;
                };
                let reference = match key {
                    "left" | "right" | "width" => dims.width_px(),
                    _ => dims.height_px(),
                };
                let expected = percent_to_pixels(*pct, reference);
                let actual = abs.get(key).and_then(StyleValue::number).expect("pixel value");
                assert!((actual - expected).abs() < 1e-9, "{element}.{key}");
            }
        }
    }

    #[test]
    fn css_values_are_rounded_and_trimmed() {
        assert_eq!(StyleValue::Pixels(percent_to_pixels(60.0, 3508.0)).to_string(), "2104.8px");
        assert_eq!(StyleValue::Pixels(140.32).to_string(), "140.32px");
        assert_eq!(StyleValue::Pixels(540.0).to_string(), "540px");
        assert_eq!(StyleValue::Percent(33.333_333).to_string(), "33.333%");
        assert_eq!(StyleValue::Number(0.8).to_string(), "0.8");
        assert_eq!(StyleValue::Pixels(-0.000_1).to_string(), "0px");
        assert_eq!(StyleValue::Pixels(-1.5).to_string(), "-1.5px");

        let style = project(
            &ElementConfig {
                height: Some(60.0),
                ..ElementConfig::default()
            },
            CoordinateSpace::Absolute,
            &VisualTypeId::PressRelease.dimensions(),
        );
        assert_eq!(style.to_css(), "height: 2104.8px;");
    }

    #[test]
    fn height_above_threshold_is_pixels_in_both_spaces() {
        let store = store();
        let projector = StyleProjector::new(&store);
        let rel = projector.relative_style("poster", "banner", None, None, Theme::Color);
        let abs = projector.absolute_style("poster", "banner", None, None, Theme::Color);
        assert_eq!(rel.get("height").map(ToString::to_string).as_deref(), Some("150px"));
        assert_eq!(abs.get("height").map(ToString::to_string).as_deref(), Some("150px"));
    }

    #[test]
    fn height_at_or_below_threshold_is_percent() {
        let store = store();
        let projector = StyleProjector::new(&store);
        let rel = projector.relative_style("poster", "image", None, None, Theme::Color);
        assert_eq!(rel.get("height").map(ToString::to_string).as_deref(), Some("50%"));
        let abs = projector.absolute_style("poster", "image", None, None, Theme::Color);
        assert_eq!(abs.get("height"), Some(&StyleValue::Pixels(2480.5)));

        let edge = ElementConfig {
            height: Some(100.0),
            ..ElementConfig::default()
        };
        let style = project(&edge, CoordinateSpace::Relative, &VisualTypeId::Story.dimensions());
        assert_eq!(style.get("height"), Some(&StyleValue::Percent(100.0)));
    }

    #[test]
    fn qr_size_overrides_width_and_height() {
        let store = store();
        let projector = StyleProjector::new(&store);
        for space in [CoordinateSpace::Relative, CoordinateSpace::Absolute] {
            let style = projector.style(space, "poster", "qrCode", None, None, Theme::Color);
            assert_eq!(style.get("width"), Some(&StyleValue::Pixels(64.0)));
            assert_eq!(style.get("height"), Some(&StyleValue::Pixels(64.0)));
            assert!(style.get("top").is_some());
        }
    }

    #[test]
    fn padding_bottom_scales_by_height() {
        let store = store();
        let projector = StyleProjector::new(&store);
        let rel = projector.relative_style("poster", "footer", None, None, Theme::Color);
        assert_eq!(rel.get("paddingBottom"), Some(&StyleValue::Percent(2.0)));
        let abs = projector.absolute_style("poster", "footer", None, None, Theme::Color);
        assert_eq!(
            abs.get("paddingBottom"),
            Some(&StyleValue::Pixels(percent_to_pixels(2.0, 4961.0)))
        );
    }

    #[test]
    fn spacing_and_typography_copied_through() {
        let store = store();
        let projector = StyleProjector::new(&store);
        let abs = projector.absolute_style("poster", "footer", None, None, Theme::Color);
        assert_eq!(abs.get("padding"), Some(&StyleValue::Pixels(12.0)));
        assert_eq!(abs.get("marginBottom"), Some(&StyleValue::Pixels(8.0)));
        assert_eq!(abs.get("letterSpacing"), Some(&StyleValue::Pixels(1.5)));
        assert_eq!(abs.get("opacity"), Some(&StyleValue::Number(0.8)));
    }

    #[test]
    fn overrides_win_over_resolved_config() {
        let store = store();
        let projector = StyleProjector::new(&store);
        let overrides = ElementConfig {
            top: Some(12.0),
            opacity: Some(0.5),
            ..ElementConfig::default()
        };
        let style =
            projector.relative_style("poster", "title", Some(&overrides), Some("download"), Theme::Color);
        assert_eq!(style.get("top"), Some(&StyleValue::Percent(12.0)));
        assert_eq!(style.get("left"), Some(&StyleValue::Percent(10.0)));
        assert_eq!(style.get("fontSize"), Some(&StyleValue::Pixels(40.0)));
        assert_eq!(style.get("opacity"), Some(&StyleValue::Number(0.5)));
    }

    #[test]
    fn missing_element_or_type_yields_empty_style() {
        let store = store();
        let projector = StyleProjector::new(&store);
        assert!(projector
            .relative_style("poster", "nothing", None, None, Theme::Color)
            .is_empty());
        assert!(projector
            .absolute_style("nonexistent-type", "title", None, None, Theme::Color)
            .is_empty());
    }

    #[test]
    fn unknown_type_with_overrides_uses_poster_canvas() {
        let store = store();
        let projector = StyleProjector::new(&store);
        let overrides = ElementConfig {
            left: Some(50.0),
            ..ElementConfig::default()
        };
        let style =
            projector.absolute_style("nonexistent-type", "title", Some(&overrides), None, Theme::Color);
        assert_eq!(style.get("left"), Some(&StyleValue::Pixels(1754.0)));
    }

    #[test]
    fn css_and_json_rendering() {
        let config = ElementConfig {
            top: Some(5.0),
            font_size: Some(32.0),
            padding_bottom: Some(2.5),
            ..ElementConfig::default()
        };
        let style = project(&config, CoordinateSpace::Relative, &VisualTypeId::Poster.dimensions());
        assert_eq!(style.to_css(), "font-size: 32px; padding-bottom: 2.5%; top: 5%;");
        let json = serde_json::to_string(&style).expect("json");
        assert_eq!(json, r#"{"fontSize":"32px","paddingBottom":"2.5%","top":"5%"}"#);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_absolute_is_relative_scaled_by_canvas(
                visual in prop::sample::select(VisualTypeId::ALL.to_vec()),
                top in 0.0f64..=100.0,
                left in 0.0f64..=100.0,
                extent in 0.0f64..=200.0,
            ) {
                let dims = visual.dimensions();
                let config = ElementConfig {
                    top: Some(top),
                    left: Some(left),
                    width: Some(extent),
                    height: Some(extent),
                    ..ElementConfig::default()
                };
                let rel = project(&config, CoordinateSpace::Relative, &dims);
                let abs = project(&config, CoordinateSpace::Absolute, &dims);
                for (key, value) in rel.iter() {
                    let actual = abs.get(key).and_then(StyleValue::number).expect("absolute value");
                    match value {
                        StyleValue::Percent(pct) => {
                            let reference = match key {
                                "left" | "width" => dims.width_px(),
                                _ => dims.height_px(),
                            };
                            prop_assert!((actual - percent_to_pixels(*pct, reference)).abs() < 1e-9);
                        }
                        StyleValue::Pixels(v) => {
                            prop_assert!(extent > ABSOLUTE_SIZE_THRESHOLD);
                            prop_assert_eq!(abs.get(key), Some(&StyleValue::Pixels(*v)));
                        }
                        other => prop_assert!(false, "unexpected {}: {:?}", key, other),
                    }
                }
            }
        }
    }
}
