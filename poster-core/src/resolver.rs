//! Configuration resolution.
//!
//! Resolving picks the theme's document, takes the visual type's base layout
//! and deep-merges the requested variant's fragment on top of it.

use crate::merge::Merge;
use crate::{ConfigSource, ElementConfig, Theme, VisualConfig};

/// Variant applied when rendering for download/export.
pub const DOWNLOAD_VARIANT: &str = "download";

/// Resolve the merged layout of one visual type.
///
/// An unknown visual type yields an empty config; an unknown variant (or one
/// without an entry for this visual type) leaves the base untouched.
#[must_use]
pub fn resolve<S>(source: &S, visual_type: &str, variant: Option<&str>, theme: Theme) -> VisualConfig
where
    S: ConfigSource + ?Sized,
{
    let document = source.document(theme);
    let mut config = document.visual(visual_type).cloned().unwrap_or_default();

    if let Some(fragment) = variant.and_then(|v| document.variant_fragment(v, visual_type)) {
        tracing::trace!(
            "Applying variant {:?} to {visual_type} ({} elements)",
            variant,
            fragment.len()
        );
        config.merge_from(fragment);
    }

    config
}

/// Resolve one element of a visual type (empty if the element is absent).
#[must_use]
pub fn resolve_element<S>(
    source: &S,
    visual_type: &str,
    element: &str,
    variant: Option<&str>,
    theme: Theme,
) -> ElementConfig
where
    S: ConfigSource + ?Sized,
{
    resolve(source, visual_type, variant, theme)
        .remove(element)
        .unwrap_or_default()
}
