//! Percentage/pixel conversion.

/// Convert a percentage of `reference` to pixels.
#[must_use]
pub fn percent_to_pixels(pct: f64, reference: f64) -> f64 {
    pct / 100.0 * reference
}

/// Convert pixels to a percentage of `reference`.
///
/// A zero or non-finite reference yields `0.0`.
#[must_use]
pub fn pixels_to_percent(px: f64, reference: f64) -> f64 {
    if reference == 0.0 || !reference.is_finite() {
        tracing::trace!("pixels_to_percent with reference {reference}, returning 0");
        return 0.0;
    }
    px / reference * 100.0
}
