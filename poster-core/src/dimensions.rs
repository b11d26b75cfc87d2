//! Export dimension table.
//!
//! Every visual type renders onto a fixed pixel canvas at a known DPI. The
//! rasterization collaborator sizes its canvas from this table and the PDF
//! packager uses the page size in millimetres.

use serde::Serialize;

use crate::VisualTypeId;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// PDF page size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSize {
    /// Page width in millimetres.
    pub width_mm: f64,
    /// Page height in millimetres.
    pub height_mm: f64,
}

/// Export dimensions of one visual type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Print resolution.
    pub dpi: u32,
    /// Human-readable format label.
    pub label: &'static str,
    /// PDF page size.
    pub page: PageSize,
}

impl Dimensions {
    const fn new(
        width: u32,
        height: u32,
        dpi: u32,
        label: &'static str,
        width_mm: f64,
        height_mm: f64,
    ) -> Self {
        Self {
            width,
            height,
            dpi,
            label,
            page: PageSize {
                width_mm,
                height_mm,
            },
        }
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Canvas width as a float reference dimension.
    #[must_use]
    pub fn width_px(&self) -> f64 {
        f64::from(self.width)
    }

    /// Canvas height as a float reference dimension.
    #[must_use]
    pub fn height_px(&self) -> f64 {
        f64::from(self.height)
    }
}

const POSTER: Dimensions = Dimensions::new(3508, 4961, 300, "A3 Poster", 297.0, 420.0);
const FLYER_FRONT: Dimensions = Dimensions::new(1748, 2480, 300, "A5 Flyer (front)", 148.0, 210.0);
const FLYER_BACK: Dimensions = Dimensions::new(1748, 2480, 300, "A5 Flyer (back)", 148.0, 210.0);
const PRESS_RELEASE: Dimensions =
    Dimensions::new(2480, 3508, 300, "A4 Press Release", 210.0, 297.0);
const SOCIAL_SQUARE: Dimensions =
    Dimensions::new(1080, 1080, 72, "Social Post (1:1)", 381.0, 381.0);
const SOCIAL_PORTRAIT: Dimensions =
    Dimensions::new(1080, 1350, 72, "Social Post (4:5)", 381.0, 476.25);
const STORY: Dimensions = Dimensions::new(1080, 1920, 72, "Story (9:16)", 381.0, 677.33);

impl VisualTypeId {
    /// Export dimensions for this visual type.
    #[must_use]
    pub const fn dimensions(self) -> Dimensions {
        match self {
            Self::Poster => POSTER,
            Self::FlyerFront => FLYER_FRONT,
            Self::FlyerBack => FLYER_BACK,
            Self::PressRelease => PRESS_RELEASE,
            Self::SocialSquare => SOCIAL_SQUARE,
            Self::SocialPortrait => SOCIAL_PORTRAIT,
            Self::Story => STORY,
        }
    }

    /// Width/height ratio of the export canvas.
    #[must_use]
    pub fn aspect_ratio(self) -> f64 {
        self.dimensions().aspect_ratio()
    }
}

/// Look up export dimensions by configuration key.
///
/// Unknown keys fall back to the poster entry.
#[must_use]
pub fn dimensions_for(visual_type: &str) -> Dimensions {
    VisualTypeId::from_key(visual_type).map_or_else(
        || {
            tracing::debug!("Unknown visual type {visual_type:?}, using poster dimensions");
            POSTER
        },
        VisualTypeId::dimensions,
    )
}

/// Width/height ratio for a configuration key (poster for unknown keys).
#[must_use]
pub fn aspect_ratio(visual_type: &str) -> f64 {
    dimensions_for(visual_type).aspect_ratio()
}

/// Page size implied by a pixel canvas printed at `dpi`.
#[must_use]
pub fn page_size_from_pixels(width: u32, height: u32, dpi: u32) -> PageSize {
    if dpi == 0 {
        return PageSize {
            width_mm: 0.0,
            height_mm: 0.0,
        };
    }
    let dpi = f64::from(dpi);
    PageSize {
        width_mm: f64::from(width) / dpi * MM_PER_INCH,
        height_mm: f64::from(height) / dpi * MM_PER_INCH,
    }
}
