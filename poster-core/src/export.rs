//! Export targets.
//!
//! Describes what an exported artifact of a visual type looks like: pixel
//! size, print density, physical page and output encoding. Rendering itself
//! happens in the host; this module only computes the target parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dimensions::{dimensions_for, PageSize};
use crate::LayoutError;

/// Default JPEG quality for exported images.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Export output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// PDF document sized to the physical page.
    #[default]
    Pdf,
    /// JPEG image.
    Jpeg,
    /// PNG image.
    Png,
}

impl ExportFormat {
    /// All formats.
    pub const ALL: [Self; 3] = [Self::Pdf, Self::Jpeg, Self::Png];

    /// File extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    /// MIME type of the encoded artifact.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pdf => "pdf",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            _ => Err(LayoutError::InvalidValue {
                property: "format",
                reason: format!("unsupported export format '{s}'"),
            }),
        }
    }
}

/// Parameters for exporting one visual type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTarget {
    /// Visual type being exported, as requested.
    pub visual_type: String,
    /// Output format.
    pub format: ExportFormat,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Print density.
    pub dpi: u32,
    /// Physical page the pixels map onto.
    pub page: PageSize,
    /// JPEG quality 1-100; only meaningful for [`ExportFormat::Jpeg`].
    pub jpeg_quality: u8,
    /// MIME type of the artifact.
    pub mime_type: &'static str,
}

impl ExportTarget {
    /// Target for `visual_type`; unknown types export at poster size.
    #[must_use]
    pub fn for_visual(visual_type: &str, format: ExportFormat) -> Self {
        let dims = dimensions_for(visual_type);
        Self {
            visual_type: visual_type.to_string(),
            format,
            width: dims.width,
            height: dims.height,
            dpi: dims.dpi,
            page: dims.page,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            mime_type: format.mime_type(),
        }
    }

    /// Override the JPEG quality, clamped to 1-100.
    #[must_use]
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Download file name, e.g. `summit-poster.pdf`.
    #[must_use]
    pub fn file_name(&self, stem: &str) -> String {
        let stem = stem.trim();
        let stem = if stem.is_empty() { "export" } else { stem };
        format!("{stem}-{}.{}", self.visual_type, self.format.extension())
    }
}
