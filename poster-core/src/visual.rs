//! Visual type identifiers and themes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the fixed layout templates the editor can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualTypeId {
    /// Large-format event poster.
    Poster,
    /// Front side of a handout flyer.
    FlyerFront,
    /// Back side of a handout flyer.
    FlyerBack,
    /// Square social media post.
    SocialSquare,
    /// Portrait (4:5) social media post.
    SocialPortrait,
    /// Full-screen vertical story.
    Story,
    /// Single-page press release.
    PressRelease,
}

impl VisualTypeId {
    /// All visual types in display order.
    pub const ALL: [Self; 7] = [
        Self::Poster,
        Self::FlyerFront,
        Self::FlyerBack,
        Self::SocialSquare,
        Self::SocialPortrait,
        Self::Story,
        Self::PressRelease,
    ];

    /// The configuration key for this visual type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Poster => "poster",
            Self::FlyerFront => "flyer-front",
            Self::FlyerBack => "flyer-back",
            Self::SocialSquare => "social-square",
            Self::SocialPortrait => "social-portrait",
            Self::Story => "story",
            Self::PressRelease => "press-release",
        }
    }

    /// Parse a configuration key, returning `None` for unknown keys.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == key)
    }
}

impl fmt::Display for VisualTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown visual type key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown visual type: {0}")]
pub struct UnknownVisualType(pub String);

impl FromStr for VisualTypeId {
    type Err = UnknownVisualType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| UnknownVisualType(s.to_string()))
    }
}

/// Color mode of a configuration document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Full color rendering.
    #[default]
    Color,
    /// Black-and-white rendering (photocopy-friendly).
    #[serde(rename = "bw", alias = "black-and-white")]
    BlackAndWhite,
}

impl Theme {
    /// Both themes, color first.
    pub const ALL: [Self; 2] = [Self::Color, Self::BlackAndWhite];

    /// Storage key suffix used by overlay persistence.
    #[must_use]
    pub const fn storage_suffix(self) -> &'static str {
        match self {
            Self::Color => "_configs",
            Self::BlackAndWhite => "_configs_bw",
        }
    }

    /// Whether this is the black-and-white theme.
    #[must_use]
    pub const fn is_black_and_white(self) -> bool {
        matches!(self, Self::BlackAndWhite)
    }
}

impl From<bool> for Theme {
    /// Map the editor's `isBlackAndWhite` flag onto a theme.
    fn from(black_and_white: bool) -> Self {
        if black_and_white {
            Self::BlackAndWhite
        } else {
            Self::Color
        }
    }
}
