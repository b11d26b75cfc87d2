//! # Poster Core
//!
//! Declarative layout engine for event collateral: posters, flyers, press
//! releases and social posts.
//!
//! Each visual type names a set of elements (`title`, `qrCode`, ...) whose
//! placement is described in percentages of the canvas. The engine resolves
//! those descriptions per theme and variant and projects them into render
//! styles for two consumers:
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────────────────┐
//! │ ConfigStore  │──▶│   Resolver   │──▶│      Style Projector      │
//! │ color / bw   │   │ base+variant │   │ relative: %  (preview)    │
//! └──────────────┘   └──────────────┘   │ absolute: px (export)     │
//!        ▲                  ▲           └──────────────────────────┘
//!        │           ┌──────┴───────┐
//!        └───────────│  DevOverlay  │◀── live edits, persisted
//!          defaults  └──────────────┘
//! ```
//!
//! Compiles to WASM (`wasm` feature) for the browser editor.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod config;
pub mod dimensions;
pub mod engine;
pub mod error;
pub mod export;
pub mod merge;
pub mod overlay;
pub mod resolver;
pub mod store;
pub mod style;
pub mod transport;
pub mod units;
pub mod visual;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use backend::{FileBackend, MemoryBackend, OverlayBackend};
pub use config::{
    ConfigDocument, ElementConfig, ElementProperty, FontWeight, PropertyValue, VariantTable,
    VisualConfig, ABSOLUTE_SIZE_THRESHOLD,
};
pub use dimensions::{aspect_ratio, dimensions_for, page_size_from_pixels, Dimensions, PageSize};
pub use engine::LayoutEngine;
pub use error::{LayoutError, LayoutResult, StorageError};
pub use export::{ExportFormat, ExportTarget, DEFAULT_JPEG_QUALITY};
pub use merge::Merge;
pub use overlay::{DevOverlay, OverlayState, DEFAULT_NAMESPACE};
pub use resolver::{resolve, resolve_element, DOWNLOAD_VARIANT};
pub use store::{ConfigSource, ConfigStore};
pub use style::{project, CoordinateSpace, StyleMap, StyleProjector, StyleValue};
pub use transport::TransportDocument;
pub use units::{percent_to_pixels, pixels_to_percent};
pub use visual::{Theme, UnknownVisualType, VisualTypeId};

/// Poster core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
