//! Loaded source image plus its on-screen layout.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::geometry::{to_natural_scale, GeometryError};
use crate::surface::Surface;

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// A reference to the loaded source bitmap.
///
/// The pixel data is shared and never mutated; cloning a handle is cheap.
/// Every handle created with [`ImageHandle::new`] gets a fresh id, so two
/// loads of the same file are still distinct images.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    id: u64,
    source: Arc<Surface>,
    display_width: f64,
    display_height: f64,
}

impl ImageHandle {
    /// Wrap a decoded source laid out at `display_width x display_height`.
    pub fn new(source: Arc<Surface>, display_width: f64, display_height: f64) -> Self {
        Self {
            id: NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed),
            source,
            display_width,
            display_height,
        }
    }

    /// Same image, new layout size. Keeps the id.
    pub fn with_display_size(&self, display_width: f64, display_height: f64) -> Self {
        Self {
            display_width,
            display_height,
            ..self.clone()
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn source(&self) -> &Arc<Surface> {
        &self.source
    }

    pub fn natural_width(&self) -> u32 {
        self.source.width
    }

    pub fn natural_height(&self) -> u32 {
        self.source.height
    }

    pub fn display_width(&self) -> f64 {
        self.display_width
    }

    pub fn display_height(&self) -> f64 {
        self.display_height
    }

    /// Display-to-natural ratios for this layout.
    pub fn natural_scale(&self) -> Result<(f64, f64), GeometryError> {
        to_natural_scale(
            self.display_width,
            self.display_height,
            self.natural_width() as f64,
            self.natural_height() as f64,
        )
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.display_width == other.display_width
            && self.display_height == other.display_height
    }
}
