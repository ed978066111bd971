//! Crop rectangles and coordinate-space conversions.
//!
//! Three coordinate spaces are in play:
//!
//! - **Relative**: percentages (0 to 100) of the displayed image, as reported
//!   by the crop widget while dragging.
//! - **Display pixels**: absolute pixels of the image as laid out on screen.
//! - **Natural pixels**: the source bitmap's true resolution.
//!
//! Relative and display-pixel crops are both expressed as [`CropRegion`]s
//! tagged with a [`CropUnit`]. Natural-pixel rectangles only ever exist
//! inside the render and export stages.
//!
//! All functions here are pure.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from coordinate conversions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The image has not been laid out yet, so no display size is known.
    #[error("Image has no display size yet ({width}x{height})")]
    NotLaidOut { width: f64, height: f64 },
}

/// Unit tag of a [`CropRegion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropUnit {
    /// Percentage of the displayed image (0 to 100).
    #[default]
    Relative,
    /// Absolute displayed pixels.
    Pixel,
}

/// A crop rectangle in relative or display-pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRegion {
    pub unit: CropUnit,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    /// Create a relative (percentage) region.
    pub fn relative(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            unit: CropUnit::Relative,
            x,
            y,
            width,
            height,
        }
    }

    /// Create a display-pixel region.
    pub fn pixel(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            unit: CropUnit::Pixel,
            x,
            y,
            width,
            height,
        }
    }

    /// True when the region has no area (still being drawn, or unset).
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Clamp the region into `[0, max_width] x [0, max_height]`.
    ///
    /// Negative origins move to zero and the size shrinks so the far edges
    /// stay inside the bounds. Non-finite values collapse to zero.
    pub fn clamped(&self, max_width: f64, max_height: f64) -> Self {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        let max_width = finite(max_width).max(0.0);
        let max_height = finite(max_height).max(0.0);
        let x = finite(self.x).clamp(0.0, max_width);
        let y = finite(self.y).clamp(0.0, max_height);
        let right = (finite(self.x) + finite(self.width)).clamp(x, max_width);
        let bottom = (finite(self.y) + finite(self.height)).clamp(y, max_height);

        Self {
            unit: self.unit,
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }
}

/// An axis-aligned rectangle at natural resolution.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NaturalRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Convert a region to display-pixel units.
///
/// Relative input is multiplied by `display / 100` per axis; pixel input is
/// returned unchanged, which makes the conversion idempotent.
pub fn to_pixel_crop(region: &CropRegion, display_width: f64, display_height: f64) -> CropRegion {
    match region.unit {
        CropUnit::Pixel => *region,
        CropUnit::Relative => CropRegion::pixel(
            region.x * display_width / 100.0,
            region.y * display_height / 100.0,
            region.width * display_width / 100.0,
            region.height * display_height / 100.0,
        ),
    }
}

/// Convert a region to relative (percentage) units.
///
/// Relative input passes through. Pixel input against a zero display
/// dimension maps to zero along that axis.
pub fn to_relative_crop(
    region: &CropRegion,
    display_width: f64,
    display_height: f64,
) -> CropRegion {
    match region.unit {
        CropUnit::Relative => *region,
        CropUnit::Pixel => {
            let per_x = if display_width > 0.0 { 100.0 / display_width } else { 0.0 };
            let per_y = if display_height > 0.0 { 100.0 / display_height } else { 0.0 };
            CropRegion::relative(
                region.x * per_x,
                region.y * per_y,
                region.width * per_x,
                region.height * per_y,
            )
        }
    }
}

/// Ratios mapping displayed pixels to natural pixels.
///
/// # Errors
///
/// Returns `GeometryError::NotLaidOut` when either display dimension is zero.
pub fn to_natural_scale(
    display_width: f64,
    display_height: f64,
    natural_width: f64,
    natural_height: f64,
) -> Result<(f64, f64), GeometryError> {
    if !(display_width > 0.0 && display_height > 0.0) {
        return Err(GeometryError::NotLaidOut {
            width: display_width,
            height: display_height,
        });
    }
    Ok((natural_width / display_width, natural_height / display_height))
}

/// Map a display-pixel region to natural resolution.
pub fn to_natural_rect(region: &CropRegion, scale_x: f64, scale_y: f64) -> NaturalRect {
    NaturalRect {
        x: region.x * scale_x,
        y: region.y * scale_y,
        width: region.width * scale_x,
        height: region.height * scale_y,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
