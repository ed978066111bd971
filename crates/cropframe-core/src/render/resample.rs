//! Stretch-blit of one surface into another of a different size.
//!
//! Export copies the already-rendered preview into a final-resolution
//! surface this way, so what gets exported is exactly what was previewed.

use serde::{Deserialize, Serialize};

use super::compose::{check_surface_size, RenderError};
use crate::surface::Surface;

/// Filter type for resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl ResampleFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResampleFilter::Nearest => image::imageops::FilterType::Nearest,
            ResampleFilter::Bilinear => image::imageops::FilterType::Triangle,
            ResampleFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Stretch `source` over a new `width x height` surface.
///
/// # Errors
///
/// Returns `RenderError::SurfaceAllocation` if the target exceeds the
/// drawable limits, `RenderError::EmptyCrop` for zero-sized targets.
pub fn stretch_blit(
    source: &Surface,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> Result<Surface, RenderError> {
    check_surface_size(width as u64, height as u64)?;

    // Fast path: if dimensions match, just clone
    if source.width == width && source.height == height {
        return Ok(source.clone());
    }

    let rgba = source.to_rgba_image().ok_or(RenderError::SurfaceAllocation {
        width: source.width as u64,
        height: source.height as u64,
    })?;

    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());
    Ok(Surface::from_rgba_image(resized))
}
