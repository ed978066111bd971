//! Aspect-ratio presets and crop placement.
//!
//! The crop widget enforces the active ratio while the user drags; this
//! module only decides where a crop lands when the ratio changes or a new
//! image is loaded.

use serde::{Deserialize, Serialize};

use crate::geometry::{to_pixel_crop, to_relative_crop, CropRegion};

/// Share of the media covered by a freshly placed crop, in percent.
pub const DEFAULT_COVERAGE: f64 = 90.0;

/// Aspect-ratio choices offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectPreset {
    /// No ratio constraint.
    Free,
    /// 16:9
    Widescreen,
    /// 1:1
    Square,
    /// Any other width / height ratio.
    Custom(f64),
}

impl AspectPreset {
    /// Width divided by height, or `None` for [`AspectPreset::Free`].
    ///
    /// Non-positive or non-finite custom ratios behave like `Free`.
    pub fn ratio(self) -> Option<f64> {
        match self {
            AspectPreset::Free => None,
            AspectPreset::Widescreen => Some(16.0 / 9.0),
            AspectPreset::Square => Some(1.0),
            AspectPreset::Custom(r) if r.is_finite() && r > 0.0 => Some(r),
            AspectPreset::Custom(_) => None,
        }
    }
}

/// Place a centered crop for `aspect` on media of the given size.
///
/// The crop spans [`DEFAULT_COVERAGE`] percent of the media width. When that
/// would make it taller than the media, it spans that share of the height
/// instead. Without an aspect the crop covers the same share on both axes,
/// which is the placement used right after an image loads.
///
/// Returns a relative (percentage) region.
pub fn center_for_aspect(media_width: f64, media_height: f64, aspect: Option<f64>) -> CropRegion {
    center_with_coverage(media_width, media_height, aspect, DEFAULT_COVERAGE)
}

/// [`center_for_aspect`] with an explicit coverage percentage.
///
/// Coverage outside `(0, 100]` falls back to [`DEFAULT_COVERAGE`].
pub fn center_with_coverage(
    media_width: f64,
    media_height: f64,
    aspect: Option<f64>,
    coverage_percent: f64,
) -> CropRegion {
    let coverage_percent = if coverage_percent.is_finite()
        && coverage_percent > 0.0
        && coverage_percent <= 100.0
    {
        coverage_percent
    } else {
        DEFAULT_COVERAGE
    };
    let coverage = coverage_percent / 100.0;
    let ratio = aspect.filter(|r| r.is_finite() && *r > 0.0);

    let Some(ratio) = ratio.filter(|_| media_width > 0.0 && media_height > 0.0) else {
        let margin = (100.0 - coverage_percent) / 2.0;
        return CropRegion::relative(margin, margin, coverage_percent, coverage_percent);
    };

    let mut width = media_width * coverage;
    let mut height = width / ratio;
    if height > media_height {
        height = media_height * coverage;
        width = height * ratio;
    }

    let pixel = CropRegion::pixel(
        (media_width - width) / 2.0,
        (media_height - height) / 2.0,
        width,
        height,
    );
    to_relative_crop(&pixel, media_width, media_height)
}

/// Compute the live and completed crops after the aspect selection changed.
///
/// With a completed crop the region is recentered for the new aspect.
/// Otherwise the current live crop keeps its origin and size (absent or
/// zero values default to `0, 0, 100%, 100%`); the new ratio only applies to
/// subsequent drags.
///
/// Returns `(live crop in relative units, completed crop in display pixels)`.
/// The completed crop is clamped to the displayed bounds.
pub fn adjust_for_aspect_change(
    current_crop: Option<&CropRegion>,
    current_completed_crop: Option<&CropRegion>,
    display_width: f64,
    display_height: f64,
    new_aspect: Option<f64>,
) -> (CropRegion, CropRegion) {
    let new_crop = if current_completed_crop.is_some() {
        center_for_aspect(display_width, display_height, new_aspect)
    } else {
        let current = current_crop
            .map(|c| to_relative_crop(c, display_width, display_height))
            .unwrap_or_default();
        let or = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };
        CropRegion::relative(
            or(current.x, 0.0),
            or(current.y, 0.0),
            or(current.width, 100.0),
            or(current.height, 100.0),
        )
    };

    let new_completed = to_pixel_crop(&new_crop, display_width, display_height)
        .clamped(display_width, display_height);
    (new_crop, new_completed)
}
