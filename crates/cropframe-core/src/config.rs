//! Limits applied to user-controlled transform values.

use serde::{Deserialize, Serialize};

use crate::aspect::{AspectPreset, DEFAULT_COVERAGE};

/// Bounds and choices for the crop controls.
///
/// Every field has a default, so a partial serialized form is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropLimits {
    /// Smallest zoom factor. Values below it clamp to it.
    pub min_scale: f64,
    /// Rotation is clamped to `[-max_rotation, max_rotation]` degrees.
    pub max_rotation: f64,
    /// Aspect choices offered to the user, in menu order.
    pub aspect_presets: Vec<AspectPreset>,
    /// Share of the image covered by a freshly placed crop, in percent.
    pub default_coverage: f64,
}

impl Default for CropLimits {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_rotation: 180.0,
            aspect_presets: vec![
                AspectPreset::Free,
                AspectPreset::Widescreen,
                AspectPreset::Square,
            ],
            default_coverage: DEFAULT_COVERAGE,
        }
    }
}

impl CropLimits {
    /// Clamp a zoom factor to the floor. `None` for non-finite input.
    pub fn clamp_scale(&self, scale: f64) -> Option<f64> {
        scale.is_finite().then(|| scale.max(self.min_scale))
    }

    /// Clamp a rotation in degrees. `None` for non-finite input.
    pub fn clamp_rotation(&self, degrees: f64) -> Option<f64> {
        let bound = self.max_rotation.abs();
        degrees.is_finite().then(|| degrees.clamp(-bound, bound))
    }
}
