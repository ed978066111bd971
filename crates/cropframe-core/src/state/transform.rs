use serde::{Deserialize, Serialize};

use crate::aspect::AspectPreset;
use crate::config::CropLimits;

/// Zoom, rotation and aspect lock for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformState {
    /// Zoom factor, never below the configured floor.
    pub scale: f64,
    /// Rotation in degrees, clockwise on screen.
    pub rotation: f64,
    /// Active aspect lock. `None` means no constraint.
    pub aspect: Option<AspectPreset>,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation: 0.0,
            aspect: None,
        }
    }
}

impl TransformState {
    /// Set the zoom factor. Non-finite input is ignored.
    ///
    /// Returns whether the stored value changed.
    pub fn set_scale(&mut self, scale: f64, limits: &CropLimits) -> bool {
        match limits.clamp_scale(scale) {
            Some(s) if s != self.scale => {
                self.scale = s;
                true
            }
            _ => false,
        }
    }

    /// Set the rotation in degrees. Non-finite input is ignored.
    ///
    /// Returns whether the stored value changed.
    pub fn set_rotation(&mut self, degrees: f64, limits: &CropLimits) -> bool {
        match limits.clamp_rotation(degrees) {
            Some(r) if r != self.rotation => {
                self.rotation = r;
                true
            }
            _ => false,
        }
    }

    /// Width / height ratio of the active aspect lock.
    pub fn aspect_ratio(&self) -> Option<f64> {
        self.aspect.and_then(AspectPreset::ratio)
    }
}
