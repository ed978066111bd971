use crate::geometry::CropRegion;
use crate::handle::ImageHandle;
use crate::render::{render, RenderError};
use crate::surface::Surface;

/// Everything a preview render depends on.
///
/// Two jobs compare equal when they would produce the same surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    pub image: ImageHandle,
    /// Completed crop in display pixels.
    pub crop: CropRegion,
    pub scale: f64,
    pub rotation: f64,
}

impl RenderJob {
    pub fn render(&self) -> Result<Surface, RenderError> {
        render(&self.image, &self.crop, self.scale, self.rotation)
    }
}
