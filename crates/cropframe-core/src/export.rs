//! The synchronous half of exporting a crop.
//!
//! The last rendered preview is the source of truth: it is stretched to the
//! crop's natural size and encoded as PNG. Any filter round-trip and the
//! delivery happen afterwards, in the caller.

use thiserror::Error;

use crate::encode::{encode_surface_png, EncodeError};
use crate::geometry::CropRegion;
use crate::handle::ImageHandle;
use crate::render::{output_size, stretch_blit, RenderError, ResampleFilter};
use crate::surface::Surface;

/// A required input for export is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("No image is loaded")]
    NoImage,
    #[error("No preview has been rendered")]
    NoPreview,
    #[error("No crop has been completed")]
    NoCompletedCrop,
}

/// Errors from [`finalize_png`].
#[derive(Debug, Error)]
pub enum FinalizeError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Produce the final PNG for a completed crop.
///
/// All inputs are checked before anything is allocated. The output is
/// `floor(crop.width * scale_x) x floor(crop.height * scale_y)` pixels with
/// the preview stretched over it.
pub fn finalize_png(
    image: Option<&ImageHandle>,
    preview: Option<&Surface>,
    completed_crop: Option<&CropRegion>,
    filter: ResampleFilter,
) -> Result<Vec<u8>, FinalizeError> {
    let image = image.ok_or(PreconditionError::NoImage)?;
    let preview = preview.ok_or(PreconditionError::NoPreview)?;
    let crop = completed_crop.ok_or(PreconditionError::NoCompletedCrop)?;

    let (width, height) = output_size(image, crop)?;
    let final_surface = stretch_blit(preview, width, height, filter)?;
    log::debug!(
        "finalizing {}x{} export from {}x{} preview",
        width,
        height,
        preview.width,
        preview.height
    );

    Ok(encode_surface_png(&final_surface)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_image;
    use std::sync::Arc;

    fn image(width: u32, height: u32, display_w: f64, display_h: f64) -> ImageHandle {
        ImageHandle::new(Arc::new(Surface::transparent(width, height)), display_w, display_h)
    }

    #[test]
    fn test_preconditions_in_order() {
        let img = image(10, 10, 10.0, 10.0);
        let preview = Surface::transparent(5, 5);
        let crop = CropRegion::pixel(0.0, 0.0, 5.0, 5.0);

        let err = finalize_png(None, Some(&preview), Some(&crop), ResampleFilter::Bilinear);
        assert!(matches!(err, Err(FinalizeError::Precondition(PreconditionError::NoImage))));

        let err = finalize_png(Some(&img), None, Some(&crop), ResampleFilter::Bilinear);
        assert!(matches!(err, Err(FinalizeError::Precondition(PreconditionError::NoPreview))));

        let err = finalize_png(Some(&img), Some(&preview), None, ResampleFilter::Bilinear);
        assert!(matches!(
            err,
            Err(FinalizeError::Precondition(PreconditionError::NoCompletedCrop))
        ));
    }

    #[test]
    fn test_output_at_natural_size() {
        // 400x200 source shown at 200x100: crop of 50x25 display pixels
        let img = image(400, 200, 200.0, 100.0);
        let preview = Surface::new(50, 25, vec![200; 50 * 25 * 4]);
        let crop = CropRegion::pixel(0.0, 0.0, 50.0, 25.0);

        let png = finalize_png(Some(&img), Some(&preview), Some(&crop), ResampleFilter::Bilinear)
            .unwrap();
        let out = decode_image(&png).unwrap();

        assert_eq!((out.width, out.height), (100, 50));
    }

    #[test]
    fn test_empty_crop_is_render_error() {
        let img = image(10, 10, 10.0, 10.0);
        let preview = Surface::transparent(1, 1);
        let crop = CropRegion::pixel(0.0, 0.0, 0.0, 5.0);

        let err = finalize_png(Some(&img), Some(&preview), Some(&crop), ResampleFilter::Bilinear);
        assert!(matches!(err, Err(FinalizeError::Render(RenderError::EmptyCrop { .. }))));
    }
}
