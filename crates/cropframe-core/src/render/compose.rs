//! Crop + rotate + scale compositing at natural resolution.
//!
//! The output surface is sized to the crop at natural resolution. The
//! source is drawn into it through a transform built in this order:
//!
//! ```text
//! translate(-crop_x, -crop_y)
//! translate(cx, cy)          // image center, natural pixels
//! rotate(theta)              // degrees -> radians, clockwise on screen
//! scale(s, s)                // user zoom
//! translate(-cx, -cy)
//! ```
//!
//! Anything outside the output bounds is clipped by the surface size;
//! output pixels the transformed source does not cover stay transparent.
//!
//! # Algorithm
//!
//! Inverse mapping: every output pixel center is pushed back through the
//! transform to find where it lands in the source, and the source is sampled
//! there with bilinear interpolation:
//!
//! ```text
//! p   = (ox + 0.5 + crop_x - cx, oy + 0.5 + crop_y - cy)
//! q   = ( p.x * cos(theta) + p.y * sin(theta),
//!        -p.x * sin(theta) + p.y * cos(theta)) / s
//! src = q + (cx, cy)
//! ```

use thiserror::Error;

use crate::geometry::{to_natural_rect, to_pixel_crop, CropRegion, GeometryError};
use crate::handle::ImageHandle;
use crate::surface::{Surface, CHANNELS};

/// Largest width or height a drawing surface may have.
pub const MAX_SURFACE_EDGE: u64 = 32_767;

/// Largest pixel count a drawing surface may have.
pub const MAX_SURFACE_AREA: u64 = 268_435_456;

/// Errors from rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The crop has no area at natural resolution.
    #[error("Crop region is empty ({width}x{height})")]
    EmptyCrop { width: f64, height: f64 },

    /// The image has no display size, so crops cannot be mapped.
    #[error(transparent)]
    NotLaidOut(#[from] GeometryError),

    /// No drawing surface of the requested size can be provided.
    #[error("Cannot allocate a {width}x{height} drawing surface")]
    SurfaceAllocation { width: u64, height: u64 },
}

/// Check a surface size against the drawable limits.
pub fn check_surface_size(width: u64, height: u64) -> Result<(), RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyCrop {
            width: width as f64,
            height: height as f64,
        });
    }
    if width > MAX_SURFACE_EDGE || height > MAX_SURFACE_EDGE || width * height > MAX_SURFACE_AREA
    {
        return Err(RenderError::SurfaceAllocation { width, height });
    }
    Ok(())
}

/// Natural-resolution output size for a completed crop.
///
/// Fractional sizes are truncated, matching how a canvas treats them.
pub fn output_size(image: &ImageHandle, completed_crop: &CropRegion) -> Result<(u32, u32), RenderError> {
    let (scale_x, scale_y) = image.natural_scale()?;
    let crop = to_pixel_crop(completed_crop, image.display_width(), image.display_height());
    if crop.is_empty() {
        return Err(RenderError::EmptyCrop {
            width: crop.width,
            height: crop.height,
        });
    }

    let natural = to_natural_rect(&crop, scale_x, scale_y);
    let width = natural.width.floor().max(0.0) as u64;
    let height = natural.height.floor().max(0.0) as u64;
    check_surface_size(width, height)?;
    Ok((width as u32, height as u32))
}

/// Render the cropped, rotated and scaled region of `image`.
///
/// `completed_crop` is in display space (pixel or relative units).
/// `scale` is the user zoom factor; non-finite or non-positive values are
/// treated as 1. `rotation_degrees` is clockwise on screen.
///
/// # Returns
///
/// An RGBA surface of `floor(crop.width * scale_x) x floor(crop.height * scale_y)`.
pub fn render(
    image: &ImageHandle,
    completed_crop: &CropRegion,
    scale: f64,
    rotation_degrees: f64,
) -> Result<Surface, RenderError> {
    let (out_w, out_h) = output_size(image, completed_crop)?;
    let (scale_x, scale_y) = image.natural_scale()?;
    let crop = to_pixel_crop(completed_crop, image.display_width(), image.display_height());
    let natural = to_natural_rect(&crop, scale_x, scale_y);

    let source = image.source();
    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
    let rotation = if rotation_degrees.is_finite() { rotation_degrees } else { 0.0 };

    // Fast path: untransformed crop on whole pixels is a straight copy
    if rotation.abs() < 0.001
        && (scale - 1.0).abs() < f64::EPSILON
        && natural.x.fract() == 0.0
        && natural.y.fract() == 0.0
    {
        return Ok(copy_region(source, natural.x as i64, natural.y as i64, out_w, out_h));
    }

    let center_x = source.width as f64 / 2.0;
    let center_y = source.height as f64 / 2.0;
    let theta = rotation.to_radians();
    let (sin, cos) = theta.sin_cos();

    let mut output = Surface::transparent(out_w, out_h);
    let row_bytes = out_w as usize * CHANNELS;

    for (oy, row) in output.pixels.chunks_exact_mut(row_bytes).enumerate() {
        let py = oy as f64 + 0.5 + natural.y - center_y;
        for (ox, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let px_x = ox as f64 + 0.5 + natural.x - center_x;

            let src_x = (px_x * cos + py * sin) / scale + center_x;
            let src_y = (-px_x * sin + py * cos) / scale + center_y;

            px.copy_from_slice(&sample_bilinear(source, src_x, src_y));
        }
    }

    Ok(output)
}

/// Copy a `width x height` window starting at (left, top) out of `source`.
/// Parts of the window outside the source stay transparent. Offsets far
/// outside the source saturate rather than wrap.
fn copy_region(source: &Surface, left: i64, top: i64, width: u32, height: u32) -> Surface {
    let mut output = Surface::transparent(width, height);
    let (src_w, src_h) = (source.width as i64, source.height as i64);

    let x_start = left.max(0);
    let x_end = left.saturating_add(width as i64).min(src_w);
    if x_start >= x_end {
        return output;
    }
    let span = (x_end - x_start) as usize * CHANNELS;

    for y in 0..height as i64 {
        let src_y = top.saturating_add(y);
        if src_y < 0 || src_y >= src_h {
            continue;
        }
        let src_idx = (src_y * src_w + x_start) as usize * CHANNELS;
        let dst_idx = (y * width as i64 + (x_start - left)) as usize * CHANNELS;
        output.pixels[dst_idx..dst_idx + span]
            .copy_from_slice(&source.pixels[src_idx..src_idx + span]);
    }

    output
}

/// Get a pixel as [f64; 4], clamping coordinates to the surface edge.
#[inline]
fn get_pixel_f64(image: &Surface, px: i64, py: i64) -> [f64; 4] {
    let x = px.clamp(0, image.width as i64 - 1) as usize;
    let y = py.clamp(0, image.height as i64 - 1) as usize;
    let idx = (y * image.width as usize + x) * CHANNELS;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
        image.pixels[idx + 3] as f64,
    ]
}

/// Sample the source at continuous coordinates (pixel `i` spans `[i, i + 1)`).
///
/// Bilinear interpolation between the 4 nearest pixel centers. Points outside
/// the source are transparent; points inside but past the outermost pixel
/// centers reuse the edge pixels.
fn sample_bilinear(image: &Surface, x: f64, y: f64) -> [u8; 4] {
    if x < 0.0 || y < 0.0 || x >= image.width as f64 || y >= image.height as f64 {
        return [0, 0, 0, 0];
    }

    let cx = x - 0.5;
    let cy = y - 0.5;
    let x0 = cx.floor();
    let y0 = cy.floor();

    // Fractional distances
    let fx = cx - x0;
    let fy = cy - y0;

    let (x0, y0) = (x0 as i64, y0 as i64);
    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x0 + 1, y0);
    let p01 = get_pixel_f64(image, x0, y0 + 1);
    let p11 = get_pixel_f64(image, x0 + 1, y0 + 1);

    let mut result = [0u8; 4];
    for i in 0..CHANNELS {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Opaque test image where each pixel encodes its position.
    fn test_source(width: u32, height: u32) -> Arc<Surface> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, ((x + y) * 3) as u8, 255]);
            }
        }
        Arc::new(Surface::new(width, height, pixels))
    }

    /// Four flat-colored quadrants.
    fn quadrant_source(size: u32) -> Arc<Surface> {
        let half = size / 2;
        let mut pixels = Vec::new();
        for y in 0..size {
            for x in 0..size {
                let color = match (x < half, y < half) {
                    (true, true) => [255, 0, 0, 255],
                    (false, true) => [0, 255, 0, 255],
                    (true, false) => [0, 0, 255, 255],
                    (false, false) => [255, 255, 0, 255],
                };
                pixels.extend_from_slice(&color);
            }
        }
        Arc::new(Surface::new(size, size, pixels))
    }

    fn handle(source: Arc<Surface>, dw: f64, dh: f64) -> ImageHandle {
        ImageHandle::new(source, dw, dh)
    }

    #[test]
    fn test_identity_crop_matches_source() {
        let src = test_source(40, 30);
        let img = handle(Arc::clone(&src), 40.0, 30.0);
        let out = render(&img, &CropRegion::pixel(10.0, 5.0, 20.0, 10.0), 1.0, 0.0).unwrap();

        assert_eq!((out.width, out.height), (20, 10));
        for y in 0..10 {
            for x in 0..20 {
                assert_eq!(out.pixel(x, y), src.pixel(x + 10, y + 5));
            }
        }
    }

    #[test]
    fn test_output_sized_at_natural_resolution() {
        let src = test_source(200, 100);
        let img = handle(src, 100.0, 50.0);
        let out = render(&img, &CropRegion::pixel(10.0, 10.0, 25.0, 15.5), 1.0, 0.0).unwrap();

        assert_eq!(out.width, 50);
        assert_eq!(out.height, 31);
    }

    #[test]
    fn test_crop_offset_scaled_to_natural() {
        let src = test_source(10, 10);
        let img = handle(Arc::clone(&src), 5.0, 5.0);
        let out = render(&img, &CropRegion::pixel(1.0, 1.0, 2.0, 2.0), 1.0, 0.0).unwrap();

        assert_eq!((out.width, out.height), (4, 4));
        assert_eq!(out.pixel(0, 0), src.pixel(2, 2));
        assert_eq!(out.pixel(3, 3), src.pixel(5, 5));
    }

    #[test]
    fn test_relative_crop_accepted() {
        let src = test_source(100, 100);
        let img = handle(src, 100.0, 100.0);
        let out = render(&img, &CropRegion::relative(0.0, 0.0, 50.0, 25.0), 1.0, 0.0).unwrap();

        assert_eq!((out.width, out.height), (50, 25));
    }

    #[test]
    fn test_rotate_90_clockwise() {
        let src = test_source(4, 4);
        let img = handle(Arc::clone(&src), 4.0, 4.0);
        let out = render(&img, &CropRegion::pixel(0.0, 0.0, 4.0, 4.0), 1.0, 90.0).unwrap();

        // Bottom-left of the source ends up top-left
        assert_eq!(out.pixel(0, 0), src.pixel(0, 3));
        assert_eq!(out.pixel(3, 0), src.pixel(0, 0));
        assert_eq!(out.pixel(3, 3), src.pixel(3, 0));
    }

    #[test]
    fn test_rotate_180() {
        let src = test_source(6, 4);
        let img = handle(Arc::clone(&src), 6.0, 4.0);
        let out = render(&img, &CropRegion::pixel(0.0, 0.0, 6.0, 4.0), 1.0, 180.0).unwrap();

        assert_eq!(out.pixel(0, 0), src.pixel(5, 3));
        assert_eq!(out.pixel(5, 3), src.pixel(0, 0));
    }

    #[test]
    fn test_rotation_leaves_corners_transparent() {
        let src = test_source(10, 10);
        let img = handle(src, 10.0, 10.0);
        let out = render(&img, &CropRegion::pixel(0.0, 0.0, 10.0, 10.0), 1.0, 45.0).unwrap();

        assert_eq!(out.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(out.pixel(5, 5).unwrap()[3], 255);
    }

    #[test]
    fn test_scale_zooms_about_center() {
        let src = quadrant_source(8);
        let img = handle(src, 8.0, 8.0);
        let out = render(&img, &CropRegion::pixel(0.0, 0.0, 8.0, 8.0), 2.0, 0.0).unwrap();

        assert_eq!((out.width, out.height), (8, 8));
        assert_eq!(out.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(out.pixel(7, 0), Some([0, 255, 0, 255]));
        assert_eq!(out.pixel(0, 7), Some([0, 0, 255, 255]));
        assert_eq!(out.pixel(7, 7), Some([255, 255, 0, 255]));
    }

    #[test]
    fn test_crop_past_source_is_transparent() {
        let src = test_source(10, 10);
        let img = handle(src, 10.0, 10.0);
        let out = render(&img, &CropRegion::pixel(8.0, 0.0, 4.0, 2.0), 1.0, 0.0).unwrap();

        assert_eq!(out.pixel(1, 0).unwrap()[3], 255);
        assert_eq!(out.pixel(2, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_far_offset_crop_is_transparent() {
        let img = handle(test_source(10, 10), 10.0, 10.0);

        for (x, y) in [(1e30, 0.0), (-1e30, 0.0), (0.0, 1e30), (0.0, -1e30), (1e30, 1e30)] {
            let out = render(&img, &CropRegion::pixel(x, y, 4.0, 4.0), 1.0, 0.0).unwrap();
            assert_eq!((out.width, out.height), (4, 4));
            assert!(out.pixels.iter().all(|&b| b == 0), "offset ({x}, {y})");
        }
    }

    #[test]
    fn test_empty_crop_error() {
        let img = handle(test_source(10, 10), 10.0, 10.0);
        let result = render(&img, &CropRegion::pixel(0.0, 0.0, 0.0, 5.0), 1.0, 0.0);
        assert!(matches!(result, Err(RenderError::EmptyCrop { .. })));

        // Sub-pixel at natural resolution
        let result = render(&img, &CropRegion::pixel(0.0, 0.0, 0.5, 5.0), 1.0, 0.0);
        assert!(matches!(result, Err(RenderError::EmptyCrop { .. })));
    }

    #[test]
    fn test_not_laid_out_error() {
        let img = handle(test_source(10, 10), 0.0, 10.0);
        let result = render(&img, &CropRegion::pixel(0.0, 0.0, 5.0, 5.0), 1.0, 0.0);
        assert!(matches!(result, Err(RenderError::NotLaidOut(_))));
    }

    #[test]
    fn test_surface_allocation_error() {
        let img = handle(test_source(10, 10), 1.0, 1.0);
        let result = render(&img, &CropRegion::pixel(0.0, 0.0, 5000.0, 1.0), 1.0, 0.0);
        assert!(matches!(result, Err(RenderError::SurfaceAllocation { .. })));
    }

    #[test]
    fn test_invalid_scale_treated_as_identity() {
        let src = test_source(10, 10);
        let img = handle(src, 10.0, 10.0);
        let crop = CropRegion::pixel(2.0, 2.0, 4.0, 4.0);

        let expected = render(&img, &crop, 1.0, 0.0).unwrap();
        assert_eq!(render(&img, &crop, f64::NAN, 0.0).unwrap(), expected);
        assert_eq!(render(&img, &crop, 0.0, 0.0).unwrap(), expected);
    }

    #[test]
    fn test_full_turn_matches_identity() {
        let src = test_source(12, 12);
        let img = handle(src, 12.0, 12.0);
        let crop = CropRegion::pixel(2.0, 2.0, 8.0, 8.0);

        let straight = render(&img, &crop, 1.0, 0.0).unwrap();
        let turned = render(&img, &crop, 1.0, 360.0).unwrap();
        assert_eq!(straight, turned);
    }

    #[test]
    fn test_sample_bilinear_midpoint() {
        let src = Surface::new(2, 1, vec![0, 0, 0, 255, 200, 100, 50, 255]);
        // Halfway between the two pixel centers
        assert_eq!(sample_bilinear(&src, 1.0, 0.5), [100, 50, 25, 255]);
        // Outside
        assert_eq!(sample_bilinear(&src, -0.1, 0.5), [0, 0, 0, 0]);
        assert_eq!(sample_bilinear(&src, 2.0, 0.5), [0, 0, 0, 0]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;

    proptest! {
        /// Property: output dimensions follow the crop, whatever the transform.
        #[test]
        fn prop_output_dimensions(
            (w, h) in (4u32..=40, 4u32..=40),
            (cw, ch) in (1.0f64..=40.0, 1.0f64..=40.0),
            scale in 1.0f64..=4.0,
            rotation in -180.0f64..=180.0,
        ) {
            let img = ImageHandle::new(Arc::new(Surface::transparent(w, h)), w as f64, h as f64);
            let out = render(&img, &CropRegion::pixel(0.0, 0.0, cw, ch), scale, rotation).unwrap();

            prop_assert_eq!(out.width, cw.floor() as u32);
            prop_assert_eq!(out.height, ch.floor() as u32);
            prop_assert_eq!(out.byte_size(), out.width as usize * out.height as usize * CHANNELS);
        }

        /// Property: rendering is deterministic.
        #[test]
        fn prop_render_deterministic(
            rotation in -180.0f64..=180.0,
            scale in 1.0f64..=3.0,
        ) {
            let pixels: Vec<u8> = (0..16 * 16 * CHANNELS).map(|i| (i % 251) as u8).collect();
            let img = ImageHandle::new(Arc::new(Surface::new(16, 16, pixels)), 16.0, 16.0);
            let crop = CropRegion::pixel(2.0, 3.0, 10.0, 9.0);

            let a = render(&img, &crop, scale, rotation).unwrap();
            let b = render(&img, &crop, scale, rotation).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
