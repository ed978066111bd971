//! Live-preview color filters.
//!
//! These mirror the CSS `sepia(1)` and `grayscale(1)` filter functions and are
//! only meant for the on-screen preview. They never touch the rendered crop;
//! the exported file gets its filter from the filter service instead.

use crate::luminance::calculate_luminance_u8;
use crate::state::FilterMode;
use crate::surface::{Surface, CHANNELS};

/// CSS `sepia(1)` color matrix (rows produce R, G, B).
const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Return a filtered copy of `surface` for display. Alpha is preserved.
pub fn apply_display_filter(surface: &Surface, mode: FilterMode) -> Surface {
    let mut output = surface.clone();
    apply_display_filter_in_place(&mut output.pixels, mode);
    output
}

/// Filter RGBA bytes in place.
pub fn apply_display_filter_in_place(pixels: &mut [u8], mode: FilterMode) {
    match mode {
        FilterMode::None => {}
        FilterMode::BlackAndWhite => {
            for px in pixels.chunks_exact_mut(CHANNELS) {
                let lum = calculate_luminance_u8(px[0], px[1], px[2]);
                px[0] = lum;
                px[1] = lum;
                px[2] = lum;
            }
        }
        FilterMode::Sepia => {
            for px in pixels.chunks_exact_mut(CHANNELS) {
                let rgb = [px[0] as f32, px[1] as f32, px[2] as f32];
                for (channel, row) in SEPIA_MATRIX.iter().enumerate() {
                    let v = row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2];
                    px[channel] = v.clamp(0.0, 255.0).round() as u8;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_pixel(rgba: [u8; 4]) -> Surface {
        Surface::new(1, 1, rgba.to_vec())
    }

    #[test]
    fn test_none_is_identity() {
        let src = one_pixel([10, 20, 30, 40]);
        assert_eq!(apply_display_filter(&src, FilterMode::None), src);
    }

    #[test]
    fn test_grayscale_equalizes_channels() {
        let out = apply_display_filter(&one_pixel([255, 0, 0, 200]), FilterMode::BlackAndWhite);
        let px = out.pixel(0, 0).unwrap();

        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert!((px[0] as i32 - 54).abs() <= 1);
        assert_eq!(px[3], 200);
    }

    #[test]
    fn test_sepia_white_saturates_warm() {
        let out = apply_display_filter(&one_pixel([255, 255, 255, 255]), FilterMode::Sepia);
        let px = out.pixel(0, 0).unwrap();

        // R and G rows sum past 1.0 and clip; B row sums to 0.937
        assert_eq!(px[0], 255);
        assert_eq!(px[1], 255);
        assert_eq!(px[2], 239);
    }

    #[test]
    fn test_sepia_black_stays_black() {
        let out = apply_display_filter(&one_pixel([0, 0, 0, 255]), FilterMode::Sepia);
        assert_eq!(out.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_source_untouched() {
        let src = one_pixel([100, 150, 200, 255]);
        let _ = apply_display_filter(&src, FilterMode::Sepia);
        assert_eq!(src.pixel(0, 0), Some([100, 150, 200, 255]));
    }
}
