//! WASM-compatible wrapper types for image data.

use cropframe_core::{FilterMode, ResampleFilter, Surface};
use wasm_bindgen::prelude::*;

/// An RGBA image for JavaScript.
///
/// Pixels live in WASM memory. `pixels()` copies them out as a
/// `Uint8Array`, which can be wrapped in an `ImageData` directly.
#[wasm_bindgen]
pub struct JsSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsSurface {
    /// Create a surface from RGBA pixel data (4 bytes per pixel, row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsSurface, JsValue> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(JsValue::from_str(&format!(
                "Invalid pixel data: expected {expected} bytes, got {}",
                pixels.len()
            )));
        }
        Ok(JsSurface {
            width,
            height,
            pixels,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array. This is a copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsSurface {
    pub(crate) fn from_surface(surface: Surface) -> Self {
        Self {
            width: surface.width,
            height: surface.height,
            pixels: surface.pixels,
        }
    }

    /// Copy into a core surface.
    pub(crate) fn to_surface(&self) -> Surface {
        Surface::new(self.width, self.height, self.pixels.clone())
    }
}

/// Convert a u8 value to a resampling filter.
///
/// 0 = Nearest, 1 = Bilinear, 2 = Lanczos3. Anything else is Bilinear.
pub(crate) fn resample_from_u8(value: u8) -> ResampleFilter {
    match value {
        0 => ResampleFilter::Nearest,
        2 => ResampleFilter::Lanczos3,
        _ => ResampleFilter::Bilinear,
    }
}

/// Convert a u8 value to a filter mode.
///
/// 0 = none, 1 = sepia, 2 = black and white. Anything else is none.
pub(crate) fn filter_mode_from_u8(value: u8) -> FilterMode {
    match value {
        1 => FilterMode::Sepia,
        2 => FilterMode::BlackAndWhite,
        _ => FilterMode::None,
    }
}

pub(crate) fn filter_mode_to_u8(mode: FilterMode) -> u8 {
    match mode {
        FilterMode::None => 0,
        FilterMode::Sepia => 1,
        FilterMode::BlackAndWhite => 2,
    }
}

/// Map any displayable error to a JS exception value.
pub(crate) fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
