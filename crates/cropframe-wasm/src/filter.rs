//! Display filter bindings.
//!
//! Modes are passed as u8: 0 = none, 1 = sepia, 2 = black and white.

use crate::types::{filter_mode_from_u8, JsSurface};
use cropframe_core::render;
use wasm_bindgen::prelude::*;

/// Return a filtered copy of `image` for on-screen display.
///
/// Matches the CSS `sepia(1)` / `grayscale(1)` filters. The exported file is
/// filtered by the filter service instead.
#[wasm_bindgen]
pub fn apply_display_filter(image: &JsSurface, mode: u8) -> JsSurface {
    let filtered = render::apply_display_filter(&image.to_surface(), filter_mode_from_u8(mode));
    JsSurface::from_surface(filtered)
}

/// CSS `filter` value for a mode, for hosts that filter with CSS.
#[wasm_bindgen]
pub fn css_filter(mode: u8) -> String {
    filter_mode_from_u8(mode).css_filter().to_string()
}

/// Filter-service operation name for a mode, or undefined for none.
#[wasm_bindgen]
pub fn filter_operation(mode: u8) -> Option<String> {
    filter_mode_from_u8(mode).operation().map(str::to_string)
}
