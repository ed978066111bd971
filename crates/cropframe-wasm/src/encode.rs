//! PNG encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { encode_png, encode_png_from_surface } from '@cropframe/wasm';
//!
//! const png = encode_png(pixels, width, height);
//! const png2 = encode_png_from_surface(preview);
//! ```

use crate::types::{to_js_error, JsSurface};
use cropframe_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGBA pixel data to PNG bytes.
///
/// # Errors
///
/// Returns an error if the pixel data length doesn't match
/// `width * height * 4` or either dimension is zero.
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(pixels, width, height).map_err(to_js_error)
}

/// Encode a surface to PNG bytes.
#[wasm_bindgen]
pub fn encode_png_from_surface(image: &JsSurface) -> Result<Vec<u8>, JsValue> {
    encode::encode_surface_png(&image.to_surface()).map_err(to_js_error)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_invalid_length_errors() {
        assert!(encode_png(&[0, 0, 0], 1, 1).is_err());
    }
}
