//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@cropframe/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const source = decode_image(bytes);
//! console.log(`Decoded ${source.width}x${source.height}`);
//! ```

use crate::types::{to_js_error, JsSurface};
use cropframe_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a PNG or JPEG file into RGBA pixels.
///
/// EXIF orientation is applied, so the result matches what an `<img>`
/// element shows.
///
/// # Errors
///
/// Returns an error if the format is not recognized or the data is corrupt.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsSurface, JsValue> {
    decode::decode_image(bytes)
        .map(JsSurface::from_surface)
        .map_err(to_js_error)
}

/// EXIF orientation value (1-8) of a file; 1 when absent.
#[wasm_bindgen]
pub fn image_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}
