//! Cropframe WASM - WebAssembly bindings for Cropframe
//!
//! Exposes the cropframe-core pipeline to a browser host.
//!
//! # Module Structure
//!
//! - `types` - `JsSurface`, the RGBA image wrapper
//! - `decode` - Source decoding with EXIF orientation
//! - `transform` - Crop geometry and preview rendering
//! - `filter` - Display filters (sepia, grayscale)
//! - `encode` - PNG encoding
//! - `editor` - `CropEditor`, the stateful editing session
//! - `delivery` - Blob object URLs for downloads
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, CropEditor, DownloadLinks } from '@cropframe/wasm';
//!
//! await init();
//!
//! const source = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const editor = new CropEditor();
//! editor.load_image(source, img.width, img.height);
//! editor.complete_crop({ unit: "pixel", x: 10, y: 10, width: 200, height: 100 });
//! editor.render_preview();
//!
//! const links = new DownloadLinks();
//! const url = links.deliver(editor.export_png(1), "cropped.png", "image/png");
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod delivery;
mod editor;
mod encode;
mod filter;
mod transform;
mod types;

pub use decode::{decode_image, image_orientation};
pub use delivery::{DownloadLinks, JsDownloadLink};
pub use editor::CropEditor;
pub use encode::{encode_png, encode_png_from_surface};
pub use filter::{apply_display_filter, css_filter, filter_operation};
pub use transform::{
    adjust_for_aspect_change, center_for_aspect, render_preview, to_pixel_crop, to_relative_crop,
};
pub use types::JsSurface;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
