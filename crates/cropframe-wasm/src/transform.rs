//! WASM bindings for crop geometry and preview rendering.
//!
//! Crop regions cross the boundary as plain objects:
//!
//! ```typescript
//! { unit: "relative" | "pixel", x: number, y: number, width: number, height: number }
//! ```

use std::sync::Arc;

use crate::types::{to_js_error, JsSurface};
use cropframe_core::{aspect, geometry, render, CropRegion, ImageHandle, RenderError, Surface};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn region_from_js(value: JsValue) -> Result<CropRegion, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(to_js_error)
}

fn optional_region_from_js(value: JsValue) -> Result<Option<CropRegion>, JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    region_from_js(value).map(Some)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(to_js_error)
}

/// Convert a crop to display pixels.
#[wasm_bindgen]
pub fn to_pixel_crop(region: JsValue, display_width: f64, display_height: f64) -> Result<JsValue, JsValue> {
    let region = region_from_js(region)?;
    to_js(&geometry::to_pixel_crop(&region, display_width, display_height))
}

/// Convert a crop to percentages of the displayed size.
#[wasm_bindgen]
pub fn to_relative_crop(region: JsValue, display_width: f64, display_height: f64) -> Result<JsValue, JsValue> {
    let region = region_from_js(region)?;
    to_js(&geometry::to_relative_crop(&region, display_width, display_height))
}

/// Centered crop for an optional aspect ratio, in relative units.
#[wasm_bindgen]
pub fn center_for_aspect(media_width: f64, media_height: f64, aspect: Option<f64>) -> Result<JsValue, JsValue> {
    to_js(&aspect::center_for_aspect(media_width, media_height, aspect))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AspectChange {
    crop: CropRegion,
    completed_crop: CropRegion,
}

/// New live and completed crops after an aspect change.
///
/// Returns `{ crop, completedCrop }`. Either input may be null.
#[wasm_bindgen]
pub fn adjust_for_aspect_change(
    current_crop: JsValue,
    current_completed_crop: JsValue,
    display_width: f64,
    display_height: f64,
    new_aspect: Option<f64>,
) -> Result<JsValue, JsValue> {
    let current = optional_region_from_js(current_crop)?;
    let completed = optional_region_from_js(current_completed_crop)?;
    let (crop, completed_crop) = aspect::adjust_for_aspect_change(
        current.as_ref(),
        completed.as_ref(),
        display_width,
        display_height,
        new_aspect,
    );
    to_js(&AspectChange {
        crop,
        completed_crop,
    })
}

/// Render the crop of `source` with rotation and zoom at natural resolution.
///
/// `source` is the full decoded image; `display_width`/`display_height` is
/// the size it is laid out at, which `crop` is relative to.
///
/// # Errors
///
/// Fails for an empty crop, a zero display size, or an output larger than
/// a canvas can hold.
#[wasm_bindgen]
pub fn render_preview(
    source: &JsSurface,
    display_width: f64,
    display_height: f64,
    crop: JsValue,
    scale: f64,
    rotation_degrees: f64,
) -> Result<JsSurface, JsValue> {
    let crop = region_from_js(crop)?;
    render_source(
        source.to_surface(),
        display_width,
        display_height,
        &crop,
        scale,
        rotation_degrees,
    )
    .map(JsSurface::from_surface)
    .map_err(to_js_error)
}

fn render_source(
    source: Surface,
    display_width: f64,
    display_height: f64,
    crop: &CropRegion,
    scale: f64,
    rotation_degrees: f64,
) -> Result<Surface, RenderError> {
    let image = ImageHandle::new(Arc::new(source), display_width, display_height);
    render::render(&image, crop, scale, rotation_degrees)
}
