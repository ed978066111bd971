//! The editing session for browser hosts.
//!
//! The host owns timing: it debounces input with its own timer and calls
//! [`CropEditor::render_preview`] when the controls settle, then sends
//! [`CropEditor::export_png`] to the filter service named by
//! [`CropEditor::filter_operation`] (or straight to [`crate::DownloadLinks`]).

use std::sync::Arc;

use cropframe_core::{finalize_png, AspectPreset, CropLimits, EditorState, RenderJob, Surface};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::{filter_mode_to_u8, resample_from_u8, to_js_error, JsSurface};

/// Crop editor state plus the last rendered preview.
#[wasm_bindgen]
pub struct CropEditor {
    state: EditorState,
    preview: Option<(RenderJob, Surface)>,
}

#[wasm_bindgen]
impl CropEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            state: EditorState::default(),
            preview: None,
        }
    }

    /// Create an editor with custom limits (`CropLimits` object).
    pub fn with_limits(limits: JsValue) -> Result<CropEditor, JsValue> {
        let limits: CropLimits = serde_wasm_bindgen::from_value(limits).map_err(to_js_error)?;
        Ok(Self {
            state: EditorState::new(limits),
            preview: None,
        })
    }

    /// Load a decoded source shown at `display_width x display_height`.
    ///
    /// Crops, zoom and rotation reset and the old preview is dropped.
    pub fn load_image(&mut self, source: &JsSurface, display_width: f64, display_height: f64) {
        self.preview = None;
        self.state
            .load_image(Arc::new(source.to_surface()), display_width, display_height);
    }

    pub fn set_display_size(&mut self, display_width: f64, display_height: f64) -> bool {
        self.state.set_display_size(display_width, display_height)
    }

    pub fn set_live_crop(&mut self, region: JsValue) -> Result<(), JsValue> {
        self.state
            .set_live_crop(serde_wasm_bindgen::from_value(region).map_err(to_js_error)?);
        Ok(())
    }

    /// Commit a crop. Returns the stored pixel region, or undefined when no
    /// image is loaded.
    pub fn complete_crop(&mut self, region: JsValue) -> Result<JsValue, JsValue> {
        let region = serde_wasm_bindgen::from_value(region).map_err(to_js_error)?;
        match self.state.complete_crop(region) {
            Some(committed) => serde_wasm_bindgen::to_value(&committed).map_err(to_js_error),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Set the zoom factor. Returns whether a re-render is needed.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        self.state.set_scale(scale)
    }

    /// Set the rotation in degrees. Returns whether a re-render is needed.
    pub fn set_rotation(&mut self, degrees: f64) -> bool {
        self.state.set_rotation(degrees)
    }

    /// Select an aspect preset (`"free"`, `"widescreen"`, `"square"` or
    /// `{ custom: ratio }`). Selecting the active one again clears it.
    pub fn select_aspect(&mut self, preset: JsValue) -> Result<(), JsValue> {
        let preset: AspectPreset = serde_wasm_bindgen::from_value(preset).map_err(to_js_error)?;
        self.state.select_aspect(preset);
        Ok(())
    }

    /// Toggle sepia; returns the new mode code.
    pub fn toggle_sepia(&mut self) -> u8 {
        filter_mode_to_u8(self.state.toggle_sepia())
    }

    /// Toggle black-and-white; returns the new mode code.
    pub fn toggle_black_and_white(&mut self) -> u8 {
        filter_mode_to_u8(self.state.toggle_black_and_white())
    }

    #[wasm_bindgen(getter)]
    pub fn filter_mode(&self) -> u8 {
        filter_mode_to_u8(self.state.filter())
    }

    /// Filter-service operation for the current mode, or undefined.
    pub fn filter_operation(&self) -> Option<String> {
        self.state.filter().operation().map(str::to_string)
    }

    /// Editor state as a plain object.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.view()).map_err(to_js_error)
    }

    /// Render the preview if its inputs changed since the last render.
    ///
    /// Returns true when a new preview was produced. On failure the previous
    /// preview is kept and the error is thrown.
    pub fn render_preview(&mut self) -> Result<bool, JsValue> {
        self.refresh_preview().map_err(to_js_error)
    }

    /// The last preview with the display filter applied.
    pub fn display_preview(&self) -> Option<JsSurface> {
        self.preview.as_ref().map(|(_, surface)| {
            JsSurface::from_surface(cropframe_core::apply_display_filter(
                surface,
                self.state.filter(),
            ))
        })
    }

    /// The final PNG at natural resolution, stretched from the last preview.
    ///
    /// `resample`: 0 = Nearest, 1 = Bilinear, 2 = Lanczos3.
    pub fn export_png(&self, resample: u8) -> Result<Vec<u8>, JsValue> {
        finalize_png(
            self.state.image(),
            self.preview.as_ref().map(|(_, surface)| surface),
            self.state.completed_crop(),
            resample_from_u8(resample),
        )
        .map_err(to_js_error)
    }
}

impl CropEditor {
    fn refresh_preview(&mut self) -> Result<bool, cropframe_core::RenderError> {
        let Some(job) = self.state.render_job() else {
            return Ok(false);
        };
        if self.preview.as_ref().is_some_and(|(last, _)| *last == job) {
            return Ok(false);
        }
        let surface = job.render()?;
        self.preview = Some((job, surface));
        Ok(true)
    }

    fn view(&self) -> EditorView<'_> {
        EditorView {
            crop: self.state.crop(),
            completed_crop: self.state.completed_crop(),
            transform: self.state.transform(),
            filter: self.state.filter(),
            css_filter: self.state.filter().css_filter(),
        }
    }
}

impl Default for CropEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EditorView<'a> {
    crop: Option<&'a cropframe_core::CropRegion>,
    completed_crop: Option<&'a cropframe_core::CropRegion>,
    transform: &'a cropframe_core::TransformState,
    filter: cropframe_core::FilterMode,
    css_filter: &'static str,
}
