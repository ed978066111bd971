use std::sync::Arc;

use crate::aspect::{adjust_for_aspect_change, center_with_coverage, AspectPreset};
use crate::config::CropLimits;
use crate::geometry::{to_pixel_crop, to_relative_crop, CropRegion};
use crate::handle::ImageHandle;
use crate::surface::Surface;

use super::{FilterMode, RenderJob, TransformState};

/// The editing session's data: loaded image, crops, transform and filter.
///
/// All mutations go through methods so the invariants hold after each one:
/// the completed crop always lies inside the displayed image, and the
/// transform stays within [`CropLimits`].
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    limits: CropLimits,
    image: Option<ImageHandle>,
    crop: Option<CropRegion>,
    completed_crop: Option<CropRegion>,
    transform: TransformState,
    filter: FilterMode,
}

impl EditorState {
    pub fn new(limits: CropLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    pub fn limits(&self) -> &CropLimits {
        &self.limits
    }

    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }

    /// The live crop as last reported by the crop widget.
    pub fn crop(&self) -> Option<&CropRegion> {
        self.crop.as_ref()
    }

    /// The committed crop, in display pixels.
    pub fn completed_crop(&self) -> Option<&CropRegion> {
        self.completed_crop.as_ref()
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    /// Replace the source image.
    ///
    /// Crops, zoom and rotation reset. The aspect lock and filter carry over,
    /// and the live crop is placed centered for the current aspect.
    pub fn load_image(
        &mut self,
        source: Arc<Surface>,
        display_width: f64,
        display_height: f64,
    ) -> &ImageHandle {
        self.completed_crop = None;
        self.transform.scale = 1.0;
        self.transform.rotation = 0.0;
        self.crop = Some(center_with_coverage(
            display_width,
            display_height,
            self.transform.aspect_ratio(),
            self.limits.default_coverage,
        ));

        let handle = ImageHandle::new(source, display_width, display_height);
        log::debug!(
            "loaded image {} ({}x{} shown at {}x{})",
            handle.id(),
            handle.natural_width(),
            handle.natural_height(),
            display_width,
            display_height
        );
        self.image.insert(handle)
    }

    /// Update the laid-out size of the current image.
    ///
    /// The completed crop is rescaled to stay on the same part of the image.
    /// Returns `false` when no image is loaded.
    pub fn set_display_size(&mut self, display_width: f64, display_height: f64) -> bool {
        let Some(image) = self.image.as_ref() else {
            return false;
        };

        let (old_w, old_h) = (image.display_width(), image.display_height());
        self.completed_crop = self.completed_crop.map(|c| {
            let relative = to_relative_crop(&c, old_w, old_h);
            to_pixel_crop(&relative, display_width, display_height)
                .clamped(display_width, display_height)
        });
        self.image = Some(image.with_display_size(display_width, display_height));
        true
    }

    pub fn set_live_crop(&mut self, region: CropRegion) {
        self.crop = Some(region);
    }

    /// Commit a crop. It is converted to display pixels and clamped to the
    /// displayed bounds.
    ///
    /// Returns the stored region, or `None` when no image is loaded.
    pub fn complete_crop(&mut self, region: CropRegion) -> Option<CropRegion> {
        let image = self.image.as_ref()?;
        let (w, h) = (image.display_width(), image.display_height());
        let committed = to_pixel_crop(&region, w, h).clamped(w, h);
        self.completed_crop = Some(committed);
        Some(committed)
    }

    pub fn set_scale(&mut self, scale: f64) -> bool {
        self.transform.set_scale(scale, &self.limits)
    }

    pub fn set_rotation(&mut self, degrees: f64) -> bool {
        self.transform.set_rotation(degrees, &self.limits)
    }

    /// Select an aspect preset.
    ///
    /// Selecting the active preset again clears the lock and unsets both
    /// crops. Otherwise the lock changes and, with an image loaded, the crops
    /// are repositioned for it.
    pub fn select_aspect(&mut self, preset: AspectPreset) {
        if self.transform.aspect == Some(preset) {
            self.transform.aspect = None;
            self.crop = None;
            self.completed_crop = None;
            return;
        }

        self.transform.aspect = Some(preset);

        if let Some(image) = self.image.as_ref() {
            let (crop, completed) = adjust_for_aspect_change(
                self.crop.as_ref(),
                self.completed_crop.as_ref(),
                image.display_width(),
                image.display_height(),
                preset.ratio(),
            );
            self.crop = Some(crop);
            self.completed_crop = Some(completed);
        }
    }

    pub fn toggle_sepia(&mut self) -> FilterMode {
        self.filter = self.filter.toggle_sepia();
        self.filter
    }

    pub fn toggle_black_and_white(&mut self) -> FilterMode {
        self.filter = self.filter.toggle_black_and_white();
        self.filter
    }

    /// Snapshot of the render inputs.
    ///
    /// `None` until an image is loaded and a non-empty crop is committed.
    pub fn render_job(&self) -> Option<RenderJob> {
        let image = self.image.as_ref()?;
        let crop = self.completed_crop.filter(|c| !c.is_empty())?;
        Some(RenderJob {
            image: image.clone(),
            crop,
            scale: self.transform.scale,
            rotation: self.transform.rotation,
        })
    }
}
