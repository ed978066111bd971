//! A crop editing session.
//!
//! [`CropSession`] owns the [`EditorState`] and its render scheduler. Input
//! handlers call its methods; each one mutates the state and, when a render
//! input changed, schedules a debounced preview render.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cropframe_core::{
    apply_display_filter, decode_image, AspectPreset, CropRegion, DecodeError, Delivery,
    EditorState, FilterMode, ImageHandle, Surface,
};

use crate::config::SessionConfig;
use crate::export::{ExportPipeline, ExportSnapshot};
use crate::filter_service::FilterService;
use crate::scheduler::{Preview, RecomputeScheduler, RenderFn};

/// Editor state plus debounced preview rendering.
///
/// Must be created and used from within a Tokio runtime.
#[derive(Debug)]
pub struct CropSession {
    config: SessionConfig,
    state: EditorState,
    scheduler: RecomputeScheduler,
    generation: Arc<AtomicU64>,
}

impl CropSession {
    pub fn new(config: SessionConfig) -> Self {
        let generation = Arc::new(AtomicU64::new(0));
        let scheduler = RecomputeScheduler::new(config.debounce(), Arc::clone(&generation));
        Self::from_parts(config, scheduler, generation)
    }

    /// Create a session whose previews are produced by `render_fn`.
    pub fn with_renderer(config: SessionConfig, render_fn: RenderFn) -> Self {
        let generation = Arc::new(AtomicU64::new(0));
        let scheduler =
            RecomputeScheduler::with_renderer(config.debounce(), Arc::clone(&generation), render_fn);
        Self::from_parts(config, scheduler, generation)
    }

    fn from_parts(
        config: SessionConfig,
        scheduler: RecomputeScheduler,
        generation: Arc<AtomicU64>,
    ) -> Self {
        Self {
            state: EditorState::new(config.limits.clone()),
            config,
            scheduler,
            generation,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn scheduler(&self) -> &RecomputeScheduler {
        &self.scheduler
    }

    /// Current image generation. Bumped on every image load.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Build an export pipeline tied to this session's image generation.
    pub fn export_pipeline<S: FilterService, D: Delivery>(
        &self,
        service: S,
        delivery: D,
    ) -> ExportPipeline<S, D> {
        ExportPipeline::new(service, delivery, Arc::clone(&self.generation))
            .with_resample_filter(self.config.export_resample)
    }

    /// Replace the source image. Pending renders are cancelled and in-flight
    /// filter results for the old image will be discarded.
    pub fn load_image(
        &mut self,
        source: Arc<Surface>,
        display_width: f64,
        display_height: f64,
    ) -> &ImageHandle {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.scheduler.reset();
        self.state.load_image(source, display_width, display_height)
    }

    /// Decode `bytes` and load the result.
    pub fn load_image_bytes(
        &mut self,
        bytes: &[u8],
        display_width: f64,
        display_height: f64,
    ) -> Result<&ImageHandle, DecodeError> {
        let source = decode_image(bytes)?;
        Ok(self.load_image(Arc::new(source), display_width, display_height))
    }

    /// The image was laid out at a new size.
    pub fn set_display_size(&mut self, display_width: f64, display_height: f64) {
        if self.state.set_display_size(display_width, display_height) {
            self.reschedule();
        }
    }

    pub fn set_live_crop(&mut self, region: CropRegion) {
        self.state.set_live_crop(region);
    }

    pub fn complete_crop(&mut self, region: CropRegion) {
        if self.state.complete_crop(region).is_some() {
            self.reschedule();
        }
    }

    pub fn set_scale(&mut self, scale: f64) {
        if self.state.set_scale(scale) {
            self.reschedule();
        }
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        if self.state.set_rotation(degrees) {
            self.reschedule();
        }
    }

    pub fn select_aspect(&mut self, preset: AspectPreset) {
        self.state.select_aspect(preset);
        self.reschedule();
    }

    pub fn toggle_sepia(&mut self) -> FilterMode {
        self.state.toggle_sepia()
    }

    pub fn toggle_black_and_white(&mut self) -> FilterMode {
        self.state.toggle_black_and_white()
    }

    /// The latest preview rendered for the current image.
    pub fn preview(&self) -> Option<Preview> {
        let generation = self.generation();
        self.scheduler
            .preview()
            .filter(|p| p.generation == generation)
    }

    /// The latest preview with the display filter applied.
    pub fn display_preview(&self) -> Option<Surface> {
        self.preview()
            .map(|p| apply_display_filter(&p.surface, self.state.filter()))
    }

    /// Capture what an export needs. `file_name` defaults to the configured
    /// name.
    pub fn export_snapshot(&self, file_name: Option<&str>) -> ExportSnapshot {
        ExportSnapshot {
            image: self.state.image().cloned(),
            preview: self.preview().map(|p| p.surface),
            completed_crop: self.state.completed_crop().copied(),
            filter: self.state.filter(),
            file_name: file_name
                .unwrap_or(&self.config.default_file_name)
                .to_string(),
            generation: self.generation(),
        }
    }

    /// Stop any pending render.
    pub fn cancel_pending(&mut self) {
        self.scheduler.cancel();
    }

    fn reschedule(&mut self) {
        match self.state.render_job() {
            Some(job) => self.scheduler.schedule(job),
            None => self.scheduler.cancel(),
        }
    }
}
