//! Export of the completed crop.
//!
//! [`ExportPipeline::export_crop`] stretches the last preview to natural
//! size, encodes PNG and either delivers it directly or sends it through the
//! filter service first. The filter round-trip only holds an
//! [`ExportSnapshot`], so the session keeps handling input while it runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use cropframe_core::{
    finalize_png, CropRegion, Delivery, DeliveryError, DeliverySlot, EncodeError, ExportArtifact,
    FilterMode, FinalizeError, ImageHandle, PreconditionError, RenderError, ResampleFilter,
    Surface,
};
use thiserror::Error;

use crate::filter_service::{FilterRequest, FilterService, FilterServiceError};

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A required input was missing; nothing was allocated
    #[error("Export refused: {0}")]
    Precondition(#[from] PreconditionError),

    #[error("Export render failed: {0}")]
    Render(#[from] RenderError),

    #[error("Export encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    FilterService(#[from] FilterServiceError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// A new image was loaded while the filter request was in flight
    #[error("Export superseded by a newer image")]
    Superseded,
}

impl From<FinalizeError> for ExportError {
    fn from(e: FinalizeError) -> Self {
        match e {
            FinalizeError::Precondition(e) => ExportError::Precondition(e),
            FinalizeError::Render(e) => ExportError::Render(e),
            FinalizeError::Encode(e) => ExportError::Encode(e),
        }
    }
}

/// Everything an export reads from the session, captured at click time.
#[derive(Debug, Clone)]
pub struct ExportSnapshot {
    pub image: Option<ImageHandle>,
    pub preview: Option<Arc<Surface>>,
    pub completed_crop: Option<CropRegion>,
    pub filter: FilterMode,
    pub file_name: String,
    /// Image generation the snapshot belongs to.
    pub generation: u64,
}

/// Turns snapshots into delivered files.
///
/// Holds the filter service, the delivery target with its single live handle,
/// and the session's image generation counter.
pub struct ExportPipeline<S, D: Delivery> {
    service: S,
    delivery: DeliverySlot<D>,
    generation: Arc<AtomicU64>,
    resample: ResampleFilter,
}

impl<S: FilterService, D: Delivery> ExportPipeline<S, D> {
    pub fn new(service: S, delivery: D, generation: Arc<AtomicU64>) -> Self {
        Self {
            service,
            delivery: DeliverySlot::new(delivery),
            generation,
            resample: ResampleFilter::default(),
        }
    }

    /// Use a different filter for the final stretch.
    pub fn with_resample_filter(mut self, resample: ResampleFilter) -> Self {
        self.resample = resample;
        self
    }

    /// Export the snapshot and deliver the result.
    ///
    /// Returns the handle of the delivered file. The previous handle is
    /// released first. On any error nothing new is delivered.
    pub async fn export_crop(&mut self, snapshot: ExportSnapshot) -> Result<&D::Handle, ExportError> {
        let png = finalize_png(
            snapshot.image.as_ref(),
            snapshot.preview.as_deref(),
            snapshot.completed_crop.as_ref(),
            self.resample,
        )?;

        let artifact = match snapshot.filter.operation() {
            None => ExportArtifact::png(png, snapshot.file_name),
            Some(operation) => {
                let request = FilterRequest {
                    operation: operation.to_string(),
                    image_data: STANDARD.encode(&png),
                };
                let response = self.service.apply(request).await.inspect_err(|e| {
                    log::error!("{operation} failed: {e}");
                })?;

                if self.generation.load(Ordering::SeqCst) != snapshot.generation {
                    log::info!("discarding {operation} result for a replaced image");
                    return Err(ExportError::Superseded);
                }

                ExportArtifact {
                    bytes: response.bytes,
                    file_name: snapshot.file_name,
                    content_type: response.content_type,
                }
            }
        };

        Ok(self.delivery.deliver(artifact)?)
    }

    /// Handle of the most recent delivery.
    pub fn current_handle(&self) -> Option<&D::Handle> {
        self.delivery.current()
    }

    pub fn resample_filter(&self) -> ResampleFilter {
        self.resample
    }

    pub fn delivery(&self) -> &D {
        self.delivery.delivery()
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}
