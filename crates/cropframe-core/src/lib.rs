//! Cropframe Core - crop, transform and preview rendering
//!
//! This crate holds the synchronous half of Cropframe: decoding the source,
//! converting crop rectangles between display, natural and percentage
//! coordinates, placing aspect-locked crops, rendering the rotated and zoomed
//! crop preview, encoding it to PNG and handing the file to a delivery
//! target. It has no async runtime and compiles to wasm.

pub mod aspect;
pub mod config;
pub mod decode;
pub mod delivery;
pub mod encode;
pub mod export;
pub mod geometry;
pub mod handle;
pub mod luminance;
pub mod render;
pub mod state;
pub mod surface;

pub use aspect::{adjust_for_aspect_change, center_for_aspect, center_with_coverage, AspectPreset};
pub use config::CropLimits;
pub use decode::{decode_image, DecodeError};
pub use delivery::{Delivery, DeliveryError, DeliverySlot, ExportArtifact, DEFAULT_FILE_NAME};
pub use encode::{encode_png, encode_surface_png, EncodeError, PNG_CONTENT_TYPE};
pub use export::{finalize_png, FinalizeError, PreconditionError};
pub use geometry::{
    to_natural_rect, to_natural_scale, to_pixel_crop, to_relative_crop, CropRegion, CropUnit,
    GeometryError, NaturalRect,
};
pub use handle::ImageHandle;
pub use render::{apply_display_filter, render, stretch_blit, RenderError, ResampleFilter};
pub use state::{EditorState, FilterMode, RenderJob, TransformState};
pub use surface::Surface;
