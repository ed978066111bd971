//! Preview rendering.
//!
//! - [`render`] composites the crop with rotation and zoom at natural
//!   resolution. Its output is the preview surface that export reads from.
//! - [`apply_display_filter`] is the cheap on-screen color filter. It is kept
//!   apart from [`render`] so the preview surface stays unfiltered.
//! - [`stretch_blit`] resamples a surface to a new size.

mod compose;
mod display_filter;
mod resample;

pub use compose::{
    check_surface_size, output_size, render, RenderError, MAX_SURFACE_AREA, MAX_SURFACE_EDGE,
};
pub use display_filter::{apply_display_filter, apply_display_filter_in_place};
pub use resample::{stretch_blit, ResampleFilter};
