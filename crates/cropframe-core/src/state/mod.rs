//! Editing session data model.
//!
//! [`EditorState`] owns the loaded image, the live and completed crops, the
//! transform and the color filter. Hosts drive it from input events and hand
//! [`RenderJob`] snapshots to whatever schedules preview renders.

mod editor;
mod filter;
mod job;
mod transform;

pub use editor::EditorState;
pub use filter::FilterMode;
pub use job::RenderJob;
pub use transform::TransformState;
