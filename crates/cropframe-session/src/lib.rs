//! Cropframe Session - the async half of Cropframe
//!
//! Wraps [`cropframe_core::EditorState`] in a [`CropSession`] that debounces
//! preview renders on a Tokio runtime, and provides the export pipeline with
//! its filter-service client and delivery targets.
//!
//! # Example
//!
//! ```ignore
//! use cropframe_session::{CropSession, DirectoryDelivery, HttpFilterService, SessionConfig};
//!
//! let config = SessionConfig::from_file("cropframe.toml")?;
//! let service = HttpFilterService::from_config(&config)?;
//! let mut session = CropSession::new(config);
//! let mut pipeline = session.export_pipeline(service, DirectoryDelivery::new("exports"));
//!
//! session.load_image_bytes(&bytes, 800.0, 600.0)?;
//! session.complete_crop(CropRegion::relative(10.0, 10.0, 50.0, 50.0));
//! // ... after the preview has rendered
//! let path = pipeline.export_crop(session.export_snapshot(None)).await?;
//! ```

pub mod config;
pub mod delivery;
pub mod export;
pub mod filter_service;
pub mod scheduler;
pub mod session;

pub use config::{ConfigError, SessionConfig};
pub use delivery::DirectoryDelivery;
pub use export::{ExportError, ExportPipeline, ExportSnapshot};
pub use filter_service::{
    FilterRequest, FilterResponse, FilterService, FilterServiceError, HttpFilterService,
    DEFAULT_CONTENT_TYPE,
};
pub use scheduler::{Preview, RecomputeScheduler, RenderFn};
pub use session::CropSession;
