//! Handing finished files to the host.
//!
//! A [`Delivery`] turns an [`ExportArtifact`] into something the user can
//! save (a file on disk, a browser object URL). [`DeliverySlot`] keeps at
//! most one delivered handle alive and releases it before the next delivery.

use std::path::PathBuf;
use thiserror::Error;

use crate::encode::PNG_CONTENT_TYPE;

/// File name used when the caller does not supply one.
pub const DEFAULT_FILE_NAME: &str = "cropped.png";

/// Encoded bytes ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    /// Suggested file name for the download.
    pub file_name: String,
    pub content_type: String,
}

impl ExportArtifact {
    /// A PNG artifact.
    pub fn png(bytes: Vec<u8>, file_name: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            content_type: PNG_CONTENT_TYPE.to_string(),
        }
    }
}

/// Errors that can occur while delivering an artifact.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Writing the file failed
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File name is empty or would escape the target location
    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    /// The host environment refused the download
    #[error("Host delivery failed: {0}")]
    Host(String),
}

/// Destination for exported files.
pub trait Delivery {
    /// Whatever keeps a delivered file reachable (a path, an object URL).
    type Handle;

    fn deliver(&mut self, artifact: ExportArtifact) -> Result<Self::Handle, DeliveryError>;

    /// Free the resources behind a handle returned by [`Delivery::deliver`].
    fn release(&mut self, handle: Self::Handle);
}

/// A [`Delivery`] plus the single handle it currently has alive.
#[derive(Debug)]
pub struct DeliverySlot<D: Delivery> {
    delivery: D,
    current: Option<D::Handle>,
}

impl<D: Delivery> DeliverySlot<D> {
    pub fn new(delivery: D) -> Self {
        Self {
            delivery,
            current: None,
        }
    }

    /// Release the live handle, if any, then deliver `artifact`.
    ///
    /// On failure no handle is live.
    pub fn deliver(&mut self, artifact: ExportArtifact) -> Result<&D::Handle, DeliveryError> {
        self.release_current();
        log::debug!(
            "delivering {} ({} bytes, {})",
            artifact.file_name,
            artifact.bytes.len(),
            artifact.content_type
        );
        let handle = self.delivery.deliver(artifact)?;
        Ok(self.current.insert(handle))
    }

    /// Release the live handle without delivering anything new.
    pub fn release_current(&mut self) {
        if let Some(previous) = self.current.take() {
            log::debug!("releasing previous delivery handle");
            self.delivery.release(previous);
        }
    }

    pub fn current(&self) -> Option<&D::Handle> {
        self.current.as_ref()
    }

    pub fn delivery(&self) -> &D {
        &self.delivery
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        next: u32,
        events: Vec<String>,
        fail: bool,
    }

    impl Delivery for Recorder {
        type Handle = u32;

        fn deliver(&mut self, artifact: ExportArtifact) -> Result<u32, DeliveryError> {
            if self.fail {
                return Err(DeliveryError::Host("refused".to_string()));
            }
            self.next += 1;
            self.events.push(format!("deliver {} {}", self.next, artifact.file_name));
            Ok(self.next)
        }

        fn release(&mut self, handle: u32) {
            self.events.push(format!("release {handle}"));
        }
    }

    #[test]
    fn test_png_artifact() {
        let artifact = ExportArtifact::png(vec![1, 2, 3], DEFAULT_FILE_NAME);
        assert_eq!(artifact.content_type, "image/png");
        assert_eq!(artifact.file_name, "cropped.png");
    }

    #[test]
    fn test_release_before_next_delivery() {
        let mut slot = DeliverySlot::new(Recorder::default());

        assert_eq!(*slot.deliver(ExportArtifact::png(vec![], "a.png")).unwrap(), 1);
        assert_eq!(*slot.deliver(ExportArtifact::png(vec![], "b.png")).unwrap(), 2);

        assert_eq!(
            slot.delivery().events,
            vec!["deliver 1 a.png", "release 1", "deliver 2 b.png"]
        );
        assert_eq!(slot.current(), Some(&2));
    }

    #[test]
    fn test_failed_delivery_leaves_no_handle() {
        let mut slot = DeliverySlot::new(Recorder::default());
        slot.deliver(ExportArtifact::png(vec![], "a.png")).unwrap();

        slot.delivery.fail = true;
        assert!(slot.deliver(ExportArtifact::png(vec![], "b.png")).is_err());

        assert_eq!(slot.current(), None);
        assert_eq!(slot.delivery().events, vec!["deliver 1 a.png", "release 1"]);
    }
}
