//! Delivery into a directory on disk.

use std::path::{Path, PathBuf};

use cropframe_core::{Delivery, DeliveryError, ExportArtifact};

/// Writes each artifact into `dir` under its suggested file name.
///
/// Released handles are forgotten, not deleted: the written file belongs to
/// the user once delivered.
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    dir: PathBuf,
}

impl DirectoryDelivery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Delivery for DirectoryDelivery {
    type Handle = PathBuf;

    fn deliver(&mut self, artifact: ExportArtifact) -> Result<PathBuf, DeliveryError> {
        let name = Path::new(&artifact.file_name)
            .file_name()
            .filter(|n| n.len() == artifact.file_name.len())
            .ok_or_else(|| DeliveryError::InvalidFileName(artifact.file_name.clone()))?;

        std::fs::create_dir_all(&self.dir).map_err(|source| DeliveryError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(name);
        std::fs::write(&path, &artifact.bytes).map_err(|source| DeliveryError::Io {
            path: path.clone(),
            source,
        })?;

        log::info!("wrote {} ({} bytes)", path.display(), artifact.bytes.len());
        Ok(path)
    }

    fn release(&mut self, handle: PathBuf) {
        log::debug!("released delivery handle {}", handle.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut delivery = DirectoryDelivery::new(dir.path());

        let path = delivery
            .deliver(ExportArtifact::png(vec![1, 2, 3], "out.png"))
            .unwrap();

        assert_eq!(path, dir.path().join("out.png"));
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut delivery = DirectoryDelivery::new(dir.path().join("exports"));

        let path = delivery.deliver(ExportArtifact::png(vec![0], "a.png")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_rejects_path_components() {
        let dir = tempfile::tempdir().unwrap();
        let mut delivery = DirectoryDelivery::new(dir.path());

        for name in ["../escape.png", "nested/a.png", "", ".."] {
            let result = delivery.deliver(ExportArtifact::png(vec![0], name));
            assert!(
                matches!(result, Err(DeliveryError::InvalidFileName(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_release_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut delivery = DirectoryDelivery::new(dir.path());

        let path = delivery.deliver(ExportArtifact::png(vec![0], "keep.png")).unwrap();
        delivery.release(path.clone());
        assert!(path.exists());
    }
}
