//! Session configuration, loadable from TOML.
//!
//! ```toml
//! debounce_ms = 100
//! filter_service_url = "http://localhost:8000"
//! request_timeout_secs = 30
//! default_file_name = "cropped.png"
//! export_resample = "bilinear"
//!
//! [limits]
//! min_scale = 1.0
//! max_rotation = 180.0
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use cropframe_core::{CropLimits, ResampleFilter, DEFAULT_FILE_NAME};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Runtime settings for a [`crate::CropSession`] and its export pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Quiet period before a preview render, in milliseconds.
    pub debounce_ms: u64,
    /// Base URL of the filter service; operations are appended as a path.
    pub filter_service_url: String,
    pub request_timeout_secs: u64,
    /// File name used when an export does not name one.
    pub default_file_name: String,
    /// Filter used to stretch the preview to natural size on export.
    pub export_resample: ResampleFilter,
    pub limits: CropLimits,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 100,
            filter_service_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 30,
            default_file_name: DEFAULT_FILE_NAME.to_string(),
            export_resample: ResampleFilter::default(),
            limits: CropLimits::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropframe_core::AspectPreset;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.debounce(), Duration::from_millis(100));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.filter_service_url, "http://localhost:8000");
        assert_eq!(config.default_file_name, "cropped.png");
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(SessionConfig::from_toml_str("").unwrap(), SessionConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = SessionConfig::from_toml_str(
            r#"
            debounce_ms = 250

            [limits]
            max_rotation = 90.0
            aspect_presets = ["free", "square", { custom = 1.5 }]
            "#,
        )
        .unwrap();

        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.limits.max_rotation, 90.0);
        assert_eq!(config.limits.min_scale, 1.0);
        assert_eq!(
            config.limits.aspect_presets,
            vec![AspectPreset::Free, AspectPreset::Square, AspectPreset::Custom(1.5)]
        );
    }

    #[test]
    fn test_export_resample_from_toml() {
        let config = SessionConfig::from_toml_str("export_resample = \"lanczos3\"").unwrap();
        assert_eq!(config.export_resample, ResampleFilter::Lanczos3);
    }

    #[test]
    fn test_invalid_toml() {
        let result = SessionConfig::from_toml_str("debounce_ms = \"soon\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cropframe.toml");
        std::fs::write(&path, "default_file_name = \"out.png\"\n").unwrap();

        let config = SessionConfig::from_file(&path).unwrap();
        assert_eq!(config.default_file_name, "out.png");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SessionConfig::from_file(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
