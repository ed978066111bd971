//! Client side of the external filter service.
//!
//! The service receives a base64 PNG and answers with the filtered file.
//! [`HttpFilterService`] speaks its HTTP protocol:
//!
//! ```text
//! POST {base_url}/{operation}
//! Content-Type: application/json
//!
//! {"imageData": "<base64 PNG>"}
//! ```
//!
//! The response body is the filtered file, typed by its `Content-Type`.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::config::SessionConfig;

/// Content type assumed when the service does not send one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A filter to run on an encoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest {
    /// Operation name, e.g. `applySepia`.
    pub operation: String,
    /// Base64 encoded PNG.
    pub image_data: String,
}

/// The filtered file as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResponse {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Errors from a filter round-trip.
#[derive(Debug, Error)]
pub enum FilterServiceError {
    /// The HTTP client could not be built
    #[error("Failed to create filter service client: {0}")]
    Client(String),

    /// Connecting, sending or timing out
    #[error("Filter service request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("Filter service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be read
    #[error("Failed to read filter service response: {0}")]
    Body(String),
}

/// Something that can apply a named filter to an image.
pub trait FilterService {
    fn apply(
        &self,
        request: FilterRequest,
    ) -> impl Future<Output = Result<FilterResponse, FilterServiceError>> + Send;
}

/// JSON body for a filter request.
pub fn request_body(image_data: &str) -> serde_json::Value {
    serde_json::json!({ "imageData": image_data })
}

/// [`FilterService`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFilterService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFilterService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FilterServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FilterServiceError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &SessionConfig) -> Result<Self, FilterServiceError> {
        Self::new(config.filter_service_url.clone(), config.request_timeout())
    }

    /// URL for an operation.
    pub fn endpoint(&self, operation: &str) -> String {
        format!("{}/{}", self.base_url, operation)
    }
}

impl FilterService for HttpFilterService {
    fn apply(
        &self,
        request: FilterRequest,
    ) -> impl Future<Output = Result<FilterResponse, FilterServiceError>> + Send {
        let url = self.endpoint(&request.operation);
        let client = self.client.clone();

        async move {
            log::debug!(
                "POST {} ({} base64 bytes)",
                url,
                request.image_data.len()
            );

            let response = client
                .post(&url)
                .json(&request_body(&request.image_data))
                .send()
                .await
                .map_err(|e| FilterServiceError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                log::error!("filter service returned {}: {}", status, body);
                return Err(FilterServiceError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .unwrap_or(DEFAULT_CONTENT_TYPE)
                .to_string();

            let bytes = response
                .bytes()
                .await
                .map_err(|e| FilterServiceError::Body(e.to_string()))?;

            Ok(FilterResponse {
                bytes: bytes.to_vec(),
                content_type,
            })
        }
    }
}
