//! Browser downloads through Blob object URLs.
//!
//! ```typescript
//! const links = new DownloadLinks();
//! const url = links.deliver(pngBytes, "cropped.png", "image/png");
//! anchor.href = url;
//! anchor.download = "cropped.png";
//! anchor.click();
//! ```
//!
//! Each delivery revokes the previous object URL first, so at most one is
//! alive per `DownloadLinks`.

use cropframe_core::{Delivery, DeliveryError, DeliverySlot, ExportArtifact};
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, Url};

use crate::types::to_js_error;

/// [`Delivery`] that wraps bytes in a `Blob` and hands out its object URL.
#[derive(Debug, Default)]
pub struct JsDownloadLink;

impl Delivery for JsDownloadLink {
    type Handle = String;

    fn deliver(&mut self, artifact: ExportArtifact) -> Result<String, DeliveryError> {
        let bytes = js_sys::Uint8Array::from(artifact.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);

        let options = BlobPropertyBag::new();
        options.set_type(&artifact.content_type);

        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| DeliveryError::Host(format!("{e:?}")))?;
        Url::create_object_url_with_blob(&blob).map_err(|e| DeliveryError::Host(format!("{e:?}")))
    }

    fn release(&mut self, handle: String) {
        if let Err(e) = Url::revoke_object_url(&handle) {
            web_sys::console::warn_2(&JsValue::from_str("failed to revoke object URL"), &e);
        }
    }
}

/// Object URLs for exported files, one alive at a time.
#[wasm_bindgen]
pub struct DownloadLinks {
    slot: DeliverySlot<JsDownloadLink>,
}

#[wasm_bindgen]
impl DownloadLinks {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            slot: DeliverySlot::new(JsDownloadLink),
        }
    }

    /// Revoke the previous URL and return a URL for `bytes`.
    pub fn deliver(
        &mut self,
        bytes: Vec<u8>,
        file_name: String,
        content_type: String,
    ) -> Result<String, JsValue> {
        let artifact = ExportArtifact {
            bytes,
            file_name,
            content_type,
        };
        self.slot.deliver(artifact).cloned().map_err(to_js_error)
    }

    /// The live object URL, if any.
    #[wasm_bindgen(getter)]
    pub fn current(&self) -> Option<String> {
        self.slot.current().cloned()
    }

    /// Revoke the live object URL.
    pub fn revoke(&mut self) {
        self.slot.release_current();
    }
}

impl Default for DownloadLinks {
    fn default() -> Self {
        Self::new()
    }
}
