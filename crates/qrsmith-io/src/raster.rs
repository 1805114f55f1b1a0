//! Blob and object-URL helpers.
//!
//! Object URLs keep their Blob alive until revoked, so every URL created
//! here must be passed to [`revoke_blob_url`] (or released through
//! [`ObjectUrlAllocator`]) once it is no longer displayed.

use qrsmith_core::{HandleAllocator, LogoFile, form};
use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Errors that can occur during Blob URL creation.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for RasterError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Wrap `bytes` in a `Blob` of the given MIME type.
///
/// # Errors
///
/// Returns the browser's exception if `Blob` construction fails.
pub fn bytes_to_blob(bytes: &[u8], mime_type: &str) -> Result<web_sys::Blob, JsValue> {
    let uint8_array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&uint8_array);

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
}

/// Create an object URL for `bytes`, e.g. for an `<img src>`.
///
/// The returned URL must be revoked via [`revoke_blob_url`] when no
/// longer needed to avoid memory leaks.
///
/// # Errors
///
/// Returns [`RasterError::JsError`] if Blob or URL creation fails.
pub fn bytes_to_blob_url(bytes: &[u8], mime_type: &str) -> Result<String, RasterError> {
    let blob = bytes_to_blob(bytes, mime_type)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    Ok(url)
}

/// Revoke a Blob URL previously created by [`bytes_to_blob_url`].
///
/// Best-effort: failures are silently ignored since the URL may have
/// already been revoked or garbage collected.
pub fn revoke_blob_url(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}

/// An object URL pointing at a logo's bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Display-handle allocator backed by object URLs.
///
/// Acquiring creates a URL for the logo bytes; releasing revokes it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectUrlAllocator;

impl HandleAllocator for ObjectUrlAllocator {
    type Handle = ObjectUrl;
    type Error = RasterError;

    fn acquire(&mut self, logo: &LogoFile) -> Result<ObjectUrl, RasterError> {
        let mime_type = if logo.mime_type().is_empty() {
            form::mime_type_for(logo.name()).unwrap_or_default()
        } else {
            logo.mime_type()
        };
        bytes_to_blob_url(logo.bytes(), mime_type).map(ObjectUrl)
    }

    fn release(&mut self, handle: ObjectUrl) {
        revoke_blob_url(&handle.0);
    }
}
