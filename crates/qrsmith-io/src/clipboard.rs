//! Image writes via the browser Clipboard API.
//!
//! All functions require a browser environment (`wasm32-unknown-unknown`
//! target) and a user-gesture context (i.e., called from a click
//! handler).

use js_sys::{Array, Function, Object, Reflect};
use qrsmith_core::ClipboardWriter;
use qrsmith_core::export::PNG_MIME_TYPE;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::raster;

/// Errors that can occur when accessing the clipboard.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// A browser API call returned an error or a required object was missing.
    #[error("clipboard API error: {0}")]
    JsError(String),
}

impl From<JsValue> for ClipboardError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Whether the browser can write images to the clipboard.
///
/// Requires `navigator.clipboard`, its `write` method, and a global
/// `ClipboardItem` constructor.
#[must_use]
pub fn supports_image_write() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let navigator = window.navigator();
    let navigator: &JsValue = navigator.as_ref();
    let Ok(clipboard) = Reflect::get(navigator, &JsValue::from_str("clipboard")) else {
        return false;
    };
    if clipboard.is_undefined() || clipboard.is_null() {
        return false;
    }
    let has_write = Reflect::get(&clipboard, &JsValue::from_str("write"))
        .is_ok_and(|write| write.is_function());
    let has_item = Reflect::has(&js_sys::global(), &JsValue::from_str("ClipboardItem"))
        .unwrap_or(false);
    has_write && has_item
}

/// Write PNG bytes to the clipboard as an `image/png` item.
///
/// Wraps [`navigator.clipboard.write()`][mdn].
///
/// # Errors
///
/// Returns [`ClipboardError::JsError`] if the browser window, navigator,
/// clipboard, or `ClipboardItem` is unavailable, or if the write is
/// rejected (e.g., the page does not have clipboard-write permission).
///
/// [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/Clipboard/write
#[allow(clippy::future_not_send)] // WASM is single-threaded; Clipboard is !Send
pub async fn write_png(png: &[u8]) -> Result<(), ClipboardError> {
    let clipboard = get_clipboard()?;
    let blob = raster::bytes_to_blob(png, PNG_MIME_TYPE)?;

    // new ClipboardItem({ "image/png": blob })
    let record = Object::new();
    Reflect::set(&record, &JsValue::from_str(PNG_MIME_TYPE), &blob)?;
    let constructor: Function =
        Reflect::get(&js_sys::global(), &JsValue::from_str("ClipboardItem"))?.dyn_into()?;
    let item = Reflect::construct(&constructor, &Array::of1(&record))?;

    let promise = clipboard.write(&Array::of1(&item));
    JsFuture::from(promise).await?;
    Ok(())
}

/// Obtain the `Clipboard` object from `window.navigator.clipboard`.
fn get_clipboard() -> Result<web_sys::Clipboard, ClipboardError> {
    let window =
        web_sys::window().ok_or_else(|| ClipboardError::JsError("no global window".into()))?;
    let navigator = window.navigator();
    let clipboard = navigator.clipboard();
    Ok(clipboard)
}

/// The system clipboard as a [`ClipboardWriter`].
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserClipboard;

impl ClipboardWriter for BrowserClipboard {
    type Error = ClipboardError;

    fn supports_image_write(&self) -> bool {
        supports_image_write()
    }

    #[allow(clippy::future_not_send)] // WASM is single-threaded
    async fn write_png(&self, png: Vec<u8>) -> Result<(), ClipboardError> {
        write_png(&png).await
    }
}
