//! Export actions: save as PNG file and copy to clipboard.
//!
//! Both actions read the rendered surface and never mutate it. Saving is
//! guarded by an [`ExportGate`] so a second click while a save is in
//! flight is a no-op:
//!
//! ```text
//! idle --try_begin--> pending --(PendingExport dropped)--> idle
//! ```
//!
//! Copying has no such guard; concurrent copies run independently.
//! Neither action has cancellation or timeouts.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Filename suggested to the platform save capability.
pub const EXPORT_FILENAME: &str = "qrcode.png";

/// MIME type of exported images.
pub const PNG_MIME_TYPE: &str = "image/png";

/// Message shown after a successful clipboard copy.
pub const COPY_SUCCESS_MESSAGE: &str = "QR Code copied to clipboard!";

/// Message shown when copying is unsupported or fails.
pub const COPY_FAILURE_MESSAGE: &str = "Failed to copy QR Code. Please download instead.";

/// A rendered surface that can produce its PNG encoding.
pub trait EncodeSurface {
    /// Encoding failure.
    type Error: fmt::Display;

    /// Encode the surface as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    fn encode_png(&self) -> Result<Vec<u8>, Self::Error>;
}

/// Platform capability that saves bytes as a user-visible file.
// Single-threaded WASM: the returned futures need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait FileSaver {
    /// Save failure.
    type Error: fmt::Display;

    /// Trigger a save of `bytes` under `filename`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform refuses the save.
    async fn save(&self, bytes: Vec<u8>, filename: &str) -> Result<(), Self::Error>;
}

/// Platform capability that writes images to the clipboard.
#[allow(async_fn_in_trait)]
pub trait ClipboardWriter {
    /// Write failure.
    type Error: fmt::Display;

    /// Whether image writes are available. Checked before every write.
    fn supports_image_write(&self) -> bool;

    /// Write `png` to the clipboard as an image payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected (e.g. permissions).
    async fn write_png(&self, png: Vec<u8>) -> Result<(), Self::Error>;
}

/// Tracks whether a save is pending.
///
/// Cloning shares the same flag.
#[derive(Debug, Clone, Default)]
pub struct ExportGate {
    pending: Rc<Cell<bool>>,
}

impl ExportGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a save is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Enter the pending state.
    ///
    /// Returns `None` if already pending. The gate returns to idle when
    /// the returned [`PendingExport`] is dropped, whatever the outcome.
    #[must_use]
    pub fn try_begin(&self) -> Option<PendingExport> {
        if self.pending.replace(true) {
            return None;
        }
        Some(PendingExport {
            pending: Rc::clone(&self.pending),
        })
    }
}

/// Proof that a save is pending. Dropping it ends the pending state.
#[derive(Debug)]
#[must_use = "dropping the guard immediately ends the pending state"]
pub struct PendingExport {
    pending: Rc<Cell<bool>>,
}

impl Drop for PendingExport {
    fn drop(&mut self) {
        self.pending.set(false);
    }
}

/// Result of a save-as-file action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The save was handed to the platform.
    Saved,
    /// Another save was pending; nothing was done.
    Busy,
    /// Nothing has been rendered yet; aborted silently.
    NoSurface,
    /// Encoding or saving failed.
    Failed(String),
}

/// Result of a copy-to-clipboard action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The image is on the clipboard.
    Copied,
    /// Nothing has been rendered yet; aborted silently.
    NoSurface,
    /// The platform has no image clipboard; nothing was written.
    Unsupported,
    /// Encoding or writing failed.
    Failed(String),
}

impl CopyOutcome {
    /// Message to show the user, if any.
    #[must_use]
    pub const fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::Copied => Some(COPY_SUCCESS_MESSAGE),
            Self::Unsupported | Self::Failed(_) => Some(COPY_FAILURE_MESSAGE),
            Self::NoSurface => None,
        }
    }
}

/// Save the surface as [`EXPORT_FILENAME`], unless a save is pending.
#[allow(clippy::future_not_send)] // WASM is single-threaded
pub async fn save_as_file<S, F>(gate: &ExportGate, surface: Option<&S>, saver: &F) -> SaveOutcome
where
    S: EncodeSurface,
    F: FileSaver,
{
    let Some(pending) = gate.try_begin() else {
        tracing::debug!("save already pending, ignoring");
        return SaveOutcome::Busy;
    };
    save_pending(pending, surface, saver).await
}

/// Save the surface while holding an already-acquired pending guard.
///
/// The gate returns to idle when this future completes, on every path.
#[allow(clippy::future_not_send)] // WASM is single-threaded
pub async fn save_pending<S, F>(
    pending: PendingExport,
    surface: Option<&S>,
    saver: &F,
) -> SaveOutcome
where
    S: EncodeSurface,
    F: FileSaver,
{
    let _pending = pending;

    let Some(surface) = surface else {
        tracing::debug!("no rendered surface to save");
        return SaveOutcome::NoSurface;
    };

    let png = match surface.encode_png() {
        Ok(png) => png,
        Err(e) => {
            tracing::error!("PNG encoding failed: {e}");
            return SaveOutcome::Failed(format!("PNG encoding failed: {e}"));
        }
    };

    match saver.save(png, EXPORT_FILENAME).await {
        Ok(()) => SaveOutcome::Saved,
        Err(e) => {
            tracing::error!("save failed: {e}");
            SaveOutcome::Failed(format!("Download failed: {e}"))
        }
    }
}

/// Copy the surface to the clipboard as a PNG image.
///
/// No guard: overlapping calls each run to completion. Never falls back
/// to saving a file.
#[allow(clippy::future_not_send)] // WASM is single-threaded
pub async fn copy_to_clipboard<S, C>(surface: Option<&S>, clipboard: &C) -> CopyOutcome
where
    S: EncodeSurface,
    C: ClipboardWriter,
{
    let Some(surface) = surface else {
        tracing::debug!("no rendered surface to copy");
        return CopyOutcome::NoSurface;
    };

    if !clipboard.supports_image_write() {
        tracing::warn!("clipboard image write is not supported");
        return CopyOutcome::Unsupported;
    }

    let png = match surface.encode_png() {
        Ok(png) => png,
        Err(e) => {
            tracing::error!("PNG encoding failed: {e}");
            return CopyOutcome::Failed(e.to_string());
        }
    };

    match clipboard.write_png(png).await {
        Ok(()) => CopyOutcome::Copied,
        Err(e) => {
            tracing::error!("clipboard write failed: {e}");
            CopyOutcome::Failed(e.to_string())
        }
    }
}
