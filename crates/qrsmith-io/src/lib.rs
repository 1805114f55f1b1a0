//! qrsmith-io: Browser I/O and Dioxus component library.
//!
//! Implements the platform capabilities declared in `qrsmith-core`
//! (file saving via Blob downloads, clipboard image writes, object-URL
//! display handles) and provides the UI components of the qrsmith web
//! application: settings form, logo drop zone, preview with export
//! buttons, and summary panel.

pub mod clipboard;
pub mod components;
pub mod download;
pub mod raster;

pub use clipboard::BrowserClipboard;
pub use components::{QrPreview, SettingsForm, SummaryPanel};
pub use download::BrowserSaver;
pub use raster::{ObjectUrl, ObjectUrlAllocator};
