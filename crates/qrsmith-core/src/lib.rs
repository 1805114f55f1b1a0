//! qrsmith-core: QR code settings model and preview synchronization (sans-IO).
//!
//! Holds the single session [`QrSettings`] record behind a
//! [`SettingsStore`], translates form interactions into partial updates,
//! and derives everything the preview needs: render inputs, the logo
//! display-handle lifecycle, the export state machine, and the summary
//! panel text.
//!
//! This crate has **no I/O dependencies**. Rendering, file saving, and
//! clipboard access are abstract capabilities ([`Renderer`],
//! [`FileSaver`], [`ClipboardWriter`]) implemented by `qrsmith-render`
//! and `qrsmith-io`.

pub mod defaults;
pub mod export;
pub mod form;
pub mod preview;
pub mod store;
pub mod summary;
pub mod types;

pub use export::{
    ClipboardWriter, CopyOutcome, EncodeSurface, ExportGate, FileSaver, PendingExport,
    SaveOutcome,
};
pub use form::{DroppedFile, FormEvent};
pub use preview::{HandleAllocator, HandleSlot, Overlay, PreviewAdapter, RenderRequest, Renderer};
pub use store::{SettingsStore, SubscriptionId};
pub use summary::Summary;
pub use types::{Level, LogoFile, ParseLevelError, QrSettings, SettingsPatch};
