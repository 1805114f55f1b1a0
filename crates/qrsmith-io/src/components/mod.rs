//! Dioxus UI components for qrsmith.
//!
//! Provides the settings form (with color fields and the logo drop
//! zone), the live preview with export buttons, and the summary panel.

mod form;
mod logo;
mod preview;
mod summary;

pub use form::{ColorField, SettingsForm};
pub use logo::LogoField;
pub use preview::QrPreview;
pub use summary::SummaryPanel;
