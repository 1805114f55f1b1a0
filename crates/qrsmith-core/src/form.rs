//! Form adapter: maps UI interactions to settings patches.
//!
//! Each [`FormEvent`] corresponds to one widget interaction and yields at
//! most one [`SettingsPatch`] naming exactly one field. Raw widget values
//! arrive as strings, the way HTML inputs report them.

use crate::types::{Level, LogoFile, SettingsPatch};

/// File extensions accepted by the logo drop zone.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "svg"];

/// Value for the file input's `accept` attribute.
pub const ACCEPT_ATTRIBUTE: &str = "image/*,.png,.jpg,.jpeg,.svg";

/// Options of the error-correction select, as `(level, label)`.
pub const LEVEL_OPTIONS: [(Level, &str); 4] = [
    (Level::L, "Low (7%)"),
    (Level::M, "Medium (15%)"),
    (Level::Q, "Quartile (25%)"),
    (Level::H, "High (30% - Recommended)"),
];

/// A file offered by the drop zone or the file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedFile {
    /// Filename including extension.
    pub name: String,
    /// MIME type reported by the browser; empty when unknown.
    pub mime_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// One interaction with the settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The text area changed.
    TextEdited(String),
    /// The size slider moved (raw input value).
    SizeSlid(String),
    /// An error-correction option was selected (raw option value).
    LevelSelected(String),
    /// The margin checkbox was toggled.
    MarginToggled(bool),
    /// The foreground hex text field changed.
    ForegroundEdited(String),
    /// A foreground color was chosen in the picker.
    ForegroundPicked(String),
    /// The background hex text field changed.
    BackgroundEdited(String),
    /// A background color was chosen in the picker.
    BackgroundPicked(String),
    /// Files were dropped on (or picked through) the logo zone.
    LogoDropped(Vec<DroppedFile>),
    /// The logo's remove button was pressed.
    LogoRemoved,
    /// The logo size slider moved (raw input value).
    LogoSizeSlid(String),
}

impl FormEvent {
    /// The partial update this interaction produces.
    ///
    /// Returns `None` when a raw value cannot be interpreted (which a
    /// well-formed widget never sends) or when a drop contains no
    /// acceptable image.
    pub fn into_patch(self) -> Option<SettingsPatch> {
        let patch = SettingsPatch::new();
        match self {
            Self::TextEdited(text) => Some(patch.with_text(text)),
            Self::SizeSlid(raw) => parse_range_value("size", &raw).map(|v| patch.with_size(v)),
            Self::LevelSelected(raw) => match raw.parse::<Level>() {
                Ok(level) => Some(patch.with_level(level)),
                Err(e) => {
                    tracing::warn!("ignoring level selection: {e}");
                    None
                }
            },
            Self::MarginToggled(include) => Some(patch.with_include_margin(include)),
            Self::ForegroundEdited(color) | Self::ForegroundPicked(color) => {
                Some(patch.with_fg_color(color))
            }
            Self::BackgroundEdited(color) | Self::BackgroundPicked(color) => {
                Some(patch.with_bg_color(color))
            }
            Self::LogoDropped(files) => {
                accept_dropped(files).map(|logo| patch.with_logo_file(Some(logo)))
            }
            Self::LogoRemoved => Some(patch.with_logo_file(None)),
            Self::LogoSizeSlid(raw) => {
                parse_range_value("logo_size", &raw).map(|v| patch.with_logo_size(v))
            }
        }
    }
}

/// Pick the first acceptable image among `files`.
///
/// At most one logo is kept; later files are ignored. No size or content
/// checks are made beyond the type filter.
#[must_use]
pub fn accept_dropped(files: Vec<DroppedFile>) -> Option<LogoFile> {
    let total = files.len();
    let file = files
        .into_iter()
        .find(|f| is_accepted_image(&f.name, &f.mime_type))?;
    if total > 1 {
        tracing::debug!(total, "multiple files dropped, keeping {}", file.name);
    }
    Some(LogoFile::new(file.name, file.mime_type, file.bytes))
}

/// Whether a file passes the drop zone's type filter.
///
/// Any `image/*` MIME type is accepted. Files without a MIME type are
/// judged by extension.
#[must_use]
pub fn is_accepted_image(name: &str, mime_type: &str) -> bool {
    if !mime_type.is_empty() {
        return mime_type
            .split_once('/')
            .is_some_and(|(kind, _)| kind.eq_ignore_ascii_case("image"));
    }
    has_accepted_extension(name)
}

/// Check whether a filename has an accepted image extension.
#[must_use]
pub fn has_accepted_extension(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        ACCEPTED_EXTENSIONS
            .iter()
            .any(|a| a.eq_ignore_ascii_case(ext))
    })
}

/// Best-effort MIME type for a filename with an accepted extension.
#[must_use]
pub fn mime_type_for(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// The MIME type to record for a file: the browser's report when it has
/// one, otherwise a guess from the extension, otherwise empty.
#[must_use]
pub fn resolve_mime_type(name: &str, reported: Option<&str>) -> String {
    reported
        .filter(|m| !m.is_empty())
        .or_else(|| mime_type_for(name))
        .unwrap_or_default()
        .to_owned()
}

/// Value to show in a native `<input type="color">` for free-form text.
///
/// The native picker only understands `#rrggbb`; three-digit shorthand
/// is expanded and anything else shows black.
#[must_use]
pub fn picker_value(color: &str) -> String {
    let hex = color.trim().trim_start_matches('#');
    let valid = hex.chars().all(|c| c.is_ascii_hexdigit());
    match hex.len() {
        6 if valid => format!("#{}", hex.to_ascii_lowercase()),
        3 if valid => {
            let expanded: String = hex
                .chars()
                .flat_map(|c| [c, c])
                .collect::<String>()
                .to_ascii_lowercase();
            format!("#{expanded}")
        }
        _ => "#000000".to_owned(),
    }
}

/// Interpret a range input's value the way `parseInt` would for the
/// values a range widget can produce.
fn parse_range_value(field: &str, raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<u32>() {
        return Some(v);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v <= f64::from(u32::MAX) => {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Some(v.trunc() as u32)
        }
        _ => {
            tracing::warn!(field, raw, "ignoring unparsable range value");
            None
        }
    }
}
