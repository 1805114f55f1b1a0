//! The session configuration record and its partial updates.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::defaults;

/// QR error-correction tier.
///
/// Higher tiers trade data capacity for damage tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    /// Recovers roughly 7% of codewords.
    L,
    /// Recovers roughly 15% of codewords.
    M,
    /// Recovers roughly 25% of codewords.
    Q,
    /// Recovers roughly 30% of codewords.
    #[default]
    H,
}

impl Level {
    /// All tiers from least to most robust.
    pub const ALL: [Self; 4] = [Self::L, Self::M, Self::Q, Self::H];

    /// Single-letter code used by form widgets.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        }
    }

    /// Human-readable label shown in the summary panel.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::L => "Low (7%)",
            Self::M => "Medium (15%)",
            Self::Q => "Quartile (25%)",
            Self::H => "High (30%)",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of `L`, `M`, `Q`, `H`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error correction level: {0:?}")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLevelError(s.to_owned()))
    }
}

/// An uploaded logo image.
///
/// Cloning is cheap and keeps pointing at the same resource. Equality is
/// resource identity: two independently uploaded files with identical
/// bytes are *not* equal, matching how the preview decides whether its
/// display handle must be replaced.
#[derive(Clone)]
pub struct LogoFile(Rc<LogoData>);

struct LogoData {
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl LogoFile {
    /// Wrap uploaded bytes as a new logo resource.
    #[must_use]
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self(Rc::new(LogoData {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }))
    }

    /// Original filename.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// MIME type reported at upload (may be empty).
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.0.mime_type
    }

    /// Raw file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.0.bytes
    }

    /// Returns `true` if both values refer to the same uploaded resource.
    #[must_use]
    pub fn same_resource(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for LogoFile {
    fn eq(&self, other: &Self) -> bool {
        self.same_resource(other)
    }
}

impl Eq for LogoFile {}

impl fmt::Debug for LogoFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogoFile")
            .field("name", &self.0.name)
            .field("mime_type", &self.0.mime_type)
            .field("len", &self.0.bytes.len())
            .finish()
    }
}

/// The QR code configuration for one session.
///
/// Fields are public and unvalidated. Colors are free-form text and the
/// numeric fields may hold values outside their widget ranges when set
/// programmatically; the renderer decides what to do with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSettings {
    /// Content to encode. Empty text renders [`defaults::PLACEHOLDER_TEXT`].
    pub text: String,
    /// Symbol edge length in pixels.
    pub size: u32,
    /// Module color as hex text.
    pub fg_color: String,
    /// Background color as hex text.
    pub bg_color: String,
    /// Error-correction tier.
    pub level: Level,
    /// Whether a quiet-zone margin surrounds the symbol.
    pub include_margin: bool,
    /// Optional logo drawn over the center of the symbol.
    pub logo_file: Option<LogoFile>,
    /// Logo edge length in pixels. Kept when the logo is removed.
    pub logo_size: u32,
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            text: defaults::DEFAULT_TEXT.to_owned(),
            size: defaults::DEFAULT_SIZE,
            fg_color: defaults::DEFAULT_FG_COLOR.to_owned(),
            bg_color: defaults::DEFAULT_BG_COLOR.to_owned(),
            level: defaults::DEFAULT_LEVEL,
            include_margin: defaults::DEFAULT_INCLUDE_MARGIN,
            logo_file: None,
            logo_size: defaults::DEFAULT_LOGO_SIZE,
        }
    }
}

impl QrSettings {
    /// The content handed to the renderer: the text, or the placeholder
    /// when the text is empty.
    #[must_use]
    pub fn content(&self) -> &str {
        if self.text.is_empty() {
            defaults::PLACEHOLDER_TEXT
        } else {
            &self.text
        }
    }
}

/// A partial update to [`QrSettings`].
///
/// `None` leaves a field untouched. `logo_file` is doubly optional so
/// that clearing the logo (`Some(None)`) is distinct from leaving it
/// alone (`None`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct SettingsPatch {
    pub text: Option<String>,
    pub size: Option<u32>,
    pub fg_color: Option<String>,
    pub bg_color: Option<String>,
    pub level: Option<Level>,
    pub include_margin: Option<bool>,
    #[allow(clippy::option_option)] // outer: field named; inner: logo present
    pub logo_file: Option<Option<LogoFile>>,
    pub logo_size: Option<u32>,
}

impl SettingsPatch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub const fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_fg_color(mut self, color: impl Into<String>) -> Self {
        self.fg_color = Some(color.into());
        self
    }

    pub fn with_bg_color(mut self, color: impl Into<String>) -> Self {
        self.bg_color = Some(color.into());
        self
    }

    pub const fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub const fn with_include_margin(mut self, include: bool) -> Self {
        self.include_margin = Some(include);
        self
    }

    /// Set or clear the logo. `None` clears it.
    pub fn with_logo_file(mut self, logo: Option<LogoFile>) -> Self {
        self.logo_file = Some(logo);
        self
    }

    pub const fn with_logo_size(mut self, size: u32) -> Self {
        self.logo_size = Some(size);
        self
    }

    /// Returns `true` if the patch names no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.field_names().is_empty()
    }

    /// Names of the fields this patch sets, in record order.
    #[must_use]
    pub fn field_names(&self) -> Vec<&'static str> {
        [
            ("text", self.text.is_some()),
            ("size", self.size.is_some()),
            ("fg_color", self.fg_color.is_some()),
            ("bg_color", self.bg_color.is_some()),
            ("level", self.level.is_some()),
            ("include_margin", self.include_margin.is_some()),
            ("logo_file", self.logo_file.is_some()),
            ("logo_size", self.logo_size.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }

    /// Shallow-merge this patch into `settings`.
    pub fn merge_into(&self, settings: &mut QrSettings) {
        if let Some(ref text) = self.text {
            settings.text.clone_from(text);
        }
        if let Some(size) = self.size {
            settings.size = size;
        }
        if let Some(ref color) = self.fg_color {
            settings.fg_color.clone_from(color);
        }
        if let Some(ref color) = self.bg_color {
            settings.bg_color.clone_from(color);
        }
        if let Some(level) = self.level {
            settings.level = level;
        }
        if let Some(include) = self.include_margin {
            settings.include_margin = include;
        }
        if let Some(ref logo) = self.logo_file {
            settings.logo_file.clone_from(logo);
        }
        if let Some(size) = self.logo_size {
            settings.logo_size = size;
        }
    }
}
