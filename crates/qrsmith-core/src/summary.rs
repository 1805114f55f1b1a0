//! Read-only summary panel text.

use crate::types::QrSettings;

/// Characters of content shown before truncation.
pub const CONTENT_PREVIEW_CHARS: usize = 30;

/// The three lines of the "QR Code Details" panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// e.g. `300x300px`.
    pub dimensions: String,
    /// e.g. `High (30%)`.
    pub error_correction: &'static str,
    /// The text, truncated to [`CONTENT_PREVIEW_CHARS`] plus `...`.
    pub content: String,
}

impl Summary {
    #[must_use]
    pub fn from_settings(settings: &QrSettings) -> Self {
        Self {
            dimensions: format!("{0}x{0}px", settings.size),
            error_correction: settings.level.label(),
            content: truncate_content(&settings.text, CONTENT_PREVIEW_CHARS),
        }
    }
}

/// `text` unchanged if it has at most `max_chars` characters, otherwise
/// its first `max_chars` characters followed by `...`.
#[must_use]
pub fn truncate_content(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Level;

    #[test]
    fn default_summary() {
        let summary = Summary::from_settings(&QrSettings::default());
        assert_eq!(summary.dimensions, "300x300px");
        assert_eq!(summary.error_correction, "High (30%)");
        assert_eq!(summary.content, "https://calpa.me/");
    }

    #[test]
    fn summary_follows_settings() {
        let settings = QrSettings {
            size: 1000,
            level: Level::Q,
            ..QrSettings::default()
        };
        let summary = Summary::from_settings(&settings);
        assert_eq!(summary.dimensions, "1000x1000px");
        assert_eq!(summary.error_correction, "Quartile (25%)");
    }

    #[test]
    fn summary_shows_empty_text_as_empty() {
        let settings = QrSettings {
            text: String::new(),
            ..QrSettings::default()
        };
        assert_eq!(Summary::from_settings(&settings).content, "");
    }

    #[test]
    fn exactly_thirty_chars_is_not_truncated() {
        let text = "a".repeat(30);
        assert_eq!(truncate_content(&text, 30), text);
    }

    #[test]
    fn thirty_one_chars_is_truncated() {
        let text = format!("{}b", "a".repeat(30));
        assert_eq!(truncate_content(&text, 30), format!("{}...", "a".repeat(30)));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "é".repeat(31);
        let out = truncate_content(&text, 30);
        assert_eq!(out, format!("{}...", "é".repeat(30)));
    }

    #[test]
    fn long_url_summary() {
        let settings = QrSettings {
            text: "https://example.com/a/very/long/path/that/keeps/going".to_owned(),
            ..QrSettings::default()
        };
        assert_eq!(
            Summary::from_settings(&settings).content,
            "https://example.com/a/very/lon..."
        );
    }
}
