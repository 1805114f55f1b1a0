//! Session defaults and widget bounds.

use crate::types::Level;

/// Text encoded when a session starts.
pub const DEFAULT_TEXT: &str = "https://calpa.me/";

/// Content rendered in place of an empty text field.
pub const PLACEHOLDER_TEXT: &str = "https://example.com";

/// Default symbol edge length in pixels.
pub const DEFAULT_SIZE: u32 = 300;

/// Default module (foreground) color.
pub const DEFAULT_FG_COLOR: &str = "#000000";

/// Default background color.
pub const DEFAULT_BG_COLOR: &str = "#FFFFFF";

/// Default error-correction tier.
pub const DEFAULT_LEVEL: Level = Level::H;

/// Whether the quiet-zone margin is drawn by default.
pub const DEFAULT_INCLUDE_MARGIN: bool = true;

/// Default logo edge length in pixels.
pub const DEFAULT_LOGO_SIZE: u32 = 50;

/// Bounds of a range input widget.
///
/// Only the widgets enforce these. Values set programmatically through
/// [`SettingsPatch`](crate::SettingsPatch) are stored as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSpec {
    /// Smallest selectable value.
    pub min: u32,
    /// Largest selectable value.
    pub max: u32,
    /// Increment between selectable values.
    pub step: u32,
}

impl RangeSpec {
    /// Whether `value` is selectable with this widget.
    #[must_use]
    pub const fn contains(self, value: u32) -> bool {
        value >= self.min && value <= self.max && (value - self.min) % self.step == 0
    }
}

/// Symbol size slider.
pub const SIZE_RANGE: RangeSpec = RangeSpec {
    min: 100,
    max: 1000,
    step: 10,
};

/// Logo size slider.
pub const LOGO_SIZE_RANGE: RangeSpec = RangeSpec {
    min: 20,
    max: 150,
    step: 1,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_selectable() {
        assert!(SIZE_RANGE.contains(DEFAULT_SIZE));
        assert!(LOGO_SIZE_RANGE.contains(DEFAULT_LOGO_SIZE));
    }

    #[test]
    fn size_range_respects_step() {
        assert!(SIZE_RANGE.contains(100));
        assert!(SIZE_RANGE.contains(1000));
        assert!(!SIZE_RANGE.contains(105));
        assert!(!SIZE_RANGE.contains(90));
        assert!(!SIZE_RANGE.contains(1010));
    }
}
