//! Hex color parsing for the free-form color fields.

use image::Rgba;

/// A color field could not be read as hex.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex color: {0:?}")]
pub struct ColorError(pub String);

/// Parse `#rgb`, `#rgba`, `#rrggbb`, or `#rrggbbaa` (the `#` is optional,
/// surrounding whitespace ignored).
///
/// # Errors
///
/// Returns [`ColorError`] for any other length or a non-hex digit.
pub fn parse_hex_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let trimmed = s.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let err = || ColorError(s.to_owned());

    if !hex.is_ascii() {
        return Err(err());
    }

    let digit = |ch: char| ch.to_digit(16).ok_or_else(err);
    match hex.len() {
        3 | 4 => {
            // Short form: each digit doubles (#abc -> #aabbcc).
            let mut rgba = [255u8; 4];
            for (i, ch) in hex.chars().enumerate() {
                #[expect(clippy::cast_possible_truncation)]
                {
                    rgba[i] = (digit(ch)? * 17) as u8;
                }
            }
            Ok(Rgba(rgba))
        }
        6 | 8 => {
            let mut rgba = [255u8; 4];
            for (i, slot) in rgba.iter_mut().take(hex.len() / 2).enumerate() {
                *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| err())?;
            }
            Ok(Rgba(rgba))
        }
        _ => Err(err()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_form() {
        assert_eq!(parse_hex_color("#000000"), Ok(Rgba([0, 0, 0, 255])));
        assert_eq!(parse_hex_color("#FFFFFF"), Ok(Rgba([255, 255, 255, 255])));
        assert_eq!(parse_hex_color("#1a2B3c"), Ok(Rgba([0x1a, 0x2b, 0x3c, 255])));
    }

    #[test]
    fn parses_short_form() {
        assert_eq!(parse_hex_color("#fff"), Ok(Rgba([255, 255, 255, 255])));
        assert_eq!(parse_hex_color("#f00"), Ok(Rgba([255, 0, 0, 255])));
        assert_eq!(parse_hex_color("#f008"), Ok(Rgba([255, 0, 0, 0x88])));
    }

    #[test]
    fn parses_alpha() {
        assert_eq!(parse_hex_color("#11223344"), Ok(Rgba([0x11, 0x22, 0x33, 0x44])));
    }

    #[test]
    fn hash_is_optional_and_whitespace_ignored() {
        assert_eq!(parse_hex_color(" 00ff00 "), Ok(Rgba([0, 255, 0, 255])));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "#", "red", "#12345", "#ggg", "#12345g", "#ééé"] {
            assert!(parse_hex_color(bad).is_err(), "{bad:?} should not parse");
        }
    }
}
