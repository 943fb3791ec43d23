//! Color comparison and parsing utilities

use crate::error::{BgRemovalError, Result};
use image::{Rgb, Rgba};

/// Whether two colors match within a per-channel tolerance
///
/// Every RGB channel must differ by at most `tolerance`. Alpha plays no part
/// in the comparison.
///
/// # Examples
/// ```rust
/// use image::Rgb;
/// use logo_bgremove::utils::is_similar;
///
/// assert!(is_similar(Rgb([255, 255, 255]), Rgb([245, 250, 255]), 10));
/// assert!(!is_similar(Rgb([255, 255, 255]), Rgb([244, 255, 255]), 10));
/// ```
#[must_use]
pub fn is_similar(a: Rgb<u8>, b: Rgb<u8>, tolerance: u8) -> bool {
    a.0.iter()
        .zip(b.0.iter())
        .all(|(&x, &y)| x.abs_diff(y) <= tolerance)
}

/// RGB part of an RGBA pixel
#[must_use]
pub fn rgb_of(pixel: Rgba<u8>) -> Rgb<u8> {
    let [r, g, b, _] = pixel.0;
    Rgb([r, g, b])
}

/// Utility for parsing colors from user input
pub struct ColorParser;

impl ColorParser {
    /// Parse a hex color string into an opaque RGBA color
    ///
    /// Supports both #RRGGBB and #RGB formats, with or without the `#`.
    ///
    /// # Examples
    /// ```rust
    /// use logo_bgremove::utils::ColorParser;
    ///
    /// let cream = ColorParser::parse_hex("#FFFDD0")?;
    /// assert_eq!(cream.0, [0xFF, 0xFD, 0xD0, 0xFF]);
    /// let red = ColorParser::parse_hex("f00")?;
    /// assert_eq!(red.0, [0xFF, 0x00, 0x00, 0xFF]);
    /// # Ok::<(), logo_bgremove::BgRemovalError>(())
    /// ```
    pub fn parse_hex(hex: &str) -> Result<Rgba<u8>> {
        let digits = hex.trim().trim_start_matches('#');

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(BgRemovalError::invalid_config(format!(
                "Invalid hex color '{}'",
                hex
            )));
        }

        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| {
                BgRemovalError::invalid_config(format!("Invalid hex color '{}'", hex))
            })
        };

        match digits.len() {
            6 => Ok(Rgba([
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                255,
            ])),
            3 => Ok(Rgba([
                channel(&digits[0..1])? * 17,
                channel(&digits[1..2])? * 17,
                channel(&digits[2..3])? * 17,
                255,
            ])),
            _ => Err(BgRemovalError::invalid_config(format!(
                "Color '{}' must be in #RRGGBB or #RGB format",
                hex
            ))),
        }
    }

    /// Format a color as #RRGGBB
    #[must_use]
    pub fn to_hex(color: Rgba<u8>) -> String {
        format!("#{:02X}{:02X}{:02X}", color[0], color[1], color[2])
    }
}
