//! Note color codec.
//!
//! # Responsibility
//! - Convert presentation colors to persisted channel values and back.
//! - Provide the named palette offered by the edit form.
//!
//! # Invariants
//! - Persisted channels are finite and within `[0, 1]`.
//! - `decode(encode(color))` equals the clamped input within float precision.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Persisted color shape: four normalized channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorChannels {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub opacity: f64,
}

impl ColorChannels {
    /// Returns the first channel outside `[0, 1]` (or non-finite), if any.
    pub fn out_of_range_channel(&self) -> Option<(&'static str, f64)> {
        [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("opacity", self.opacity),
        ]
        .into_iter()
        .find(|(_, value)| !(0.0..=1.0).contains(value))
    }
}

impl Default for ColorChannels {
    fn default() -> Self {
        encode(NotePalette::Yellow.color())
    }
}

/// Presentation-side color as handed to and from renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl DisplayColor {
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(value: &str) -> Result<Self, ColorParseError> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !digits.is_ascii() || !(digits.len() == 6 || digits.len() == 8) {
            return Err(ColorParseError::InvalidHex(value.to_string()));
        }

        let mut bytes = [0_u8, 0, 0, 255];
        for (idx, slot) in bytes.iter_mut().enumerate().take(digits.len() / 2) {
            let pair = &digits[idx * 2..idx * 2 + 2];
            *slot = u8::from_str_radix(pair, 16)
                .map_err(|_| ColorParseError::InvalidHex(value.to_string()))?;
        }

        Ok(Self::rgba(
            f64::from(bytes[0]) / 255.0,
            f64::from(bytes[1]) / 255.0,
            f64::from(bytes[2]) / 255.0,
            f64::from(bytes[3]) / 255.0,
        ))
    }

    /// Formats as `#RRGGBBAA`.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02X}{g:02X}{b:02X}{:02X}", channel_to_u8(self.alpha))
    }

    /// Quantizes color channels to 8-bit for terminal truecolor output.
    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        ]
    }
}

/// Named colors offered by the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotePalette {
    Yellow,
    Orange,
    Pink,
    Purple,
    Blue,
    Green,
    Gray,
    White,
}

impl NotePalette {
    pub const ALL: [NotePalette; 8] = [
        NotePalette::Yellow,
        NotePalette::Orange,
        NotePalette::Pink,
        NotePalette::Purple,
        NotePalette::Blue,
        NotePalette::Green,
        NotePalette::Gray,
        NotePalette::White,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Pink => "pink",
            Self::Purple => "purple",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Gray => "gray",
            Self::White => "white",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = match name.trim().to_ascii_lowercase().as_str() {
            "grey" => "gray".to_string(),
            other => other.to_string(),
        };
        Self::ALL
            .into_iter()
            .find(|entry| entry.name() == normalized)
    }

    pub fn color(self) -> DisplayColor {
        match self {
            Self::Yellow => DisplayColor::rgba(1.0, 0.92, 0.55, 1.0),
            Self::Orange => DisplayColor::rgba(1.0, 0.76, 0.48, 1.0),
            Self::Pink => DisplayColor::rgba(1.0, 0.71, 0.80, 1.0),
            Self::Purple => DisplayColor::rgba(0.80, 0.72, 0.96, 1.0),
            Self::Blue => DisplayColor::rgba(0.67, 0.84, 1.0, 1.0),
            Self::Green => DisplayColor::rgba(0.72, 0.93, 0.69, 1.0),
            Self::Gray => DisplayColor::rgba(0.85, 0.85, 0.85, 1.0),
            Self::White => DisplayColor::rgba(1.0, 1.0, 1.0, 1.0),
        }
    }
}

/// Resolves a palette name or hex literal into a display color.
pub fn parse_color(value: &str) -> Result<DisplayColor, ColorParseError> {
    if let Some(named) = NotePalette::from_name(value) {
        return Ok(named.color());
    }
    let trimmed = value.trim();
    if trimmed.starts_with('#') || trimmed.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return DisplayColor::from_hex(trimmed);
    }
    Err(ColorParseError::UnknownName(value.to_string()))
}

/// Color input could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    InvalidHex(String),
    UnknownName(String),
}

impl Display for ColorParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHex(value) => {
                write!(f, "invalid hex color `{value}`; expected #RRGGBB or #RRGGBBAA")
            }
            Self::UnknownName(value) => write!(f, "unknown color name `{value}`"),
        }
    }
}

impl Error for ColorParseError {}

/// Converts a display color into persisted channels, clamping to `[0, 1]`.
pub fn encode(color: DisplayColor) -> ColorChannels {
    ColorChannels {
        red: clamp_unit(color.red),
        green: clamp_unit(color.green),
        blue: clamp_unit(color.blue),
        opacity: clamp_unit(color.alpha),
    }
}

/// Converts persisted channels back into a display color, clamping to `[0, 1]`.
pub fn decode(channels: ColorChannels) -> DisplayColor {
    DisplayColor {
        red: clamp_unit(channels.red),
        green: clamp_unit(channels.green),
        blue: clamp_unit(channels.blue),
        alpha: clamp_unit(channels.opacity),
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn channel_to_u8(value: f64) -> u8 {
    (clamp_unit(value) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, parse_color, ColorChannels, DisplayColor, NotePalette};

    const EPSILON: f64 = 1e-12;

    fn assert_close(left: f64, right: f64) {
        assert!((left - right).abs() < EPSILON, "{left} != {right}");
    }

    #[test]
    fn encode_then_decode_preserves_in_range_color() {
        let color = DisplayColor::rgba(0.1, 0.25, 0.333_333, 0.9);
        let decoded = decode(encode(color));
        assert_close(decoded.red, 0.1);
        assert_close(decoded.green, 0.25);
        assert_close(decoded.blue, 0.333_333);
        assert_close(decoded.alpha, 0.9);
    }

    #[test]
    fn decode_then_encode_preserves_channels() {
        let channels = ColorChannels {
            red: 0.7,
            green: 0.0,
            blue: 1.0,
            opacity: 0.42,
        };
        assert_eq!(encode(decode(channels)), channels);
    }

    #[test]
    fn out_of_range_and_nan_inputs_are_clamped() {
        let channels = encode(DisplayColor::rgba(-0.5, 1.7, f64::NAN, f64::INFINITY));
        assert_eq!(channels.red, 0.0);
        assert_eq!(channels.green, 1.0);
        assert_eq!(channels.blue, 0.0);
        assert_eq!(channels.opacity, 1.0);
        assert!(channels.out_of_range_channel().is_none());
    }

    #[test]
    fn hex_parsing_accepts_optional_alpha() {
        let opaque = DisplayColor::from_hex("#FF8000").expect("rgb hex should parse");
        assert_eq!(opaque.to_rgb8(), [255, 128, 0]);
        assert_close(opaque.alpha, 1.0);

        let translucent = DisplayColor::from_hex("00ff0080").expect("rgba hex should parse");
        assert_eq!(translucent.to_hex(), "#00FF0080");
    }

    #[test]
    fn hex_parsing_rejects_bad_lengths_and_digits() {
        assert!(DisplayColor::from_hex("#FFF").is_err());
        assert!(DisplayColor::from_hex("#GGGGGG").is_err());
        assert!(DisplayColor::from_hex("#ééé").is_err());
    }

    #[test]
    fn parse_color_resolves_palette_names_case_insensitively() {
        assert_eq!(
            parse_color(" Blue ").expect("palette name should parse"),
            NotePalette::Blue.color()
        );
        assert_eq!(
            parse_color("grey").expect("alias should parse"),
            NotePalette::Gray.color()
        );
        assert!(parse_color("chartreuse").is_err());
    }
}
