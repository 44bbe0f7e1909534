//! RGB color values and CSS-style color string parsing

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing a color string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Empty input
    #[error("empty color string")]
    Empty,

    /// A `#` prefix followed by something other than 3 or 6 hex digits
    #[error("invalid hex color: {0}")]
    InvalidHex(String),

    /// Neither a hex color nor a known color keyword
    #[error("unknown color: {0}")]
    Unknown(String),
}

/// RGB color with channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

const NAMED_COLORS: &[(&str, u32)] = &[
    ("black", 0x00_00_00),
    ("white", 0xFF_FF_FF),
    ("red", 0xFF_00_00),
    ("lime", 0x00_FF_00),
    ("green", 0x00_80_00),
    ("blue", 0x00_00_FF),
    ("yellow", 0xFF_FF_00),
    ("cyan", 0x00_FF_FF),
    ("magenta", 0xFF_00_FF),
    ("gray", 0x80_80_80),
    ("grey", 0x80_80_80),
    ("orange", 0xFF_A5_00),
];

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    /// Black
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };

    /// Create a color from channel values
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| f32::from(((hex >> shift) & 0xFF) as u8) / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    /// Pack into `0xRRGGBB`, clamping and rounding each channel
    pub fn to_hex(self) -> u32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Lowercase six-digit hex string without the `#` prefix
    pub fn to_hex_string(self) -> String {
        format!("{:06x}", self.to_hex())
    }

    /// Parse `#rgb`, `#rrggbb` or a CSS color keyword
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ColorParseError::Empty);
        }

        if let Some(digits) = trimmed.strip_prefix('#') {
            return Self::parse_hex_digits(digits)
                .ok_or_else(|| ColorParseError::InvalidHex(trimmed.to_string()));
        }

        let lower = trimmed.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, hex)| Self::from_hex(*hex))
            .ok_or_else(|| ColorParseError::Unknown(trimmed.to_string()))
    }

    fn parse_hex_digits(digits: &str) -> Option<Self> {
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Self::from_hex),
            3 => {
                let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16).ok().map(Self::from_hex)
            }
            _ => None,
        }
    }

    /// Channels as an array, for uniform upload
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
