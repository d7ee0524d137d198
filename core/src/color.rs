use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const RGB24_MAX: u32 = 0x00ff_ffff;

/// A 24-bit RGB color rendered as `#rrggbb`.
///
/// Rendering always zero-pads on the left, so `0x0000ff` is `#0000ff`.
/// Padding on the right instead would turn small values into different
/// colors (`0xff` would read back as `#ff0000`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HexColor(u32);

impl HexColor {
    pub const BLACK: HexColor = HexColor(0x000000);
    pub const WHITE: HexColor = HexColor(0xffffff);

    pub fn from_rgb24(value: u32) -> Self {
        Self(value & RGB24_MAX)
    }

    /// Uniform over every value in `0..=RGB24_MAX`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(0..=RGB24_MAX))
    }

    pub fn rgb24(self) -> u32 {
        self.0
    }

    pub fn channels(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }

    /// CSS `rgba()` with the given alpha, used where a color has to fade
    /// out without shifting hue.
    pub fn rgba_css(self, alpha: f64) -> String {
        let (r, g, b) = self.channels();
        let alpha = alpha.clamp(0.0, 1.0);
        format!("rgba({r}, {g}, {b}, {alpha})")
    }
}

impl Default for HexColor {
    fn default() -> Self {
        HexColor::WHITE
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("color must start with '#'")]
    MissingHash,
    #[error("color must have 6 hex digits, got {0}")]
    InvalidLength(usize),
    #[error("invalid hex digit in color '{0}'")]
    InvalidDigit(String),
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or(ColorParseError::MissingHash)?;
        if digits.len() != 6 {
            return Err(ColorParseError::InvalidLength(digits.len()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| ColorParseError::InvalidDigit(trimmed.to_string()))
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
