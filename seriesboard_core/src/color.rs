// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Serializable RGBA colors.

use alloc::string::String;
use core::fmt;

use peniko::Color;
use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color, serialized as `#rrggbb` or `#rrggbbaa`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 is opaque).
    pub a: u8,
}

/// Error returned when a color string is not `#rrggbb` or `#rrggbbaa`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid color `{0}`: expected #rrggbb or #rrggbbaa")]
pub struct ColorParseError(pub String);

impl Rgba {
    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Returns this color with a new alpha channel.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError(input.into());
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        match hex.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            _ => Err(err()),
        }
    }

    /// Converts to a paint color.
    pub fn to_color(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, self.a)
    }

    /// Converts from a paint color.
    pub fn from_color(color: Color) -> Self {
        let c = color.to_rgba8();
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        alloc::format!("{value}")
    }
}

impl From<Rgba> for Color {
    fn from(value: Rgba) -> Self {
        value.to_color()
    }
}

/// Categorical palette used when a series arrives without a color.
pub const PALETTE: [Rgba; 10] = [
    Rgba::rgb(0x4c, 0x78, 0xa8),
    Rgba::rgb(0xf5, 0x85, 0x18),
    Rgba::rgb(0xe4, 0x57, 0x56),
    Rgba::rgb(0x72, 0xb7, 0xb2),
    Rgba::rgb(0x54, 0xa2, 0x4b),
    Rgba::rgb(0xee, 0xca, 0x3b),
    Rgba::rgb(0xb2, 0x79, 0xa2),
    Rgba::rgb(0xff, 0x9d, 0xa6),
    Rgba::rgb(0x9d, 0x75, 0x5d),
    Rgba::rgb(0xba, 0xb0, 0xac),
];

/// Returns the palette entry for `index`, wrapping around.
pub fn palette_color(index: usize) -> Rgba {
    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn parses_short_and_alpha_forms() {
        assert_eq!(Rgba::parse("#ff8000"), Ok(Rgba::rgb(255, 128, 0)));
        assert_eq!(
            Rgba::parse("00000080"),
            Ok(Rgba::rgb(0, 0, 0).with_alpha(0x80))
        );
        assert!(Rgba::parse("#ff80").is_err());
        assert!(Rgba::parse("#gg0000").is_err());
        // Multi-byte input must not be sliced mid-character.
        assert!(Rgba::parse("#ééé").is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        let c = Rgba::rgb(0x12, 0x34, 0x56).with_alpha(0x78);
        let s = String::from(c);
        assert_eq!(s, "#12345678");
        assert_eq!(Rgba::parse(&s), Ok(c));
        assert_eq!(String::from(Rgba::rgb(1, 2, 3)), "#010203");
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(palette_color(0), palette_color(PALETTE.len()));
    }
}
