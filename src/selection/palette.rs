use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::SelectionError;

/// 24-bit display colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurveColor {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl CurveColor {
    /// Colour from components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Palette entry following this colour; the first entry for colours
    /// outside the palette
    pub fn next_in_palette(&self) -> Self {
        match PALETTE.iter().position(|c| c == self) {
            Some(i) => palette_color(i + 1),
            None => PALETTE[0],
        }
    }
}

impl fmt::Display for CurveColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl FromStr for CurveColor {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SelectionError::InvalidColor(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Preset colours assigned to curves
pub const PALETTE: [CurveColor; 10] = [
    CurveColor::rgb(0x1f, 0x77, 0xb4),
    CurveColor::rgb(0xff, 0x7f, 0x0e),
    CurveColor::rgb(0x2c, 0xa0, 0x2c),
    CurveColor::rgb(0xd6, 0x27, 0x28),
    CurveColor::rgb(0x94, 0x67, 0xbd),
    CurveColor::rgb(0x8c, 0x56, 0x4b),
    CurveColor::rgb(0xe3, 0x77, 0xc2),
    CurveColor::rgb(0x7f, 0x7f, 0x7f),
    CurveColor::rgb(0xbc, 0xbd, 0x22),
    CurveColor::rgb(0x17, 0xbe, 0xcf),
];

/// Palette entry `index`, cycling past the end
pub fn palette_color(index: usize) -> CurveColor {
    PALETTE[index % PALETTE.len()]
}
