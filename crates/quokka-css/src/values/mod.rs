//! CSS declaration values.
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//!
//! Only three kinds of value are modelled: bare keywords, lengths in
//! `px`/`em`/`rem`, and six-digit hex colors.

use std::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

/// [§ 5 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
///
/// Unit names are matched ASCII case-insensitively (`PX`, `Em`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Unit {
    /// [§ 6.1 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
    /// "1px = 1/96th of 1in"
    Px,
    /// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    /// "Equal to the computed value of the font-size property of the element"
    Em,
    /// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    /// "Equal to the computed value of the font-size property of the root element."
    Rem,
}

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl ColorValue {
    /// Black (#000000)
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };

    /// White (#ffffff)
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255, a: 255 };

    /// Create a color from its four channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    ///
    /// Parse exactly six hex digits (`RRGGBB`, with or without a leading `#`).
    /// Alpha is always 255. The 3-, 4- and 8-digit forms are not supported.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: 255,
        })
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// The value of a single declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CssValue {
    /// A bare identifier such as `block` or `auto`. Not validated against
    /// any property's grammar.
    Keyword(String),
    /// [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths)
    Length(f32, Unit),
    /// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
    Color(ColorValue),
}

impl CssValue {
    /// Get the value in pixels.
    ///
    /// Only `px` lengths resolve. `em` and `rem` need font metrics that the
    /// layout-tree stage does not have, so they resolve to 0.0 for now, as
    /// do keywords and colors.
    #[must_use]
    pub const fn to_px(&self) -> f32 {
        match self {
            Self::Length(px, Unit::Px) => *px,
            Self::Length(_, Unit::Em | Unit::Rem) | Self::Keyword(_) | Self::Color(_) => 0.0,
        }
    }

    /// The keyword, if this value is one.
    #[must_use]
    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(k) => Some(k),
            Self::Length(..) | Self::Color(_) => None,
        }
    }
}

impl fmt::Display for CssValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(k) => f.write_str(k),
            Self::Length(n, unit) => write!(f, "{n}{unit}"),
            Self::Color(c) => write!(f, "{c}"),
        }
    }
}
