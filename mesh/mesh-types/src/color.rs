//! 8-bit color types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGB color with 8-bit components.
///
/// This is the identity of a material: two cells with the same `Rgb`
/// share one palette entry regardless of their opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
}

impl Rgb {
    /// Create a new color from RGB components.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Rgb;
    ///
    /// let red = Rgb::new(255, 0, 0);
    /// assert_eq!(red.r, 255);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as an uppercase `#RRGGBB` string.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Rgb;
    ///
    /// assert_eq!(Rgb::new(255, 128, 0).to_hex(), "#FF8000");
    /// ```
    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_string()
    }

    /// Parse a `#RRGGBB` or `#RRGGBBAA` display color.
    ///
    /// The alpha pair, when present, is ignored. Returns `None` for any other
    /// shape.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("#00ff7f"), Some(Rgb::new(0, 255, 127)));
    /// assert_eq!(Rgb::from_hex("#00FF7FFF"), Some(Rgb::new(0, 255, 127)));
    /// assert_eq!(Rgb::from_hex("00FF7F"), None);
    /// ```
    #[must_use]
    pub fn from_hex(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#')?;
        let well_formed = matches!(digits.len(), 6 | 8)
            && digits.bytes().all(|b| b.is_ascii_hexdigit());
        if !well_formed {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Black color (0, 0, 0).
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// White color (255, 255, 255).
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Red color (255, 0, 0).
    pub const RED: Self = Self::new(255, 0, 0);

    /// Green color (0, 255, 0).
    pub const GREEN: Self = Self::new(0, 255, 0);

    /// Blue color (0, 0, 255).
    pub const BLUE: Self = Self::new(0, 0, 255);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// RGBA color with 8-bit components, as read from a raster cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha (opacity) component (0-255).
    pub a: u8,
}

impl Rgba {
    /// Create a new color from RGBA components.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// A fully opaque color.
    #[inline]
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, u8::MAX)
    }

    /// A fully transparent black cell.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Drop the alpha channel.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Rgb, Rgba};
    ///
    /// assert_eq!(Rgba::new(1, 2, 3, 4).rgb(), Rgb::new(1, 2, 3));
    /// ```
    #[inline]
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_uppercase_and_padded() {
        assert_eq!(Rgb::new(1, 10, 171).to_hex(), "#010AAB");
        assert_eq!(Rgb::BLACK.to_hex(), "#000000");
    }

    #[test]
    fn hex_parse_rejects_malformed() {
        assert_eq!(Rgb::from_hex("#12345"), None);
        assert_eq!(Rgb::from_hex("#GG0000"), None);
        assert_eq!(Rgb::from_hex(""), None);
        assert_eq!(Rgb::from_hex("#ééé"), None);
        assert_eq!(Rgb::from_hex("#+1+2+3"), None);
        assert_eq!(Rgb::from_hex("#00FF7F+F"), None);
    }

    #[test]
    fn hex_parse_is_inverse_of_display() {
        let c = Rgb::new(18, 52, 86);
        assert_eq!(Rgb::from_hex(&c.to_hex()), Some(c));
    }

    #[test]
    fn rgba_drops_alpha() {
        let c = Rgba::from([9, 8, 7, 6]);
        assert_eq!(c.rgb(), Rgb::from([9, 8, 7]));
        assert_eq!(Rgba::opaque(1, 2, 3).a, 255);
    }
}
