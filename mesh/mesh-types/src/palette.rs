//! Ordered, deduplicated material palette.

use hashbrown::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Rgb;

/// An ordered list of distinct colors, referenced by index.
///
/// Indices are assigned in first-registration order and never change: the
/// palette has no removal operation. Lookup by color always finds an existing
/// entry before a new one is appended, so no two entries share a color.
///
/// # Example
///
/// ```
/// use mesh_types::{MaterialPalette, Rgb};
///
/// let mut palette = MaterialPalette::new();
/// assert_eq!(palette.register(Rgb::RED), 0);
/// assert_eq!(palette.register(Rgb::GREEN), 1);
/// assert_eq!(palette.register(Rgb::RED), 0);
///
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.get(1), Some(Rgb::GREEN));
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Vec<Rgb>", into = "Vec<Rgb>")
)]
pub struct MaterialPalette {
    colors: Vec<Rgb>,
    lookup: HashMap<Rgb, u32>,
}

impl MaterialPalette {
    /// Create an empty palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index of `color`, appending it if it is new.
    ///
    /// A new color receives the previous palette length as its index.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: a palette holds at most one entry per distinct 24-bit color
    pub fn register(&mut self, color: Rgb) -> u32 {
        if let Some(&index) = self.lookup.get(&color) {
            return index;
        }
        let index = self.colors.len() as u32;
        self.colors.push(color);
        self.lookup.insert(color, index);
        index
    }

    /// Find the index of an already-registered color.
    #[must_use]
    pub fn index_of(&self, color: Rgb) -> Option<u32> {
        self.lookup.get(&color).copied()
    }

    /// Get the color at `index`.
    #[must_use]
    pub fn get(&self, index: u32) -> Option<Rgb> {
        self.colors.get(index as usize).copied()
    }

    /// Number of distinct colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether no color has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colors in index order.
    #[must_use]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Iterate over colors in index order.
    pub fn iter(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.colors.iter().copied()
    }

    /// Colors in index order as `#RRGGBB` strings.
    #[must_use]
    pub fn to_hex_list(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }
}

impl PartialEq for MaterialPalette {
    fn eq(&self, other: &Self) -> bool {
        self.colors == other.colors
    }
}

impl Eq for MaterialPalette {}

impl FromIterator<Rgb> for MaterialPalette {
    /// Build a palette by registering each color in order; duplicates collapse
    /// onto their first occurrence.
    fn from_iter<I: IntoIterator<Item = Rgb>>(iter: I) -> Self {
        let mut palette = Self::new();
        for color in iter {
            palette.register(color);
        }
        palette
    }
}

impl From<Vec<Rgb>> for MaterialPalette {
    fn from(colors: Vec<Rgb>) -> Self {
        colors.into_iter().collect()
    }
}

impl From<MaterialPalette> for Vec<Rgb> {
    fn from(palette: MaterialPalette) -> Self {
        palette.colors
    }
}
