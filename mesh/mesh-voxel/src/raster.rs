//! Raster input: a grid of RGBA cells.
//!
//! The extrusion engine only needs dimensions and per-cell color, so it reads
//! input through the [`Raster`] trait rather than any image codec. Row 0 is
//! the top row of the image.

use mesh_types::Rgba;

use crate::error::{VoxelError, VoxelResult};

/// Minimum alpha for a cell to be extruded. Cells below it produce no geometry.
pub const OPAQUE_THRESHOLD: u8 = 128;

/// Check whether an alpha value meets [`OPAQUE_THRESHOLD`].
#[inline]
#[must_use]
pub const fn is_opaque(alpha: u8) -> bool {
    alpha >= OPAQUE_THRESHOLD
}

/// One raster cell with its grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterCell {
    /// Column, counted from the left edge.
    pub x: u32,
    /// Row, counted from the top edge.
    pub y: u32,
    /// Cell color and opacity.
    pub color: Rgba,
}

impl RasterCell {
    /// Whether the cell is extruded.
    #[inline]
    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        is_opaque(self.color.a)
    }
}

/// Read access to a decoded raster image.
///
/// Implementors provide dimensions and random access; scanning order and
/// opacity filtering come from the provided methods.
pub trait Raster {
    /// Width in cells.
    fn width(&self) -> u32;

    /// Height in cells.
    fn height(&self) -> u32;

    /// Color of the cell at column `x`, row `y`.
    ///
    /// Returns `None` outside the grid.
    fn cell(&self, x: u32, y: u32) -> Option<Rgba>;

    /// Iterate over all cells in row-major order: every cell of row 0 from
    /// left to right, then row 1, and so on.
    ///
    /// Positions the implementor cannot resolve read as transparent.
    fn cells(&self) -> impl Iterator<Item = RasterCell> + '_
    where
        Self: Sized,
    {
        let width = self.width();
        (0..self.height()).flat_map(move |y| {
            (0..width).map(move |x| RasterCell {
                x,
                y,
                color: self.cell(x, y).unwrap_or(Rgba::TRANSPARENT),
            })
        })
    }

    /// Number of cells that meet [`OPAQUE_THRESHOLD`].
    fn opaque_count(&self) -> usize
    where
        Self: Sized,
    {
        self.cells().filter(RasterCell::is_opaque).count()
    }
}

/// An in-memory raster backed by a row-major cell vector.
///
/// # Example
///
/// ```
/// use mesh_types::Rgba;
/// use mesh_voxel::{PixelGrid, Raster};
///
/// let mut grid = PixelGrid::filled(3, 2, Rgba::TRANSPARENT);
/// grid.set(1, 0, Rgba::opaque(255, 0, 0));
///
/// assert_eq!(grid.opaque_count(), 1);
/// assert_eq!(grid.cell(1, 0), Some(Rgba::opaque(255, 0, 0)));
/// assert_eq!(grid.cell(3, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    cells: Vec<Rgba>,
}

impl PixelGrid {
    /// Create a grid from row-major cells.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::RasterSize`] if `cells.len() != width * height`.
    pub fn new(width: u32, height: u32, cells: Vec<Rgba>) -> VoxelResult<Self> {
        if cells.len() as u64 != u64::from(width) * u64::from(height) {
            return Err(VoxelError::RasterSize {
                width,
                height,
                len: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Create a grid with every cell set to `color`.
    #[must_use]
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            cells: vec![color; width as usize * height as usize],
        }
    }

    /// Create a grid from rows of equal length, top row first.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::RasterSize`] if the rows are ragged.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Rgba;
    /// use mesh_voxel::{PixelGrid, Raster};
    ///
    /// let red = Rgba::opaque(255, 0, 0);
    /// let grid = PixelGrid::from_rows(&[vec![red, red], vec![red, Rgba::TRANSPARENT]]).unwrap();
    /// assert_eq!((grid.width(), grid.height()), (2, 2));
    /// assert_eq!(grid.opaque_count(), 3);
    /// ```
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: grids wider or taller than u32::MAX cells are unsupported
    pub fn from_rows(rows: &[Vec<Rgba>]) -> VoxelResult<Self> {
        let width = rows.first().map_or(0, Vec::len);
        let cells: Vec<Rgba> = rows.iter().flatten().copied().collect();
        let height = rows.len() as u32;
        if rows.iter().any(|row| row.len() != width) {
            return Err(VoxelError::RasterSize {
                width: width as u32,
                height,
                len: cells.len(),
            });
        }
        Self::new(width as u32, height, cells)
    }

    /// Set the cell at column `x`, row `y`. Out-of-range positions are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(index) = self.index(x, y) {
            self.cells[index] = color;
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }
}

impl Raster for PixelGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn cell(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.cells[i])
    }
}

#[cfg(feature = "image")]
impl Raster for image::RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn cell(&self, x: u32, y: u32) -> Option<Rgba> {
        self.get_pixel_checked(x, y).map(|p| Rgba::from(p.0))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        assert!(!is_opaque(0));
        assert!(!is_opaque(127));
        assert!(is_opaque(128));
        assert!(is_opaque(255));
    }

    #[test]
    fn cells_are_row_major() {
        let grid = PixelGrid::filled(3, 2, Rgba::opaque(1, 1, 1));
        let order: Vec<(u32, u32)> = grid.cells().map(|c| (c.x, c.y)).collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn new_rejects_wrong_length() {
        let result = PixelGrid::new(2, 2, vec![Rgba::TRANSPARENT; 3]);
        assert!(matches!(
            result,
            Err(VoxelError::RasterSize { width: 2, height: 2, len: 3 })
        ));
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let rows = vec![vec![Rgba::TRANSPARENT; 2], vec![Rgba::TRANSPARENT; 1]];
        assert!(PixelGrid::from_rows(&rows).is_err());
    }

    #[test]
    fn from_rows_empty_is_zero_sized() {
        let grid = PixelGrid::from_rows(&[]).unwrap();
        assert_eq!((grid.width(), grid.height()), (0, 0));
        assert_eq!(grid.cells().count(), 0);
    }

    #[test]
    fn set_out_of_range_is_ignored() {
        let mut grid = PixelGrid::filled(1, 1, Rgba::TRANSPARENT);
        grid.set(5, 5, Rgba::opaque(9, 9, 9));
        assert_eq!(grid.opaque_count(), 0);
    }

    #[test]
    fn semi_transparent_cells_split_at_threshold() {
        let rows = vec![vec![
            Rgba::new(10, 20, 30, 127),
            Rgba::new(10, 20, 30, 128),
            Rgba::new(10, 20, 30, 0),
        ]];
        let grid = PixelGrid::from_rows(&rows).unwrap();
        let opaque: Vec<u32> = grid.cells().filter(RasterCell::is_opaque).map(|c| c.x).collect();
        assert_eq!(opaque, vec![1]);
    }

    #[cfg(feature = "image")]
    #[test]
    fn image_buffer_is_a_raster() {
        let mut img = image::RgbaImage::new(2, 1);
        img.put_pixel(1, 0, image::Rgba([200, 100, 50, 255]));
        assert_eq!(Raster::width(&img), 2);
        assert_eq!(img.cell(1, 0), Some(Rgba::new(200, 100, 50, 255)));
        assert_eq!(img.cell(2, 0), None);
        assert_eq!(img.opaque_count(), 1);
    }
}
