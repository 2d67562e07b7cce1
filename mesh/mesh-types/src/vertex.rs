//! Mesh vertex.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A corner position in millimeters.
///
/// Vertices live in one append-only list per mesh and faces refer to them
/// by index. Cuboids never share corners, so neighbouring voxels carry
/// coincident but distinct vertices.
///
/// # Example
///
/// ```
/// use mesh_types::{Vertex, Point3};
///
/// let v1 = Vertex::new(Point3::new(1.5, 3.0, -1.0));
/// let v2 = Vertex::from_coords(1.5, 3.0, -1.0);
///
/// assert_eq!(v1, v2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position in millimeters.
    pub position: Point3<f64>,
}

impl Vertex {
    /// Vertex at `position`.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self { position }
    }

    /// Vertex at `(x, y, z)`.
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn coords_land_on_axes() {
        let v = Vertex::from_coords(1.0, 2.0, 3.0);
        assert_eq!(v.position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn from_point() {
        let v: Vertex = Point3::new(0.0, -1.5, 4.5).into();
        assert_eq!(v.position.y, -1.5);
    }
}
