//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The box spanned by a set of points, aligned with the axes.
///
/// For an extruded relief the size is the printed footprint along X and Y
/// and the total height, base plate included, along Z.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let plate = Aabb::new(Point3::new(0.0, 0.0, -1.0), Point3::new(3.0, 3.0, 2.0));
/// assert_eq!(plate.size().z, 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Lowest x, y and z.
    pub min: Point3<f64>,
    /// Highest x, y and z.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Box between two opposite corners, given in any order.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// A box containing nothing. Growing it by one point gives that point.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box containing every point; empty for no points.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        points.fold(Self::empty(), |mut aabb, point| {
            aabb.expand_to_include(point);
            aabb
        })
    }

    /// True if the box contains no point at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Extent along each axis.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Grow the box to contain `point`.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn spans_all_points() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 5.0, 3.0),
            Point3::new(-2.0, 8.0, 1.0),
        ];

        let aabb = Aabb::from_points(points.iter());
        assert_eq!(aabb.min, Point3::new(-2.0, 0.0, 0.0));
        assert_eq!(aabb.max, Point3::new(10.0, 8.0, 3.0));
        assert_eq!(aabb.size(), Vector3::new(12.0, 8.0, 3.0));
    }

    #[test]
    fn no_points_is_empty() {
        assert!(Aabb::empty().is_empty());
        assert!(Aabb::default().is_empty());
        assert!(Aabb::from_points(std::iter::empty()).is_empty());
    }

    #[test]
    fn corners_in_any_order() {
        let aabb = Aabb::new(Point3::new(1.0, 0.0, 5.0), Point3::new(0.0, 1.0, -5.0));
        assert_eq!(aabb.min, Point3::new(0.0, 0.0, -5.0));
        assert_eq!(aabb.max, Point3::new(1.0, 1.0, 5.0));
        assert!(!aabb.is_empty());
    }
}
