//! Axis-aligned cuboid generation for voxels and the base plate.
//!
//! Both generators produce the same 8-vertex layout and share one face table,
//! so winding is defined in exactly one place.

use mesh_types::{Point3, Vertex};

/// Triangles per cuboid (two per face).
pub const CUBOID_TRIANGLES: usize = 12;

/// Vertices per cuboid.
pub const CUBOID_VERTICES: usize = 8;

/// Local vertex indices of the 12 cuboid triangles.
///
/// Vertex layout: 0-3 on the bottom face in the order origin, +X, +X+Y, +Y;
/// 4-7 directly above them on the top face. Every triangle is wound
/// counter-clockwise seen from outside, so its normal points away from the
/// cuboid's interior.
pub const CUBOID_FACES: [[u32; 3]; CUBOID_TRIANGLES] = [
    // Bottom (-Z)
    [0, 2, 1],
    [0, 3, 2],
    // Top (+Z)
    [4, 5, 6],
    [4, 6, 7],
    // Far side (+Y)
    [3, 7, 6],
    [3, 6, 2],
    // Near side (-Y)
    [0, 1, 5],
    [0, 5, 4],
    // Left (-X)
    [0, 4, 7],
    [0, 7, 3],
    // Right (+X)
    [1, 2, 6],
    [1, 6, 5],
];

/// The eight corners of an axis-aligned box in canonical order.
///
/// # Example
///
/// ```
/// use mesh_voxel::{make_cuboid, CUBOID_FACES};
///
/// let cube = make_cuboid(3.0, 1.5, 0.0, 2.0, 1.5);
/// assert_eq!(cube.vertices()[0].position.x, 3.0);
/// assert_eq!(cube.vertices()[6].position.y, 3.0);
///
/// let faces = cube.faces(16);
/// assert_eq!(faces[0], [16, 18, 17]);
/// assert_eq!(faces.len(), CUBOID_FACES.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    vertices: [Vertex; CUBOID_VERTICES],
}

impl Cuboid {
    /// Build the box spanning `[x0, x1] × [y0, y1] × [z0, z1]`.
    ///
    /// Callers pass `x0 <= x1`, `y0 <= y1`, `z0 <= z1`; a reversed span turns
    /// the box inside out.
    #[must_use]
    pub fn from_spans(x: (f64, f64), y: (f64, f64), z: (f64, f64)) -> Self {
        let ring = |z: f64| {
            [
                Vertex::from_coords(x.0, y.0, z),
                Vertex::from_coords(x.1, y.0, z),
                Vertex::from_coords(x.1, y.1, z),
                Vertex::from_coords(x.0, y.1, z),
            ]
        };
        let [b0, b1, b2, b3] = ring(z.0);
        let [t0, t1, t2, t3] = ring(z.1);
        Self {
            vertices: [b0, b1, b2, b3, t0, t1, t2, t3],
        }
    }

    /// The eight corners in canonical order.
    #[must_use]
    pub const fn vertices(&self) -> &[Vertex; CUBOID_VERTICES] {
        &self.vertices
    }

    /// The twelve triangles with indices shifted by `base`, the position where
    /// this cuboid's vertices start in the global vertex sequence.
    #[must_use]
    pub fn faces(&self, base: u32) -> [[u32; 3]; CUBOID_TRIANGLES] {
        CUBOID_FACES.map(|[a, b, c]| [a + base, b + base, c + base])
    }

    /// Center of the box.
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        let lo = self.vertices[0].position;
        let hi = self.vertices[6].position;
        Point3::from((lo.coords + hi.coords) * 0.5)
    }
}

/// Generate the voxel cuboid for one cell.
///
/// The box spans `[origin_x, origin_x + size]` in X,
/// `[origin_y, origin_y + size]` in Y and `[z_bottom, z_top]` in Z.
#[must_use]
pub fn make_cuboid(origin_x: f64, origin_y: f64, z_bottom: f64, z_top: f64, size: f64) -> Cuboid {
    Cuboid::from_spans(
        (origin_x, origin_x + size),
        (origin_y, origin_y + size),
        (z_bottom, z_top),
    )
}

/// Generate the base plate under a `grid_width × grid_height` raster.
///
/// The plate covers the full footprint, `[0, grid_width * size]` in X and
/// `[0, grid_height * size]` in Y, and spans `[-thickness, 0]` in Z so voxel
/// bottoms at `z = 0` sit on its top face.
///
/// # Example
///
/// ```
/// use mesh_voxel::make_base_plate;
///
/// let plate = make_base_plate(4, 2, 1.0, 1.5);
/// let top_far_corner = plate.vertices()[6].position;
/// assert_eq!((top_far_corner.x, top_far_corner.y, top_far_corner.z), (6.0, 3.0, 0.0));
/// assert_eq!(plate.vertices()[0].position.z, -1.0);
/// ```
#[must_use]
pub fn make_base_plate(grid_width: u32, grid_height: u32, thickness: f64, size: f64) -> Cuboid {
    Cuboid::from_spans(
        (0.0, f64::from(grid_width) * size),
        (0.0, f64::from(grid_height) * size),
        (-thickness, 0.0),
    )
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use mesh_types::{IndexedMesh, Triangle};

    fn triangles(cuboid: &Cuboid) -> Vec<Triangle> {
        cuboid
            .faces(0)
            .iter()
            .map(|&[a, b, c]| {
                let v = cuboid.vertices();
                Triangle::new(
                    v[a as usize].position,
                    v[b as usize].position,
                    v[c as usize].position,
                )
            })
            .collect()
    }

    #[test]
    fn vertex_order_is_canonical() {
        let c = make_cuboid(1.0, 2.0, 0.0, 5.0, 0.5);
        let p: Vec<(f64, f64, f64)> = c
            .vertices()
            .iter()
            .map(|v| (v.position.x, v.position.y, v.position.z))
            .collect();
        assert_eq!(
            p,
            vec![
                (1.0, 2.0, 0.0),
                (1.5, 2.0, 0.0),
                (1.5, 2.5, 0.0),
                (1.0, 2.5, 0.0),
                (1.0, 2.0, 5.0),
                (1.5, 2.0, 5.0),
                (1.5, 2.5, 5.0),
                (1.0, 2.5, 5.0),
            ]
        );
    }

    #[test]
    fn every_face_points_outward() {
        let c = make_cuboid(-3.0, 7.0, 0.0, 2.0, 1.5);
        let center = c.centroid();
        for (i, tri) in triangles(&c).iter().enumerate() {
            assert!(tri.faces_away_from(&center), "triangle {i} faces inward");
        }
    }

    #[test]
    fn base_plate_faces_point_outward() {
        let plate = make_base_plate(64, 64, 1.0, 1.5);
        let center = plate.centroid();
        assert_eq!(center.z, -0.5);
        assert!(triangles(&plate).iter().all(|t| t.faces_away_from(&center)));
    }

    #[test]
    fn each_face_pair_covers_one_side() {
        let c = make_cuboid(0.0, 0.0, 0.0, 1.0, 1.0);
        let normals: Vec<_> = triangles(&c).iter().filter_map(Triangle::normal).collect();
        assert_eq!(normals.len(), CUBOID_TRIANGLES);
        for pair in normals.chunks_exact(2) {
            assert!((pair[0] - pair[1]).norm() < 1e-12);
        }
    }

    #[test]
    fn cuboid_volume_matches_extent() {
        let c = make_cuboid(0.0, 0.0, 0.0, 2.0, 1.5);
        let mut mesh = IndexedMesh::new();
        mesh.append_block(c.vertices(), &CUBOID_FACES);
        assert!((mesh.signed_volume() - 4.5).abs() < 1e-10);
    }

    #[test]
    fn faces_are_shifted_by_base() {
        let faces = make_cuboid(0.0, 0.0, 0.0, 1.0, 1.0).faces(8);
        assert!(faces.iter().flatten().all(|&i| (8..16).contains(&i)));
        assert_eq!(faces[11], [9, 14, 13]);
    }
}
