//! Indexed triangle mesh.

use crate::{Aabb, MeshBounds, MeshTopology, Triangle, Vertex};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Triangles over a shared vertex list.
///
/// Faces hold three `u32` indices into `vertices`, wound counter-clockwise
/// seen from outside. Extrusion only ever appends, one cuboid block at a
/// time, so indices stay stable once written.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex, MeshTopology};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array.
    /// Each face is `[v0, v1, v2]` with counter-clockwise winding.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Empty mesh with room for the given counts.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Append a block of vertices and faces whose indices are local to the
    /// block.
    ///
    /// The block's vertices are placed at the end of the vertex sequence and
    /// each local index is shifted by the vertex count before the append.
    /// Returns that base offset.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{IndexedMesh, Vertex};
    ///
    /// let tri = [
    ///     Vertex::from_coords(0.0, 0.0, 0.0),
    ///     Vertex::from_coords(1.0, 0.0, 0.0),
    ///     Vertex::from_coords(0.0, 1.0, 0.0),
    /// ];
    /// let mut mesh = IndexedMesh::new();
    /// assert_eq!(mesh.append_block(&tri, &[[0, 1, 2]]), 0);
    /// assert_eq!(mesh.append_block(&tri, &[[0, 1, 2]]), 3);
    /// assert_eq!(mesh.faces[1], [3, 4, 5]);
    /// ```
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: mesh indices are u32, so vertex counts > 4B are unsupported by design
    pub fn append_block(&mut self, vertices: &[Vertex], local_faces: &[[u32; 3]]) -> u32 {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        self.faces
            .extend(local_faces.iter().map(|&[a, b, c]| [a + base, b + base, c + base]));
        base
    }

    /// Signed enclosed volume in cubic millimeters.
    ///
    /// Sum over faces of the signed tetrahedron spanned with the origin.
    /// Positive when faces wind outward. Separate shells each contribute
    /// their own volume, so touching cuboids add up rather than merge.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.triangles()
            .map(|tri| tri.v0.coords.dot(&tri.v1.coords.cross(&tri.v2.coords)))
            .sum::<f64>()
            / 6.0
    }

    /// Compute the absolute volume of the mesh.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// True if faces wind inward overall.
    #[inline]
    #[must_use]
    pub fn is_inside_out(&self) -> bool {
        self.signed_volume() < 0.0
    }

    /// Compute the total surface area of the mesh.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles().map(|tri| tri.area()).sum()
    }

    fn resolve(&self, [i0, i1, i2]: [u32; 3]) -> Option<Triangle> {
        Some(Triangle {
            v0: self.vertices.get(i0 as usize)?.position,
            v1: self.vertices.get(i1 as usize)?.position,
            v2: self.vertices.get(i2 as usize)?.position,
        })
    }
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn face(&self, index: usize) -> Option<[u32; 3]> {
        self.faces.get(index).copied()
    }

    fn triangle(&self, face_index: usize) -> Option<Triangle> {
        self.faces
            .get(face_index)
            .and_then(|&face| self.resolve(face))
    }

    fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    fn faces(&self) -> impl Iterator<Item = [u32; 3]> {
        self.faces.iter().copied()
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> {
        self.faces.iter().filter_map(|&face| self.resolve(face))
    }
}

impl MeshBounds for IndexedMesh {
    fn bounds(&self) -> Aabb {
        if self.vertices.is_empty() {
            return Aabb::empty();
        }

        let positions = self.vertices.iter().map(|v| &v.position);
        Aabb::from_points(positions)
    }
}
