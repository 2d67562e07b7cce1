//! Read access shared by plain and colored meshes.

use crate::{Aabb, Triangle, Vertex};

/// Trait for types that provide mesh topology information.
///
/// Implemented by both [`IndexedMesh`](crate::IndexedMesh) and
/// [`MaterialMesh`](crate::MaterialMesh) so encoders and checks can work
/// with either.
pub trait MeshTopology {
    /// Get the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Get the number of faces (triangles).
    fn face_count(&self) -> usize;

    /// Check if the mesh is empty.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Get a face by index.
    ///
    /// Returns `None` if the index is out of bounds.
    /// The returned array contains vertex indices.
    fn face(&self, index: usize) -> Option<[u32; 3]>;

    /// Get a triangle by face index with resolved vertex positions.
    ///
    /// Returns `None` if the face index or any of its vertex indices is out
    /// of bounds.
    fn triangle(&self, face_index: usize) -> Option<Triangle>;

    /// Iterate over all vertices.
    fn vertices(&self) -> impl Iterator<Item = &Vertex>;

    /// Iterate over all faces as vertex index triples.
    fn faces(&self) -> impl Iterator<Item = [u32; 3]>;

    /// Iterate over all triangles with resolved vertex positions.
    ///
    /// Faces with out-of-range indices are skipped.
    fn triangles(&self) -> impl Iterator<Item = Triangle>;
}

/// Meshes that can report the box they occupy.
pub trait MeshBounds {
    /// Box around every vertex; empty for a mesh without vertices.
    fn bounds(&self) -> Aabb;
}
