//! Indexed mesh with a per-face material reference.

use thiserror::Error;

use crate::{Aabb, IndexedMesh, MaterialPalette, MeshBounds, MeshTopology, Triangle, Vertex};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle mesh whose faces each reference one palette entry.
///
/// `face_materials[i]` is the material of `mesh.faces[i]`. The two vectors
/// grow together through [`push_face`](Self::push_face) and
/// [`append_block`](Self::append_block).
///
/// Material [`BASE_MATERIAL`](Self::BASE_MATERIAL) is always accepted by
/// [`validate`](Self::validate), so a palette-less mesh (for example one read
/// back from a format without colors) still validates.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaterialMesh {
    /// Geometry.
    pub mesh: IndexedMesh,

    /// Material index per face, parallel to `mesh.faces`.
    pub face_materials: Vec<u32>,

    /// Colors referenced by `face_materials`.
    pub palette: MaterialPalette,
}

/// A broken index found by [`MaterialMesh::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexViolation {
    /// A face references a vertex past the end of the vertex sequence.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    VertexIndex {
        /// Face index.
        face: usize,
        /// Offending vertex index.
        index: u32,
        /// Number of vertices.
        vertex_count: usize,
    },

    /// A face references a material past the end of the palette.
    #[error("face {face} references material {material}, but the palette has {palette_len} entries")]
    MaterialIndex {
        /// Face index.
        face: usize,
        /// Offending material index.
        material: u32,
        /// Number of palette entries.
        palette_len: usize,
    },

    /// `face_materials` is not parallel to `faces`.
    #[error("{faces} faces but {materials} material references")]
    MaterialCount {
        /// Number of faces.
        faces: usize,
        /// Number of material references.
        materials: usize,
    },
}

impl MaterialMesh {
    /// Material index used for geometry that carries no color of its own.
    pub const BASE_MATERIAL: u32 = 0;

    /// Create an empty mesh with an empty palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with pre-allocated geometry capacity.
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            mesh: IndexedMesh::with_capacity(vertex_count, face_count),
            face_materials: Vec::with_capacity(face_count),
            palette: MaterialPalette::new(),
        }
    }

    /// Wrap existing geometry, assigning every face the same material.
    #[must_use]
    pub fn uniform(mesh: IndexedMesh, palette: MaterialPalette, material: u32) -> Self {
        let face_materials = vec![material; mesh.faces.len()];
        Self {
            mesh,
            face_materials,
            palette,
        }
    }

    /// Append one face with its material.
    pub fn push_face(&mut self, face: [u32; 3], material: u32) {
        self.mesh.faces.push(face);
        self.face_materials.push(material);
    }

    /// Append a block of vertices and block-local faces, all tagged with
    /// `material`. Returns the base offset the block's vertices start at.
    ///
    /// See [`IndexedMesh::append_block`].
    pub fn append_block(
        &mut self,
        vertices: &[Vertex],
        local_faces: &[[u32; 3]],
        material: u32,
    ) -> u32 {
        let base = self.mesh.append_block(vertices, local_faces);
        self.face_materials
            .extend(std::iter::repeat_n(material, local_faces.len()));
        base
    }

    /// Material of the face at `face_index`.
    #[must_use]
    pub fn material_of(&self, face_index: usize) -> Option<u32> {
        self.face_materials.get(face_index).copied()
    }

    /// Number of faces that reference `material`.
    #[must_use]
    pub fn faces_with_material(&self, material: u32) -> usize {
        self.face_materials.iter().filter(|&&m| m == material).count()
    }

    /// Check that every vertex and material index is in range.
    ///
    /// # Errors
    ///
    /// Returns the first [`IndexViolation`] found, scanning faces in order.
    pub fn validate(&self) -> Result<(), IndexViolation> {
        if self.face_materials.len() != self.mesh.faces.len() {
            return Err(IndexViolation::MaterialCount {
                faces: self.mesh.faces.len(),
                materials: self.face_materials.len(),
            });
        }

        let vertex_count = self.mesh.vertices.len();
        let palette_len = self.palette.len();

        for (face, (indices, &material)) in self
            .mesh
            .faces
            .iter()
            .zip(&self.face_materials)
            .enumerate()
        {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(IndexViolation::VertexIndex {
                    face,
                    index,
                    vertex_count,
                });
            }
            if material != Self::BASE_MATERIAL && material as usize >= palette_len {
                return Err(IndexViolation::MaterialIndex {
                    face,
                    material,
                    palette_len,
                });
            }
        }

        Ok(())
    }
}

impl MeshTopology for MaterialMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.mesh.face_count()
    }

    fn face(&self, index: usize) -> Option<[u32; 3]> {
        self.mesh.face(index)
    }

    fn triangle(&self, face_index: usize) -> Option<Triangle> {
        self.mesh.triangle(face_index)
    }

    fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.mesh.vertices.iter()
    }

    fn faces(&self) -> impl Iterator<Item = [u32; 3]> {
        self.mesh.faces.iter().copied()
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> {
        self.mesh.triangles()
    }
}

impl MeshBounds for MaterialMesh {
    fn bounds(&self) -> Aabb {
        self.mesh.bounds()
    }
}

impl From<IndexedMesh> for MaterialMesh {
    fn from(mesh: IndexedMesh) -> Self {
        Self::uniform(mesh, MaterialPalette::new(), Self::BASE_MATERIAL)
    }
}
