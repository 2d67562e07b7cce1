//! Pixel-art to printable mesh toolkit.
//!
//! This umbrella crate re-exports the mesh-* crates, providing a unified API
//! for turning a raster into a colored, printable solid and writing it out.
//!
//! # Quick Start
//!
//! ```no_run
//! use mesh::prelude::*;
//!
//! let red = Rgba::opaque(255, 0, 0);
//! let grid = PixelGrid::from_rows(&[vec![red, Rgba::TRANSPARENT]]).unwrap();
//!
//! // Extrude with the default dimensions
//! let extrusion = extrude(&grid, &ExtrusionParams::default()).unwrap();
//!
//! // Save for a multi-color printer
//! save_mesh(&extrusion.mesh, "pixel.3mf").unwrap();
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data structures: `IndexedMesh`, `MaterialMesh`,
//!   `MaterialPalette`, `Vertex`, `Triangle`, `Aabb`, colors
//! - [`voxel`] - Raster access and extrusion into voxel cuboids on a base plate
//! - [`io`] - File I/O for STL and multi-material 3MF
//!
//! # Feature Flags
//!
//! - `image` - Implement the raster accessor for `image::RgbaImage`
//! - `serde` - Serialize the core types

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: meshes, colors and material palettes.
pub use mesh_types as types;

/// Raster access and voxel extrusion.
pub use mesh_voxel as voxel;

/// File I/O for STL and 3MF formats.
pub use mesh_io as io;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for extrusion pipelines.
///
/// This module re-exports the most commonly used types and traits.
///
/// # Usage
///
/// ```
/// use mesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{
        Aabb, IndexedMesh, MaterialMesh, MaterialPalette, MeshBounds, MeshTopology, Rgb, Rgba,
        Triangle, Vertex,
    };

    // Extrusion
    pub use mesh_voxel::{extrude, Extrusion, ExtrusionParams, PixelGrid, Raster};

    // I/O
    pub use mesh_io::{load_mesh, save_mesh, MeshFormat};
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        // Verify prelude types are accessible
        use prelude::*;

        let mesh = MaterialMesh::new();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
        assert!(mesh.palette.is_empty());
    }

    #[test]
    fn test_module_reexports() {
        // Verify all modules are accessible
        let _ = types::IndexedMesh::new();
        let _ = voxel::ExtrusionParams::default();
        assert_eq!(io::MeshFormat::ThreeMf.extension(), "3mf");
    }
}
