//! Core mesh types for pixel-art extrusion.
//!
//! This crate provides the foundational types shared by the extrusion engine
//! and the file encoders:
//!
//! - [`Vertex`] - A point in 3D space
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`Rgb`] / [`Rgba`] - 8-bit colors
//! - [`MaterialPalette`] - Ordered, deduplicated color list
//! - [`MaterialMesh`] - An indexed mesh with one material per face
//!
//! # Units
//!
//! All coordinates are `f64` millimeters.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**:
//! - X: width (left/right)
//! - Y: depth (front/back)
//! - Z: height (up/down)
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**.
//! Normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{MaterialMesh, MeshTopology, Rgb, Vertex};
//!
//! let mut mesh = MaterialMesh::new();
//! let red = mesh.palette.register(Rgb::new(255, 0, 0));
//! mesh.mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
//! mesh.push_face([0, 1, 2], red);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(mesh.validate().is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod color;
mod material_mesh;
mod mesh;
mod palette;
mod traits;
mod triangle;
mod vertex;

// Re-export core types
pub use bounds::Aabb;
pub use color::{Rgb, Rgba};
pub use material_mesh::{IndexViolation, MaterialMesh};
pub use mesh::IndexedMesh;
pub use palette::MaterialPalette;
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
