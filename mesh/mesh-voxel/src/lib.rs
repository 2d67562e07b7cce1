//! Pixel-art extrusion for 3D printing.
//!
//! This crate turns a raster of colored cells into a printable solid: every
//! opaque cell becomes a voxel cuboid, every distinct color becomes one entry
//! in a material palette, and a base plate under the whole footprint holds
//! the voxels together.
//!
//! # Features
//!
//! - **Raster access**: [`Raster`] trait with an in-memory [`PixelGrid`];
//!   the `image` feature adds an implementation for `image::RgbaImage`
//! - **Cuboids**: [`make_cuboid`] and [`make_base_plate`] sharing one
//!   outward-wound face table, [`CUBOID_FACES`]
//! - **Extrusion**: [`extrude`] builds a [`MaterialMesh`](mesh_types::MaterialMesh)
//!   ready for any encoder in `mesh-io`
//!
//! # Example
//!
//! ```
//! use mesh_types::{MeshTopology, Rgba};
//! use mesh_voxel::{extrude, ExtrusionParams, PixelGrid};
//!
//! let red = Rgba::opaque(255, 0, 0);
//! let green = Rgba::opaque(0, 255, 0);
//! let blue = Rgba::opaque(0, 0, 255);
//! let grid = PixelGrid::from_rows(&[vec![red, red], vec![green, blue]]).unwrap();
//!
//! let extrusion = extrude(&grid, &ExtrusionParams::default()).unwrap();
//!
//! // 4 voxels + 1 base plate
//! assert_eq!(extrusion.mesh.vertex_count(), 40);
//! assert_eq!(extrusion.mesh.face_count(), 60);
//! assert_eq!(extrusion.mesh.palette.len(), 3);
//! ```
//!
//! # Coordinate System
//!
//! - X: raster columns, left to right
//! - Y: raster rows, flipped so the image's top row has the highest Y
//! - Z: up; voxels occupy `[0, extrusion_height]`, the plate `[-base_thickness, 0]`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod cuboid;
mod error;
mod extrude;
mod params;
mod raster;
mod result;

pub use cuboid::{
    make_base_plate, make_cuboid, Cuboid, CUBOID_FACES, CUBOID_TRIANGLES, CUBOID_VERTICES,
};
pub use error::{VoxelError, VoxelResult};
pub use extrude::extrude;
pub use params::ExtrusionParams;
pub use raster::{is_opaque, PixelGrid, Raster, RasterCell, OPAQUE_THRESHOLD};
pub use result::{Extrusion, ExtrusionSummary};
