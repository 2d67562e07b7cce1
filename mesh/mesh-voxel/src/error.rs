//! Error types for extrusion.

use thiserror::Error;

/// Result type for extrusion operations.
pub type VoxelResult<T> = Result<T, VoxelError>;

/// Errors that can occur while turning a raster into a voxel mesh.
#[derive(Debug, Error)]
pub enum VoxelError {
    /// No cell met the opacity threshold, so there is nothing to extrude.
    #[error("no opaque cells found in {width}x{height} raster")]
    EmptyInput {
        /// Raster width in cells.
        width: u32,
        /// Raster height in cells.
        height: u32,
    },

    /// An extrusion parameter is not a positive finite number.
    #[error("invalid parameter {name}: {value} (must be a positive finite number)")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// A raster's cell buffer does not match its dimensions.
    #[error("raster is {width}x{height} but holds {len} cells")]
    RasterSize {
        /// Declared width in cells.
        width: u32,
        /// Declared height in cells.
        height: u32,
        /// Number of cells supplied.
        len: usize,
    },

    /// The mesh would need more vertices than a `u32` index can address.
    #[error("extrusion needs {count} vertices, more than 32-bit indices can address")]
    TooManyVertices {
        /// Required vertex count.
        count: u64,
    },
}
