//! Conversion errors.

use std::path::PathBuf;

use mesh::io::IoError;
use mesh::voxel::VoxelError;
use thiserror::Error;

/// Result type for conversions.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Why a conversion failed.
///
/// Every variant is terminal; nothing is retried.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input could not be opened or decoded as an image.
    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        /// Input path.
        path: PathBuf,
        /// Decoder failure.
        source: image::ImageError,
    },

    /// The image has no pixel opaque enough to extrude.
    #[error("no opaque pixels found in {width}x{height} image")]
    EmptyInput {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },

    /// A physical dimension is unusable.
    #[error("invalid parameter {name}: {value} (must be positive and finite)")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// The image cannot be represented as a mesh.
    #[error("extrusion failed: {0}")]
    Extrusion(#[source] VoxelError),

    /// Serialization or file writing failed, or the written file did not
    /// read back as expected.
    #[error("failed to write {path}: {source}")]
    OutputWrite {
        /// Output path.
        path: PathBuf,
        /// Encoder or filesystem failure.
        source: IoError,
    },
}

impl ConvertError {
    /// Stable name of the failure kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ImageLoad { .. } => "ImageLoadError",
            Self::EmptyInput { .. } => "EmptyInputError",
            Self::InvalidParameter { .. } => "InvalidParameterError",
            Self::Extrusion(_) => "ExtrusionError",
            Self::OutputWrite { .. } => "OutputWriteError",
        }
    }

    pub(crate) fn output(path: impl Into<PathBuf>, source: IoError) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }
}

impl From<VoxelError> for ConvertError {
    fn from(err: VoxelError) -> Self {
        match err {
            VoxelError::EmptyInput { width, height } => Self::EmptyInput { width, height },
            VoxelError::InvalidParameter { name, value } => Self::InvalidParameter { name, value },
            other => Self::Extrusion(other),
        }
    }
}
