//! Mesh file I/O for printable colored meshes.
//!
//! This crate saves and loads [`MaterialMesh`] values in the two formats
//! 3D-printing toolchains accept:
//!
//! - **STL** (Stereolithography) - Binary and ASCII, geometry only
//! - **3MF** (3D Manufacturing Format) - ZIP-based XML with a per-triangle
//!   color palette for multi-material printers
//!
//! Saves are atomic: output is staged next to the destination and renamed
//! into place only once fully written.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{load_stl, save_stl};
//!
//! // Load a mesh
//! let mesh = load_stl("model.stl").unwrap();
//!
//! // Save it back as ASCII
//! save_stl(&mesh, "output.stl", false).unwrap();
//! ```
//!
//! # Format Detection
//!
//! The crate can detect file format from extension:
//!
//! ```no_run
//! use mesh_io::{load_mesh, save_mesh};
//!
//! // Format detected from .3mf extension
//! let mesh = load_mesh("model.3mf").unwrap();
//!
//! // Save to a different format
//! save_mesh(&mesh, "model.stl").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod persist;
mod stl;
mod threemf;

pub use error::{IoError, IoResult};
pub use stl::{
    binary_stl_size, load_stl, read_stl, save_stl, write_stl_ascii, write_stl_binary,
    HEADER_SIZE, TRIANGLE_SIZE,
};
pub use threemf::{load_3mf, read_3mf, save_3mf, write_3mf, MODEL_PATH};

use std::fmt;
use std::path::Path;

use mesh_types::MaterialMesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// STL (Stereolithography) format.
    /// Supports binary and ASCII variants; no color information.
    Stl,
    /// 3MF (3D Manufacturing Format).
    /// ZIP-based XML format with a base-material palette.
    ThreeMf,
}

impl MeshFormat {
    /// Detect format from file extension.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to check for extension
    ///
    /// # Returns
    ///
    /// The detected format, or `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        Self::from_extension(&ext)
    }

    /// Parse a bare extension such as `"stl"` or `"3MF"`.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "stl" => Some(Self::Stl),
            "3mf" => Some(Self::ThreeMf),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::ThreeMf => "3mf",
        }
    }

    /// Human-readable format name used in conversion reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Stl => "STL",
            Self::ThreeMf => "3MF Vortexcolor",
        }
    }

    /// Whether the format keeps per-triangle materials.
    #[must_use]
    pub const fn supports_color(&self) -> bool {
        matches!(self, Self::ThreeMf)
    }
}

impl fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn detect_format(path: &Path) -> IoResult<MeshFormat> {
    MeshFormat::from_path(path).ok_or_else(|| IoError::UnknownFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })
}

/// Load a mesh from a file, detecting format from extension.
///
/// # Arguments
///
/// * `path` - Path to the mesh file
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The file cannot be read
/// - The file content is invalid for the detected format
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_mesh;
///
/// let mesh = load_mesh("model.3mf").unwrap();
/// ```
pub fn load_mesh<P: AsRef<Path>>(path: P) -> IoResult<MaterialMesh> {
    let path = path.as_ref();
    match detect_format(path)? {
        MeshFormat::Stl => load_stl(path),
        MeshFormat::ThreeMf => load_3mf(path),
    }
}

/// Save a mesh to a file, detecting format from extension.
///
/// STL output is binary.
///
/// # Arguments
///
/// * `mesh` - The mesh to save
/// * `path` - Path for the output file
///
/// # Returns
///
/// The size of the written file in bytes.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The file cannot be written
///
/// # Example
///
/// ```no_run
/// use mesh_io::{save_mesh, load_mesh};
///
/// let mesh = load_mesh("input.3mf").unwrap();
/// save_mesh(&mesh, "output.stl").unwrap();
/// ```
pub fn save_mesh<P: AsRef<Path>>(mesh: &MaterialMesh, path: P) -> IoResult<u64> {
    let path = path.as_ref();
    save_mesh_as(mesh, path, detect_format(path)?)
}

/// Save a mesh in an explicit format, regardless of the path's extension.
///
/// STL output is binary.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_mesh_as<P: AsRef<Path>>(
    mesh: &MaterialMesh,
    path: P,
    format: MeshFormat,
) -> IoResult<u64> {
    match format {
        MeshFormat::Stl => save_stl(mesh, path, true),
        MeshFormat::ThreeMf => save_3mf(mesh, path),
    }
}
