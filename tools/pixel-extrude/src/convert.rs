//! The conversion pipeline: decode, extrude, write, report.

use std::path::Path;

use mesh::io::{self, IoError, MeshFormat};
use mesh::types::{MaterialMesh, MeshTopology};
use mesh::voxel::{extrude, Extrusion, ExtrusionParams, Raster};
use tracing::{debug, info};

use crate::error::{ConvertError, ConvertResult};
use crate::report::ConversionStats;

/// How to run a conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertOptions {
    /// Physical dimensions of the relief.
    pub params: ExtrusionParams,

    /// Output format. `None` detects it from the output extension.
    pub format: Option<MeshFormat>,

    /// Write STL as ASCII instead of binary.
    pub ascii_stl: bool,

    /// Read the written file back and check it against the mesh.
    pub verify: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            params: ExtrusionParams::default(),
            format: None,
            ascii_stl: false,
            verify: false,
        }
    }
}

impl ConvertOptions {
    /// Options with the given dimensions and everything else default.
    #[must_use]
    pub fn new(params: ExtrusionParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// Force the output format.
    #[must_use]
    pub const fn with_format(mut self, format: MeshFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Choose ASCII STL output.
    #[must_use]
    pub const fn with_ascii_stl(mut self, ascii: bool) -> Self {
        self.ascii_stl = ascii;
        self
    }

    /// Enable read-back verification.
    #[must_use]
    pub const fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// The format to write `output` in.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::OutputWrite`] if no format was forced and the
    /// extension is not recognized.
    pub fn resolve_format(&self, output: &Path) -> ConvertResult<MeshFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        MeshFormat::from_path(output).ok_or_else(|| {
            let extension = output
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(none)")
                .to_string();
            ConvertError::output(output, IoError::UnknownFormat { extension })
        })
    }
}

/// Convert an image file into a printable mesh file.
///
/// The image is decoded in any format the `image` crate supports and
/// converted to RGBA8 before extrusion. The output file is written only
/// after the mesh is fully built, and never left half-written.
///
/// # Errors
///
/// - [`ConvertError::InvalidParameter`] for non-positive dimensions
/// - [`ConvertError::ImageLoad`] if the input cannot be decoded
/// - [`ConvertError::EmptyInput`] if no pixel is opaque; no file is created
/// - [`ConvertError::OutputWrite`] if writing or verification fails
///
/// # Example
///
/// ```no_run
/// use pixel_extrude::{convert, ConvertOptions};
///
/// let stats = convert("sprite.png".as_ref(), "sprite.3mf".as_ref(), &ConvertOptions::default()).unwrap();
/// println!("{} colors, {} triangles", stats.unique_colors, stats.total_triangles);
/// ```
pub fn convert(input: &Path, output: &Path, options: &ConvertOptions) -> ConvertResult<ConversionStats> {
    // Fail on bad options before touching the input
    options.params.validate()?;
    options.resolve_format(output)?;

    let image = image::open(input)
        .map_err(|source| ConvertError::ImageLoad {
            path: input.to_path_buf(),
            source,
        })?
        .to_rgba8();

    debug!(
        path = %input.display(),
        width = image.width(),
        height = image.height(),
        "Decoded image"
    );

    convert_raster(&image, output, options)
}

/// Convert an already decoded raster into a printable mesh file.
///
/// # Errors
///
/// As [`convert`], minus image decoding.
pub fn convert_raster<R: Raster>(
    raster: &R,
    output: &Path,
    options: &ConvertOptions,
) -> ConvertResult<ConversionStats> {
    let format = options.resolve_format(output)?;
    let extrusion = extrude(raster, &options.params)?;

    let size = write_mesh(&extrusion.mesh, output, format, options.ascii_stl)
        .map_err(|e| ConvertError::output(output, e))?;

    if options.verify {
        verify_output(&extrusion, output, format).map_err(|e| ConvertError::output(output, e))?;
    }

    let stats = ConversionStats::new(&extrusion, format, size);
    info!(
        path = %output.display(),
        format = %format,
        triangles = stats.total_triangles,
        colors = stats.unique_colors,
        file_size_kb = stats.file_size_kb,
        "Conversion complete"
    );
    Ok(stats)
}

fn write_mesh(
    mesh: &MaterialMesh,
    output: &Path,
    format: MeshFormat,
    ascii_stl: bool,
) -> io::IoResult<u64> {
    match format {
        MeshFormat::Stl => io::save_stl(mesh, output, !ascii_stl),
        MeshFormat::ThreeMf => io::save_3mf(mesh, output),
    }
}

/// Read the written file back and compare it with the mesh.
fn verify_output(extrusion: &Extrusion, output: &Path, format: MeshFormat) -> io::IoResult<()> {
    let expected = &extrusion.mesh;
    let loaded = match format {
        MeshFormat::Stl => io::load_stl(output)?,
        MeshFormat::ThreeMf => io::load_3mf(output)?,
    };

    if loaded.face_count() != expected.face_count() {
        return Err(IoError::invalid_content(format!(
            "read back {} triangles, expected {}",
            loaded.face_count(),
            expected.face_count()
        )));
    }

    if format.supports_color() {
        if loaded.palette != expected.palette {
            return Err(IoError::invalid_content(format!(
                "read back palette {:?}, expected {:?}",
                loaded.palette.to_hex_list(),
                expected.palette.to_hex_list()
            )));
        }
        if loaded.face_materials != expected.face_materials {
            return Err(IoError::invalid_content(
                "read back per-triangle materials differ",
            ));
        }
    }

    debug!(path = %output.display(), "Verified output");
    Ok(())
}
