//! Conversion statistics and the JSON result envelope.

use mesh::io::MeshFormat;
use mesh::types::MeshTopology;
use mesh::voxel::Extrusion;
use serde::{Deserialize, Serialize};

use crate::error::ConvertResult;

/// Round to two decimal places, as reported dimensions and sizes are.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// What a successful conversion produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Footprint along X in mm, rounded to 2 decimals.
    pub width_mm: f64,
    /// Footprint along Y in mm, rounded to 2 decimals.
    pub height_mm: f64,
    /// Total height including the base plate in mm, rounded to 2 decimals.
    pub depth_mm: f64,
    /// Image width in pixels.
    pub pixel_width: u32,
    /// Image height in pixels.
    pub pixel_height: u32,
    /// Pixels that became voxels.
    pub opaque_pixels: usize,
    /// Distinct colors among opaque pixels.
    pub unique_colors: usize,
    /// Triangles in the mesh.
    pub total_triangles: usize,
    /// Vertices in the mesh.
    pub total_vertices: usize,
    /// Size of the written file in KiB, rounded to 2 decimals.
    pub file_size_kb: f64,
    /// Output format label, `"STL"` or `"3MF Vortexcolor"`.
    pub format: String,
    /// Palette as `#RRGGBB`, in material index order.
    pub materials: Vec<String>,
    /// Voxel height used, in mm.
    pub extrusion_height_mm: f64,
    /// Base plate thickness used, in mm.
    pub base_thickness_mm: f64,
    /// Cell edge length used, in mm.
    pub pixel_size_mm: f64,
}

impl ConversionStats {
    /// Collect statistics for an extrusion written as `format`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    // Precision: file sizes are far below 2^52 bytes
    pub fn new(extrusion: &Extrusion, format: MeshFormat, file_size_bytes: u64) -> Self {
        let summary = &extrusion.summary;
        let params = &summary.params;
        Self {
            width_mm: round2(summary.width_mm()),
            height_mm: round2(summary.height_mm()),
            depth_mm: round2(summary.depth_mm()),
            pixel_width: summary.grid_width,
            pixel_height: summary.grid_height,
            opaque_pixels: summary.opaque_cells,
            unique_colors: summary.unique_colors,
            total_triangles: extrusion.mesh.face_count(),
            total_vertices: extrusion.mesh.vertex_count(),
            file_size_kb: round2(file_size_bytes as f64 / 1024.0),
            format: format.label().to_string(),
            materials: extrusion.mesh.palette.to_hex_list(),
            extrusion_height_mm: params.extrusion_height,
            base_thickness_mm: params.base_thickness,
            pixel_size_mm: params.cell_size,
        }
    }
}

/// The JSON document printed for every conversion, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Whether the output file was written.
    pub success: bool,
    /// Present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<ConversionStats>,
    /// Present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConversionReport {
    /// Build the report for a finished conversion.
    #[must_use]
    pub fn from_result(result: &ConvertResult<ConversionStats>) -> Self {
        match result {
            Ok(stats) => Self {
                success: true,
                stats: Some(stats.clone()),
                error: None,
            },
            Err(err) => Self {
                success: false,
                stats: None,
                error: Some(err.to_string()),
            },
        }
    }

    /// Render as two-space indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
