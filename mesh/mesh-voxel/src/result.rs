//! Extrusion output.

use mesh_types::MaterialMesh;

use crate::params::ExtrusionParams;

/// The mesh produced by [`extrude`](crate::extrude) and what went into it.
#[derive(Debug, Clone)]
pub struct Extrusion {
    /// Voxel cuboids followed by the base plate, one material per face.
    pub mesh: MaterialMesh,

    /// Counts and dimensions of the extrusion.
    pub summary: ExtrusionSummary,
}

/// Counts and physical dimensions of one extrusion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrusionSummary {
    /// Raster width in cells.
    pub grid_width: u32,

    /// Raster height in cells.
    pub grid_height: u32,

    /// Cells that became voxels.
    pub opaque_cells: usize,

    /// Cells skipped for being below the opacity threshold.
    pub skipped_cells: usize,

    /// Distinct colors among opaque cells.
    pub unique_colors: usize,

    /// Parameters the mesh was built with.
    pub params: ExtrusionParams,
}

impl ExtrusionSummary {
    /// Footprint along X in mm.
    #[must_use]
    pub fn width_mm(&self) -> f64 {
        f64::from(self.grid_width) * self.params.cell_size
    }

    /// Footprint along Y in mm.
    #[must_use]
    pub fn height_mm(&self) -> f64 {
        f64::from(self.grid_height) * self.params.cell_size
    }

    /// Extent along Z in mm, base plate included.
    #[must_use]
    pub fn depth_mm(&self) -> f64 {
        self.params.total_height()
    }

    /// Number of cuboids in the mesh, base plate included.
    #[must_use]
    pub const fn cuboid_count(&self) -> usize {
        self.opaque_cells + 1
    }
}
