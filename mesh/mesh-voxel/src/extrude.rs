//! The extrusion engine.
//!
//! Walks a raster in row-major order, turns each opaque cell into a voxel
//! cuboid tagged with its color's palette index, and closes the model with a
//! base plate spanning the full raster footprint.

// Cell and vertex counts are checked against u32 before any cast
#![allow(clippy::cast_possible_truncation)]

use mesh_types::{MaterialMesh, MeshTopology};
use tracing::{debug, info};

use crate::cuboid::{
    make_base_plate, make_cuboid, Cuboid, CUBOID_FACES, CUBOID_TRIANGLES, CUBOID_VERTICES,
};
use crate::error::{VoxelError, VoxelResult};
use crate::params::ExtrusionParams;
use crate::raster::Raster;
use crate::result::{Extrusion, ExtrusionSummary};

/// Extrude a raster into a colored voxel mesh on a base plate.
///
/// Each cell with alpha at or above
/// [`OPAQUE_THRESHOLD`](crate::OPAQUE_THRESHOLD) becomes a
/// `cell_size × cell_size × extrusion_height` cuboid standing on `z = 0`.
/// Raster row 0 (the top of the image) maps to the highest Y band, so the
/// model reads the right way up when viewed from above. The base plate spans
/// `[-base_thickness, 0]` in Z and uses material 0.
///
/// The resulting mesh holds `8 * (opaque + 1)` vertices and
/// `12 * (opaque + 1)` triangles. Shared faces between neighbouring voxels
/// are kept; every cuboid is a closed shell on its own.
///
/// # Arguments
///
/// * `raster` - The decoded input image
/// * `params` - Physical dimensions
///
/// # Errors
///
/// - [`VoxelError::InvalidParameter`] if a dimension is not positive and finite
/// - [`VoxelError::EmptyInput`] if no cell is opaque
/// - [`VoxelError::TooManyVertices`] if the mesh cannot be indexed with `u32`
///
/// # Example
///
/// ```
/// use mesh_types::{MeshTopology, Rgba};
/// use mesh_voxel::{extrude, ExtrusionParams, PixelGrid};
///
/// let red = Rgba::opaque(255, 0, 0);
/// let grid = PixelGrid::from_rows(&[vec![red, Rgba::TRANSPARENT]]).unwrap();
///
/// let extrusion = extrude(&grid, &ExtrusionParams::default()).unwrap();
/// assert_eq!(extrusion.mesh.vertex_count(), 16);
/// assert_eq!(extrusion.mesh.face_count(), 24);
/// assert_eq!(extrusion.summary.unique_colors, 1);
/// ```
pub fn extrude<R: Raster>(raster: &R, params: &ExtrusionParams) -> VoxelResult<Extrusion> {
    params.validate()?;

    let width = raster.width();
    let height = raster.height();
    let opaque = raster.opaque_count();

    if opaque == 0 {
        debug!(width, height, "Raster has no opaque cells");
        return Err(VoxelError::EmptyInput { width, height });
    }

    let cuboids = opaque as u64 + 1;
    let vertex_count = cuboids * CUBOID_VERTICES as u64;
    if vertex_count > u64::from(u32::MAX) + 1 {
        return Err(VoxelError::TooManyVertices {
            count: vertex_count,
        });
    }

    info!(
        width,
        height,
        opaque_cells = opaque,
        extrusion_height = params.extrusion_height,
        base_thickness = params.base_thickness,
        cell_size = params.cell_size,
        "Starting raster extrusion"
    );

    let mut mesh = MaterialMesh::with_capacity(
        vertex_count as usize,
        cuboids as usize * CUBOID_TRIANGLES,
    );
    let size = params.cell_size;
    let mut skipped = 0_usize;

    for cell in raster.cells() {
        if !cell.is_opaque() {
            skipped += 1;
            continue;
        }

        let material = mesh.palette.register(cell.color.rgb());

        // Raster rows run top-down, model Y runs bottom-up
        let x = f64::from(cell.x) * size;
        let y = f64::from(height - 1 - cell.y) * size;

        let voxel = make_cuboid(x, y, 0.0, params.extrusion_height, size);
        push_cuboid(&mut mesh, &voxel, material);
    }

    debug!(
        colors = mesh.palette.len(),
        skipped_cells = skipped,
        "Voxel layer complete"
    );

    let plate = make_base_plate(width, height, params.base_thickness, size);
    push_cuboid(&mut mesh, &plate, MaterialMesh::BASE_MATERIAL);

    info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.face_count(),
        colors = mesh.palette.len(),
        "Extrusion complete"
    );

    let summary = ExtrusionSummary {
        grid_width: width,
        grid_height: height,
        opaque_cells: opaque,
        skipped_cells: skipped,
        unique_colors: mesh.palette.len(),
        params: *params,
    };

    Ok(Extrusion { mesh, summary })
}

/// Append a cuboid at the end of the vertex sequence and return the base
/// offset its faces were shifted by.
fn push_cuboid(mesh: &mut MaterialMesh, cuboid: &Cuboid, material: u32) -> u32 {
    mesh.append_block(cuboid.vertices(), &CUBOID_FACES, material)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::raster::PixelGrid;
    use mesh_types::{MeshBounds, Rgb, Rgba};

    fn two_by_two() -> PixelGrid {
        let red = Rgba::opaque(255, 0, 0);
        let green = Rgba::opaque(0, 255, 0);
        let blue = Rgba::opaque(0, 0, 255);
        PixelGrid::from_rows(&[vec![red, red], vec![green, blue]]).unwrap()
    }

    #[test]
    fn two_by_two_example() {
        let extrusion = extrude(&two_by_two(), &ExtrusionParams::default()).unwrap();
        let mesh = &extrusion.mesh;

        assert_eq!(mesh.palette.colors(), &[Rgb::RED, Rgb::GREEN, Rgb::BLUE]);
        assert_eq!(mesh.vertex_count(), 40);
        assert_eq!(mesh.face_count(), 60);
        assert!(mesh.validate().is_ok());

        let bounds = mesh.bounds();
        assert!((bounds.size().x - 3.0).abs() < 1e-12);
        assert!((bounds.size().y - 3.0).abs() < 1e-12);
        assert!((bounds.size().z - 3.0).abs() < 1e-12);

        let summary = extrusion.summary;
        assert_eq!(summary.opaque_cells, 4);
        assert_eq!(summary.skipped_cells, 0);
        assert!((summary.width_mm() - 3.0).abs() < 1e-12);
        assert!((summary.depth_mm() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn voxel_materials_follow_scan_order() {
        let extrusion = extrude(&two_by_two(), &ExtrusionParams::default()).unwrap();
        let per_cuboid: Vec<u32> = extrusion
            .mesh
            .face_materials
            .chunks_exact(CUBOID_TRIANGLES)
            .map(|chunk| {
                assert!(chunk.iter().all(|&m| m == chunk[0]));
                chunk[0]
            })
            .collect();
        // red, red, green, blue, then the base plate
        assert_eq!(per_cuboid, vec![0, 0, 1, 2, 0]);
    }

    #[test]
    fn empty_raster_is_rejected() {
        let grid = PixelGrid::filled(8, 8, Rgba::new(255, 255, 255, 127));
        let result = extrude(&grid, &ExtrusionParams::default());
        assert!(matches!(
            result,
            Err(VoxelError::EmptyInput { width: 8, height: 8 })
        ));
    }

    #[test]
    fn zero_sized_raster_is_rejected() {
        let grid = PixelGrid::from_rows(&[]).unwrap();
        assert!(matches!(
            extrude(&grid, &ExtrusionParams::default()),
            Err(VoxelError::EmptyInput { .. })
        ));
    }

    #[test]
    fn invalid_params_are_rejected_before_scanning() {
        let params = ExtrusionParams::default().with_extrusion_height(0.0);
        assert!(matches!(
            extrude(&two_by_two(), &params),
            Err(VoxelError::InvalidParameter { name: "extrusion_height", .. })
        ));
    }

    #[test]
    fn top_row_maps_to_highest_y_band() {
        let mut grid = PixelGrid::filled(3, 5, Rgba::TRANSPARENT);
        grid.set(2, 0, Rgba::opaque(10, 10, 10));
        let params = ExtrusionParams::default().with_cell_size(2.0);

        let extrusion = extrude(&grid, &params).unwrap();
        let voxel = &extrusion.mesh.mesh.vertices[..CUBOID_VERTICES];

        let ys: Vec<f64> = voxel.iter().map(|v| v.position.y).collect();
        let min_y = ys.iter().copied().fold(f64::INFINITY, f64::min);
        let max_y = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!((min_y, max_y), (8.0, 10.0));
        assert_eq!(voxel[0].position.x, 4.0);
    }

    #[test]
    fn base_plate_is_last_and_under_voxels() {
        let extrusion = extrude(&two_by_two(), &ExtrusionParams::default()).unwrap();
        let plate = &extrusion.mesh.mesh.vertices[32..];
        assert_eq!(plate.len(), CUBOID_VERTICES);
        assert!(plate[..4].iter().all(|v| v.position.z == -1.0));
        assert!(plate[4..].iter().all(|v| v.position.z == 0.0));
        assert_eq!(extrusion.mesh.mesh.faces[48], [32, 34, 33]);
    }

    #[test]
    fn repeated_extrusion_is_identical() {
        let params = ExtrusionParams::wall_art();
        let a = extrude(&two_by_two(), &params).unwrap();
        let b = extrude(&two_by_two(), &params).unwrap();
        assert_eq!(a.mesh, b.mesh);
    }
}
