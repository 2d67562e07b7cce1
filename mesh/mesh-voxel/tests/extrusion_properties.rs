//! Structural properties every extrusion must satisfy.
//!
//! Rasters are generated from simple arithmetic patterns so the suite stays
//! deterministic without a random number generator.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::cast_possible_truncation)]

use std::collections::HashSet;

use approx::assert_relative_eq;
use mesh_types::{MeshBounds, MeshTopology, Point3, Rgb, Rgba};
use mesh_voxel::{
    extrude, ExtrusionParams, PixelGrid, Raster, VoxelError, CUBOID_TRIANGLES, CUBOID_VERTICES,
};

/// A `w × h` raster where roughly a third of the cells are transparent and
/// colors cycle through `colors` distinct values.
fn patterned(w: u32, h: u32, colors: u8) -> PixelGrid {
    let mut grid = PixelGrid::filled(w, h, Rgba::TRANSPARENT);
    for y in 0..h {
        for x in 0..w {
            let n = x * 7 + y * 13;
            let alpha = if n % 3 == 0 { 40 } else { 200 };
            let shade = (n % u32::from(colors)) as u8;
            grid.set(x, y, Rgba::new(shade * 20, 255 - shade * 20, shade, alpha));
        }
    }
    grid
}

fn distinct_opaque_colors(grid: &PixelGrid) -> usize {
    grid.cells()
        .filter(|c| c.is_opaque())
        .map(|c| c.color.rgb())
        .collect::<HashSet<Rgb>>()
        .len()
}

#[test]
fn counts_scale_with_opaque_cells() {
    for (w, h, colors) in [(1, 1, 1), (5, 3, 2), (16, 16, 5), (64, 64, 12)] {
        let grid = patterned(w, h, colors);
        let opaque = grid.opaque_count();
        if opaque == 0 {
            continue;
        }

        let mesh = extrude(&grid, &ExtrusionParams::default()).unwrap().mesh;
        assert_eq!(mesh.face_count(), CUBOID_TRIANGLES * (opaque + 1), "{w}x{h}");
        assert_eq!(mesh.vertex_count(), CUBOID_VERTICES * (opaque + 1), "{w}x{h}");
    }
}

#[test]
fn palette_matches_distinct_opaque_colors() {
    for colors in [1, 3, 9] {
        let grid = patterned(20, 11, colors);
        let extrusion = extrude(&grid, &ExtrusionParams::default()).unwrap();
        assert_eq!(extrusion.mesh.palette.len(), distinct_opaque_colors(&grid));
        assert_eq!(extrusion.summary.unique_colors, extrusion.mesh.palette.len());
    }
}

#[test]
fn transparent_cell_colors_do_not_enter_palette() {
    let rows = vec![vec![
        Rgba::new(255, 0, 0, 255),
        Rgba::new(0, 0, 255, 10),
        Rgba::new(0, 255, 0, 128),
    ]];
    let grid = PixelGrid::from_rows(&rows).unwrap();
    let extrusion = extrude(&grid, &ExtrusionParams::default()).unwrap();
    assert_eq!(extrusion.mesh.palette.colors(), &[Rgb::RED, Rgb::GREEN]);
    assert_eq!(extrusion.summary.skipped_cells, 1);
}

#[test]
fn monochrome_raster_has_single_material() {
    let grid = PixelGrid::filled(32, 17, Rgba::opaque(12, 34, 56));
    let extrusion = extrude(&grid, &ExtrusionParams::default()).unwrap();
    assert_eq!(extrusion.mesh.palette.len(), 1);
    assert!(extrusion.mesh.face_materials.iter().all(|&m| m == 0));
}

#[test]
fn all_indices_are_in_range() {
    let grid = patterned(33, 21, 7);
    let mesh = extrude(&grid, &ExtrusionParams::default()).unwrap().mesh;

    let vertex_count = mesh.vertex_count() as u32;
    assert!(mesh.faces().flatten().all(|i| i < vertex_count));
    assert!(mesh
        .face_materials
        .iter()
        .all(|&m| (m as usize) < mesh.palette.len()));
    assert!(mesh.validate().is_ok());
}

#[test]
fn every_cuboid_is_wound_outward() {
    let grid = patterned(9, 6, 4);
    let mesh = extrude(&grid, &ExtrusionParams::new(2.5, 0.8, 1.2)).unwrap().mesh;

    for (cuboid, faces) in mesh.mesh.faces.chunks_exact(CUBOID_TRIANGLES).enumerate() {
        let first = cuboid * CUBOID_VERTICES;
        let corners = &mesh.mesh.vertices[first..first + CUBOID_VERTICES];
        let center = Point3::from(
            corners.iter().map(|v| v.position.coords).sum::<mesh_types::Vector3<f64>>()
                / CUBOID_VERTICES as f64,
        );

        for (offset, _) in faces.iter().enumerate() {
            let tri = mesh.triangle(cuboid * CUBOID_TRIANGLES + offset).unwrap();
            assert!(
                tri.faces_away_from(&center),
                "cuboid {cuboid} triangle {offset} is inverted"
            );
        }
    }
}

#[test]
fn signed_volume_is_sum_of_cuboids() {
    let grid = patterned(10, 10, 3);
    let params = ExtrusionParams::default();
    let extrusion = extrude(&grid, &params).unwrap();

    let voxel = params.cell_size * params.cell_size * params.extrusion_height;
    let plate = extrusion.summary.width_mm() * extrusion.summary.height_mm() * params.base_thickness;
    let expected = voxel * extrusion.summary.opaque_cells as f64 + plate;

    assert_relative_eq!(extrusion.mesh.mesh.signed_volume(), expected, max_relative = 1e-9);
}

#[test]
fn footprint_covers_full_raster() {
    // Opaque cells only in the middle; the plate still spans the whole grid.
    let mut grid = PixelGrid::filled(10, 4, Rgba::TRANSPARENT);
    grid.set(5, 2, Rgba::opaque(1, 2, 3));

    let extrusion = extrude(&grid, &ExtrusionParams::default()).unwrap();
    let bounds = extrusion.mesh.bounds();
    assert_relative_eq!(bounds.min.x, 0.0);
    assert_relative_eq!(bounds.max.x, 15.0);
    assert_relative_eq!(bounds.max.y, 6.0);
    assert_relative_eq!(bounds.min.z, -1.0);
    assert_relative_eq!(bounds.max.z, 2.0);
}

#[test]
fn single_cell_in_top_row() {
    let mut grid = PixelGrid::filled(4, 7, Rgba::TRANSPARENT);
    grid.set(0, 0, Rgba::opaque(200, 0, 0));

    let params = ExtrusionParams::default();
    let mesh = extrude(&grid, &params).unwrap().mesh;
    let voxel = &mesh.mesh.vertices[..CUBOID_VERTICES];

    for v in voxel {
        assert!(v.position.y >= 6.0 * params.cell_size - 1e-12);
        assert!(v.position.y <= 7.0 * params.cell_size + 1e-12);
    }
}

#[test]
fn fully_transparent_raster_fails() {
    let grid = patterned(4, 4, 2);
    let mut clear = grid.clone();
    for y in 0..4 {
        for x in 0..4 {
            clear.set(x, y, Rgba::new(255, 255, 255, 0));
        }
    }
    assert!(matches!(
        extrude(&clear, &ExtrusionParams::default()),
        Err(VoxelError::EmptyInput { width: 4, height: 4 })
    ));
}
