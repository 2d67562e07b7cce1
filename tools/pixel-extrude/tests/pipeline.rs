//! End-to-end conversion of PNG files written to a scratch directory.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::float_cmp)]

use std::path::{Path, PathBuf};
use std::process::Command;

use approx::assert_relative_eq;
use image::{Rgba, RgbaImage};
use mesh::io::{binary_stl_size, load_3mf, load_stl, MeshFormat};
use mesh::types::MeshTopology;
use mesh::voxel::ExtrusionParams;
use pixel_extrude::{convert, ConversionReport, ConvertError, ConvertOptions};
use tempfile::TempDir;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
const CLEAR: Rgba<u8> = Rgba([255, 255, 255, 0]);

fn write_png(dir: &TempDir, name: &str, image: &RgbaImage) -> PathBuf {
    let path = dir.path().join(name);
    image.save(&path).unwrap();
    path
}

/// red, red / green, blue
fn two_by_two(dir: &TempDir) -> PathBuf {
    let mut image = RgbaImage::new(2, 2);
    image.put_pixel(0, 0, RED);
    image.put_pixel(1, 0, RED);
    image.put_pixel(0, 1, GREEN);
    image.put_pixel(1, 1, BLUE);
    write_png(dir, "two_by_two.png", &image)
}

fn run(input: &Path, output: &Path) -> Result<pixel_extrude::ConversionStats, ConvertError> {
    convert(input, output, &ConvertOptions::default())
}

#[test]
fn two_by_two_to_3mf() {
    let dir = tempfile::tempdir().unwrap();
    let input = two_by_two(&dir);
    let output = dir.path().join("out.3mf");

    let stats = run(&input, &output).unwrap();
    assert_eq!(stats.total_triangles, 60);
    assert_eq!(stats.total_vertices, 40);
    assert_eq!(stats.opaque_pixels, 4);
    assert_eq!(stats.unique_colors, 3);
    assert_eq!(stats.materials, vec!["#FF0000", "#00FF00", "#0000FF"]);
    assert_eq!(stats.format, "3MF Vortexcolor");
    assert_eq!((stats.width_mm, stats.height_mm, stats.depth_mm), (3.0, 3.0, 3.0));

    let mesh = load_3mf(&output).unwrap();
    assert_eq!(mesh.face_count(), 60);
    assert_eq!(mesh.palette.to_hex_list(), stats.materials);
    // Base plate is the last cuboid and uses the first color
    assert!(mesh.face_materials[48..].iter().all(|&m| m == 0));
}

#[test]
fn two_by_two_to_binary_stl() {
    let dir = tempfile::tempdir().unwrap();
    let input = two_by_two(&dir);
    let output = dir.path().join("out.stl");

    let stats = run(&input, &output).unwrap();
    let size = std::fs::metadata(&output).unwrap().len();
    assert_eq!(size, binary_stl_size(60) as u64);
    assert_eq!(size, 84 + 50 * 60);
    assert_eq!(stats.file_size_kb, 3.01);
    assert_eq!(stats.format, "STL");

    let mesh = load_stl(&output).unwrap();
    assert_eq!(mesh.face_count(), 60);
    assert_relative_eq!(mesh.mesh.volume(), 4.0 * 1.5 * 1.5 * 2.0 + 9.0, epsilon = 1e-4);
}

#[test]
fn custom_dimensions_are_echoed() {
    let dir = tempfile::tempdir().unwrap();
    let input = two_by_two(&dir);
    let output = dir.path().join("out.3mf");

    let options = ConvertOptions::new(ExtrusionParams::new(3.25, 0.5, 2.0));
    let stats = convert(&input, &output, &options).unwrap();

    assert_eq!(stats.width_mm, 4.0);
    assert_eq!(stats.depth_mm, 3.75);
    assert_eq!(stats.extrusion_height_mm, 3.25);
    assert_eq!(stats.base_thickness_mm, 0.5);
    assert_eq!(stats.pixel_size_mm, 2.0);
}

#[test]
fn transparent_image_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut image = RgbaImage::from_pixel(5, 3, CLEAR);
    // Just under the threshold
    image.put_pixel(2, 1, Rgba([10, 10, 10, 127]));
    let input = write_png(&dir, "clear.png", &image);
    let output = dir.path().join("clear.3mf");

    let result = run(&input, &output);
    assert!(matches!(
        result,
        Err(ConvertError::EmptyInput {
            width: 5,
            height: 3
        })
    ));
    assert!(!output.exists());
}

#[test]
fn threshold_alpha_is_opaque() {
    let dir = tempfile::tempdir().unwrap();
    let mut image = RgbaImage::from_pixel(3, 3, CLEAR);
    image.put_pixel(1, 1, Rgba([10, 10, 10, 128]));
    let input = write_png(&dir, "edge.png", &image);

    let stats = run(&input, &dir.path().join("edge.3mf")).unwrap();
    assert_eq!(stats.opaque_pixels, 1);
    assert_eq!(stats.total_triangles, 24);
    assert_eq!(stats.materials, vec!["#0A0A0A"]);
}

#[test]
fn undecodable_input_is_image_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.png");
    std::fs::write(&input, b"definitely not a png").unwrap();

    let result = run(&input, &dir.path().join("out.stl"));
    assert!(matches!(result, Err(ConvertError::ImageLoad { .. })));

    let result = run(&dir.path().join("missing.png"), &dir.path().join("out.stl"));
    assert!(matches!(result, Err(ConvertError::ImageLoad { .. })));
}

#[test]
fn unwritable_destination_is_output_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = two_by_two(&dir);
    let output = dir.path().join("no_such_dir").join("out.3mf");

    let result = run(&input, &output);
    assert!(matches!(result, Err(ConvertError::OutputWrite { .. })));
    assert!(!output.exists());
}

#[test]
fn repeated_conversion_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let input = two_by_two(&dir);

    for format in [MeshFormat::Stl, MeshFormat::ThreeMf] {
        let first = dir.path().join(format!("first.{}", format.extension()));
        let second = dir.path().join(format!("second.{}", format.extension()));
        run(&input, &first).unwrap();
        run(&input, &second).unwrap();
        assert_eq!(
            std::fs::read(&first).unwrap(),
            std::fs::read(&second).unwrap(),
            "{format}"
        );
    }
}

#[test]
fn verify_accepts_fresh_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = two_by_two(&dir);

    for name in ["v.stl", "v.3mf"] {
        let options = ConvertOptions::default().with_verify(true);
        assert!(convert(&input, &dir.path().join(name), &options).is_ok());
    }
}

#[test]
fn cli_prints_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = two_by_two(&dir);
    let output = dir.path().join("cli.stl");

    let out = Command::new(env!("CARGO_BIN_EXE_pixel-extrude"))
        .arg(&input)
        .arg(&output)
        .args(["--extrusion", "2.0", "--base", "1.0", "--pixel-size", "1.5"])
        .output()
        .unwrap();

    assert!(out.status.success());
    let report: ConversionReport = serde_json::from_slice(&out.stdout).unwrap();
    assert!(report.success);
    let stats = report.stats.unwrap();
    assert_eq!(stats.total_triangles, 60);
    assert_eq!(stats.format, "STL");
}

#[test]
fn cli_reports_failure_with_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(&dir, "clear.png", &RgbaImage::from_pixel(2, 2, CLEAR));

    let out = Command::new(env!("CARGO_BIN_EXE_pixel-extrude"))
        .arg(&input)
        .arg(dir.path().join("clear.3mf"))
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    let report: ConversionReport = serde_json::from_slice(&out.stdout).unwrap();
    assert!(!report.success);
    assert!(report.error.unwrap().contains("no opaque pixels"));
}
