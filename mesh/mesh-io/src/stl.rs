//! STL (Stereolithography) file format support.
//!
//! STL carries geometry only: every triangle is written as an independent
//! record with its own three vertex positions and a unit normal. Material
//! indices and palettes are dropped on save, and loaded meshes come back
//! with an empty palette.
//!
//! # Format Detection
//!
//! The loader detects whether a file is ASCII or binary:
//! - Binary files are exactly `84 + 50 * count` bytes long
//! - Otherwise, files starting with "solid" (after optional whitespace) are ASCII
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored, often contains file info)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (0)
//! end
//! ```
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```

use std::io::{BufRead, Write};
use std::path::Path;

use mesh_types::{IndexedMesh, MaterialMesh, MeshTopology, Triangle, Vector3, Vertex};
use tracing::{debug, info, warn};

use crate::error::{IoError, IoResult};
use crate::persist::write_atomic;

/// STL binary header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
pub const TRIANGLE_SIZE: usize = 50;

/// Header plus the triangle count.
const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Text placed at the start of the binary header.
///
/// Must not begin with "solid" or readers may take the file for ASCII.
const HEADER_TEXT: &[u8] = b"Binary STL written by mesh-io";

/// Exact size of a binary STL holding `triangles` records.
///
/// # Example
///
/// ```
/// assert_eq!(mesh_io::binary_stl_size(60), 3084);
/// ```
#[must_use]
pub const fn binary_stl_size(triangles: usize) -> usize {
    PREAMBLE_SIZE + triangles * TRIANGLE_SIZE
}

/// Load a mesh from an STL file.
///
/// Detects ASCII vs binary format. Every face of the returned mesh uses
/// material 0 and the palette is empty. Vertices are not welded: each
/// triangle contributes three vertices of its own.
///
/// # Arguments
///
/// * `path` - Path to the STL file
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file content is not valid STL
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_stl;
/// use mesh_types::MeshTopology;
///
/// let mesh = load_stl("model.stl").unwrap();
/// println!("Loaded {} faces", mesh.face_count());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<MaterialMesh> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| IoError::from_open(e, path))?;
    let mesh = read_stl(&bytes)?;

    info!(
        path = %path.display(),
        triangles = mesh.face_count(),
        "Loaded STL"
    );
    Ok(mesh)
}

/// Decode STL content already held in memory.
///
/// # Errors
///
/// Returns an error if the content is neither valid binary nor valid ASCII
/// STL, or if the mesh would need more than `u32::MAX` vertices.
pub fn read_stl(bytes: &[u8]) -> IoResult<MaterialMesh> {
    if bytes.len() < 6 {
        return Err(IoError::invalid_content("file too small to be valid STL"));
    }

    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(HEADER_SIZE)]);
    let mesh = if head.trim_start().starts_with("solid") && !is_binary_stl(bytes) {
        debug!("Detected ASCII STL");
        load_stl_ascii(bytes)?
    } else {
        debug!("Detected binary STL");
        load_stl_binary(bytes)?
    };

    Ok(MaterialMesh::from(mesh))
}

/// Check whether the declared triangle count matches the content length.
///
/// Some binary STLs happen to have "solid" in the header, so the length
/// check takes precedence over the text prefix.
fn is_binary_stl(bytes: &[u8]) -> bool {
    match declared_face_count(bytes) {
        Some(count) => binary_stl_size(count as usize) == bytes.len(),
        None => false,
    }
}

fn declared_face_count(bytes: &[u8]) -> Option<u32> {
    let raw = bytes.get(HEADER_SIZE..PREAMBLE_SIZE)?;
    Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

/// Decode a binary STL.
fn load_stl_binary(bytes: &[u8]) -> IoResult<IndexedMesh> {
    let face_count = declared_face_count(bytes).ok_or(IoError::InvalidHeader {
        expected: PREAMBLE_SIZE,
        got: bytes.len(),
    })?;

    let mut mesh = IndexedMesh::new();
    let records = bytes[PREAMBLE_SIZE..].chunks_exact(TRIANGLE_SIZE);

    for (i, record) in (0..face_count).zip(records) {
        // Skip normal (12 bytes), read 3 vertices (36 bytes total)
        let corners = [
            read_vertex(&record[12..24]),
            read_vertex(&record[24..36]),
            read_vertex(&record[36..48]),
        ];
        push_facet(&mut mesh, &corners, i)?;
    }

    #[allow(clippy::cast_possible_truncation)]
    // Truncation: face_count fits in u32 so the number read does too
    let got = mesh.faces.len() as u32;
    if got < face_count {
        return Err(IoError::InvalidFaceCount {
            expected: face_count,
            got,
        });
    }

    Ok(mesh)
}

/// Read a vertex from 12 bytes (3 f32s).
fn read_vertex(buf: &[u8]) -> Vertex {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vertex::from_coords(f64::from(x), f64::from(y), f64::from(z))
}

/// Append one unshared triangle.
fn push_facet(mesh: &mut IndexedMesh, corners: &[Vertex], facet: u32) -> IoResult<()> {
    let base = u32::try_from(mesh.vertices.len())
        .ok()
        .filter(|base| base.checked_add(2).is_some())
        .ok_or_else(|| {
            IoError::invalid_content(format!("facet {facet} exceeds the u32 vertex index range"))
        })?;
    mesh.vertices.extend_from_slice(corners);
    mesh.faces.push([base, base + 1, base + 2]);
    Ok(())
}

/// Decode an ASCII STL.
fn load_stl_ascii<R: BufRead>(reader: R) -> IoResult<IndexedMesh> {
    let mut mesh = IndexedMesh::new();
    let mut in_facet = false;
    let mut in_loop = false;
    let mut facet = 0_u32;
    let mut vertices_in_face: Vec<Vertex> = Vec::with_capacity(3);

    for line in reader.lines() {
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(keyword) = parts.first() else {
            continue;
        };

        match keyword.to_lowercase().as_str() {
            "facet" => {
                in_facet = true;
                // Normals are recomputed on save
            }
            "outer" => {
                if parts.len() >= 2 && parts[1].eq_ignore_ascii_case("loop") {
                    in_loop = true;
                    vertices_in_face.clear();
                }
            }
            "vertex" => {
                if in_loop && parts.len() >= 4 {
                    let x: f64 = parts[1].parse()?;
                    let y: f64 = parts[2].parse()?;
                    let z: f64 = parts[3].parse()?;
                    vertices_in_face.push(Vertex::from_coords(x, y, z));
                }
            }
            "endloop" => {
                in_loop = false;
            }
            "endfacet" => {
                if in_facet && vertices_in_face.len() == 3 {
                    push_facet(&mut mesh, &vertices_in_face, facet)?;
                    facet = facet.saturating_add(1);
                }
                vertices_in_face.clear();
                in_facet = false;
            }
            "endsolid" => break,
            _ => {}
        }
    }

    Ok(mesh)
}

/// Save a mesh to an STL file.
///
/// The file is written to a staging file next to `path` and moved into
/// place once complete, so a failed save never leaves a partial file at
/// the destination.
///
/// # Arguments
///
/// * `mesh` - The mesh to save; material information is ignored
/// * `path` - Output file path
/// * `binary` - If true, save as binary STL; if false, save as ASCII
///
/// # Returns
///
/// The size of the written file in bytes.
///
/// # Errors
///
/// Returns an error if the mesh has more than `u32::MAX` faces, a face
/// references a missing vertex, or the file cannot be written.
///
/// # Example
///
/// ```no_run
/// use mesh_io::{load_stl, save_stl};
///
/// let mesh = load_stl("input.stl").unwrap();
/// save_stl(&mesh, "output.stl", true).unwrap(); // Binary
/// save_stl(&mesh, "output_ascii.stl", false).unwrap(); // ASCII
/// ```
pub fn save_stl<M, P>(mesh: &M, path: P, binary: bool) -> IoResult<u64>
where
    M: MeshTopology,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let size = write_atomic(path, |writer| {
        if binary {
            write_stl_binary(mesh, writer)
        } else {
            write_stl_ascii(mesh, writer)
        }
    })?;

    info!(
        path = %path.display(),
        triangles = mesh.face_count(),
        binary,
        bytes = size,
        "Saved STL"
    );
    Ok(size)
}

/// Encode a mesh as binary STL.
///
/// # Errors
///
/// Returns an error if the face count does not fit the 32-bit count field,
/// a face references a missing vertex, or the writer fails.
pub fn write_stl_binary<M: MeshTopology, W: Write>(mesh: &M, mut writer: W) -> IoResult<()> {
    let face_count = u32::try_from(mesh.face_count()).map_err(|_| {
        IoError::invalid_content(format!(
            "{} triangles exceed the binary STL count field",
            mesh.face_count()
        ))
    })?;

    let mut header = [b' '; HEADER_SIZE];
    header[..HEADER_TEXT.len()].copy_from_slice(HEADER_TEXT);
    writer.write_all(&header)?;
    writer.write_all(&face_count.to_le_bytes())?;

    let mut degenerate = 0_usize;
    for index in 0..mesh.face_count() {
        let tri = resolve(mesh, index)?;
        let normal = facet_normal(&tri, &mut degenerate);

        write_vector_binary(&mut writer, &normal)?;
        write_vector_binary(&mut writer, &tri.v0.coords)?;
        write_vector_binary(&mut writer, &tri.v1.coords)?;
        write_vector_binary(&mut writer, &tri.v2.coords)?;

        // Attribute byte count
        writer.write_all(&0u16.to_le_bytes())?;
    }

    report_degenerate(degenerate);
    Ok(())
}

/// Write a vector as 3 f32s in little-endian.
fn write_vector_binary<W: Write>(writer: &mut W, v: &Vector3<f64>) -> IoResult<()> {
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: f64 to f32 is intentional for STL format
    {
        writer.write_all(&(v.x as f32).to_le_bytes())?;
        writer.write_all(&(v.y as f32).to_le_bytes())?;
        writer.write_all(&(v.z as f32).to_le_bytes())?;
    }
    Ok(())
}

/// Encode a mesh as ASCII STL.
///
/// # Errors
///
/// Returns an error if a face references a missing vertex or the writer
/// fails.
pub fn write_stl_ascii<M: MeshTopology, W: Write>(mesh: &M, mut writer: W) -> IoResult<()> {
    writeln!(writer, "solid mesh")?;

    let mut degenerate = 0_usize;
    for index in 0..mesh.face_count() {
        let tri = resolve(mesh, index)?;
        let n = facet_normal(&tri, &mut degenerate);

        writeln!(writer, "  facet normal {:.6e} {:.6e} {:.6e}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for v in [tri.v0, tri.v1, tri.v2] {
            writeln!(writer, "      vertex {:.6e} {:.6e} {:.6e}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid mesh")?;

    report_degenerate(degenerate);
    Ok(())
}

fn resolve<M: MeshTopology>(mesh: &M, index: usize) -> IoResult<Triangle> {
    mesh.triangle(index).ok_or_else(|| {
        IoError::invalid_content(format!("face {index} references a missing vertex"))
    })
}

/// Unit normal, or zero for a triangle with no area.
fn facet_normal(tri: &Triangle, degenerate: &mut usize) -> Vector3<f64> {
    tri.normal().unwrap_or_else(|| {
        *degenerate += 1;
        Vector3::zeros()
    })
}

fn report_degenerate(count: usize) {
    if count > 0 {
        warn!(
            triangles = count,
            "Degenerate triangles written with zero normals"
        );
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::unnecessary_raw_string_hashes
)]
mod tests {
    use super::*;
    use mesh_types::{MaterialPalette, Rgb};

    fn create_test_triangle() -> IndexedMesh {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
        mesh.faces.push([0, 1, 2]);
        mesh
    }

    fn encode_binary(mesh: &IndexedMesh) -> Vec<u8> {
        let mut bytes = Vec::new();
        write_stl_binary(mesh, &mut bytes).unwrap();
        bytes
    }

    #[test]
    fn binary_layout() {
        let bytes = encode_binary(&create_test_triangle());
        assert_eq!(bytes.len(), binary_stl_size(1));
        assert!(bytes.starts_with(HEADER_TEXT));
        assert_eq!(declared_face_count(&bytes), Some(1));

        // Normal of a CCW triangle in the XY plane is +Z
        let nz = f32::from_le_bytes([bytes[92], bytes[93], bytes[94], bytes[95]]);
        assert_eq!(nz, 1.0);
        // Attribute byte count
        assert_eq!(&bytes[132..134], &[0, 0]);
    }

    #[test]
    fn roundtrip_binary() {
        let original = create_test_triangle();

        let temp_dir = tempfile::tempdir().ok();
        let temp_dir = temp_dir.as_ref();

        if let Some(dir) = temp_dir {
            let path = dir.path().join("test.stl");
            let size = save_stl(&original, &path, true).unwrap();
            assert_eq!(size, binary_stl_size(1) as u64);

            let loaded = load_stl(&path).unwrap();
            assert_eq!(loaded.face_count(), original.face_count());
            assert_eq!(loaded.vertex_count(), original.vertex_count());
            assert!(loaded.palette.is_empty());
            assert_eq!(loaded.face_materials, vec![0]);
        }
    }

    #[test]
    fn roundtrip_ascii() {
        let original = create_test_triangle();

        let temp_dir = tempfile::tempdir().ok();
        let temp_dir = temp_dir.as_ref();

        if let Some(dir) = temp_dir {
            let path = dir.path().join("test_ascii.stl");
            save_stl(&original, &path, false).unwrap();

            let loaded = load_stl(&path).unwrap();
            assert_eq!(loaded.face_count(), original.face_count());

            let v1 = &loaded.mesh.vertices[1].position;
            assert!((v1.x - 1.0).abs() < 1e-5);
            assert!(v1.y.abs() < 1e-5);
            assert!(v1.z.abs() < 1e-5);
        }
    }

    #[test]
    fn materials_are_dropped() {
        let palette: MaterialPalette = [Rgb::RED, Rgb::BLUE].into_iter().collect();
        let colored = MaterialMesh::uniform(create_test_triangle(), palette, 1);

        let mut bytes = Vec::new();
        write_stl_binary(&colored, &mut bytes).unwrap();
        assert_eq!(bytes, encode_binary(&create_test_triangle()));
    }

    #[test]
    fn binary_header_starting_with_solid() {
        let mut bytes = encode_binary(&create_test_triangle());
        bytes[..5].copy_from_slice(b"solid");

        let mesh = read_stl(&bytes).unwrap();
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn truncated_binary_is_rejected() {
        let mut bytes = encode_binary(&create_test_triangle());
        bytes.truncate(binary_stl_size(1) - 10);

        assert!(matches!(
            read_stl(&bytes),
            Err(IoError::InvalidFaceCount {
                expected: 1,
                got: 0
            })
        ));
    }

    #[test]
    fn short_binary_header_is_rejected() {
        let bytes = [0u8; 40];
        assert!(matches!(
            read_stl(&bytes),
            Err(IoError::InvalidHeader { got: 40, .. })
        ));
    }

    #[test]
    fn degenerate_triangle_gets_zero_normal() {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(2.0, 0.0, 0.0));
        mesh.faces.push([0, 1, 2]);

        let bytes = encode_binary(&mesh);
        assert!(bytes[84..96].iter().all(|&b| b == 0));
    }

    #[test]
    fn missing_vertex_is_an_error() {
        let mut mesh = create_test_triangle();
        mesh.faces.push([0, 1, 9]);

        let mut bytes = Vec::new();
        assert!(matches!(
            write_stl_binary(&mesh, &mut bytes),
            Err(IoError::InvalidContent { .. })
        ));
    }

    #[test]
    fn failed_save_leaves_no_file() {
        let mut mesh = create_test_triangle();
        mesh.faces.push([0, 1, 9]);

        let temp_dir = tempfile::tempdir().ok();
        if let Some(dir) = temp_dir.as_ref() {
            let path = dir.path().join("broken.stl");
            assert!(save_stl(&mesh, &path, true).is_err());
            assert!(!path.exists());
        }
    }

    #[test]
    fn load_nonexistent_file() {
        let result = load_stl("nonexistent_file_12345.stl");
        assert!(result.is_err());
        if let Err(IoError::FileNotFound { path }) = result {
            assert!(path.to_string_lossy().contains("nonexistent"));
        }
    }

    #[test]
    fn ascii_stl_parsing() {
        let ascii_stl = br#"solid test
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid test"#;

        let mesh = read_stl(ascii_stl).unwrap();
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn ascii_bad_number_is_rejected() {
        let ascii_stl = b"solid test\n facet normal 0 0 1\n outer loop\n vertex 0 zero 0\n";
        assert!(matches!(read_stl(ascii_stl), Err(IoError::ParseFloat(_))));
    }
}
