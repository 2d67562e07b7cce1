//! 3MF (3D Manufacturing Format) support with per-triangle colors.
//!
//! 3MF is a ZIP-based format designed for 3D printing, containing XML files
//! that describe geometry, materials and build instructions.
//!
//! # Format Structure
//!
//! A 3MF file written here is a ZIP archive containing exactly:
//! - `\[Content_Types\].xml` - MIME type mappings
//! - `_rels/.rels` - Relationships
//! - `3D/3dmodel.model` - Main model XML file
//!
//! # Materials
//!
//! The palette of a [`MaterialMesh`] is written as one `m:basematerials`
//! group (id 1) from the materials extension. Each entry is named
//! `Color_<index>` and carries its color as `#RRGGBB`. The mesh object
//! (id 2) tags every triangle with `pid="1"` and its material index in
//! `p1`, which multi-color slicers use to assign filaments.
//!
//! A mesh with an empty palette is written without a material group.
//!
//! # Limitations
//!
//! - Only the first `basematerials` group is read; other property groups
//!   (color groups, textures) are ignored
//! - Build item transforms are ignored; all objects are concatenated
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{load_3mf, save_3mf};
//!
//! let mesh = load_3mf("model.3mf").unwrap();
//! save_3mf(&mesh, "output.3mf").unwrap();
//! ```

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::Path;

use mesh_types::{MaterialMesh, MaterialPalette, MeshTopology, Rgb, Vertex};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::error::{IoError, IoResult};
use crate::persist::write_atomic;

/// 3MF core namespace URI.
const NAMESPACE_3MF: &str = "http://schemas.microsoft.com/3dmanufacturing/core/2015/02";

/// 3MF materials extension namespace URI.
const NAMESPACE_MATERIAL: &str = "http://schemas.microsoft.com/3dmanufacturing/material/2015/02";

/// Archive path of the model part.
pub const MODEL_PATH: &str = "3D/3dmodel.model";

/// Resource id of the material group.
const MATERIAL_GROUP_ID: &str = "1";

/// Resource id of the mesh object.
const OBJECT_ID: &str = "2";

/// Load a colored mesh from a 3MF file.
///
/// Loads all mesh objects from the file and concatenates them (vertex
/// indices are offset). Colors from the first `basematerials` group become
/// the palette, and each triangle's `p1` becomes its material index.
/// Triangles without `p1` use material 0.
///
/// # Arguments
///
/// * `path` - Path to the 3MF file
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file is not a valid ZIP archive
/// - The model part is missing or invalid
/// - A triangle references a material the file does not define
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_3mf;
///
/// let mesh = load_3mf("model.3mf").unwrap();
/// println!("{} colors: {:?}", mesh.palette.len(), mesh.palette.to_hex_list());
/// ```
pub fn load_3mf<P: AsRef<Path>>(path: P) -> IoResult<MaterialMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IoError::from_open(e, path))?;
    let mesh = read_3mf(BufReader::new(file))?;

    info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        triangles = mesh.face_count(),
        colors = mesh.palette.len(),
        "Loaded 3MF"
    );
    Ok(mesh)
}

/// Decode a 3MF package from any seekable reader.
///
/// # Errors
///
/// See [`load_3mf`].
pub fn read_3mf<R: Read + Seek>(reader: R) -> IoResult<MaterialMesh> {
    let mut archive = ZipArchive::new(reader).map_err(IoError::zip)?;
    let model_content = read_model_file(&mut archive)?;
    parse_3mf_model(&model_content)
}

/// Read the 3D model part from the archive.
fn read_model_file<R: Read + Seek>(archive: &mut ZipArchive<R>) -> IoResult<String> {
    // Try standard path first
    let model_paths = [MODEL_PATH, "3d/3dmodel.model", "3D/3DModel.model"];

    for model_path in &model_paths {
        if let Ok(mut file) = archive.by_name(model_path) {
            let mut content = String::new();
            file.read_to_string(&mut content)?;
            return Ok(content);
        }
    }

    // Fall back to any .model part
    let fallback = archive
        .file_names()
        .find(|name| {
            Path::new(name)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("model"))
        })
        .map(str::to_owned);

    if let Some(name) = fallback {
        let mut file = archive.by_name(&name).map_err(IoError::zip)?;
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        return Ok(content);
    }

    Err(IoError::invalid_content(
        "3MF archive does not contain a model file",
    ))
}

/// Parse the 3MF model XML content.
fn parse_3mf_model(content: &str) -> IoResult<MaterialMesh> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut state = ModelState::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => state.open(e)?,
            Ok(Event::Empty(ref e)) => state.element(e)?,
            Ok(Event::End(ref e)) => state.close(e.local_name().as_ref()),
            Ok(Event::Eof) => break,
            Err(e) => return Err(IoError::xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let mesh = state.mesh;
    mesh.validate()
        .map_err(|e| IoError::invalid_content(e.to_string()))?;

    debug!(
        colors = mesh.palette.len(),
        file_materials = state.material_map.len(),
        "Parsed 3MF model"
    );
    Ok(mesh)
}

/// Where the parser is in the model document.
#[derive(Default)]
struct ModelState {
    mesh: MaterialMesh,
    /// File material index to palette index. Duplicate colors in the file
    /// collapse onto one palette entry.
    material_map: Vec<u32>,
    seen_materials: bool,
    in_materials: bool,
    in_mesh: bool,
    in_vertices: bool,
    in_triangles: bool,
    vertex_offset: u32,
}

impl ModelState {
    /// Handle an element that has children.
    fn open(&mut self, element: &BytesStart<'_>) -> IoResult<()> {
        match element.local_name().as_ref() {
            b"basematerials" if !self.seen_materials => {
                self.in_materials = true;
                self.seen_materials = true;
            }
            b"mesh" => {
                self.in_mesh = true;
                // Each object's indices are local to its own vertex list
                self.vertex_offset = u32::try_from(self.mesh.vertex_count()).map_err(|_| {
                    IoError::invalid_content("model exceeds the u32 vertex index range")
                })?;
            }
            b"vertices" if self.in_mesh => self.in_vertices = true,
            b"triangles" if self.in_mesh => self.in_triangles = true,
            _ => self.element(element)?,
        }
        Ok(())
    }

    /// Handle a leaf element.
    fn element(&mut self, element: &BytesStart<'_>) -> IoResult<()> {
        match element.local_name().as_ref() {
            b"base" if self.in_materials => {
                let color = parse_base_element(element)?;
                self.material_map.push(self.mesh.palette.register(color));
            }
            b"vertex" if self.in_vertices => {
                let vertex = parse_vertex_element(element)?;
                self.mesh.mesh.vertices.push(vertex);
            }
            b"triangle" if self.in_triangles => {
                let (face, material) = parse_triangle_element(element, self.vertex_offset)?;
                let material = match material {
                    Some(index) => *self.material_map.get(index as usize).ok_or_else(|| {
                        IoError::invalid_content(format!(
                            "triangle references undefined material {index}"
                        ))
                    })?,
                    None => MaterialMesh::BASE_MATERIAL,
                };
                self.mesh.push_face(face, material);
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"basematerials" => self.in_materials = false,
            b"mesh" => self.in_mesh = false,
            b"vertices" => self.in_vertices = false,
            b"triangles" => self.in_triangles = false,
            _ => {}
        }
    }
}

/// Read an attribute value as UTF-8 text.
fn attr_str<'a>(value: &'a [u8], name: &str) -> IoResult<&'a str> {
    std::str::from_utf8(value)
        .map_err(|e| IoError::invalid_content(format!("invalid UTF-8 in {name}: {e}")))
}

/// Parse a `base` element's `displaycolor`.
fn parse_base_element(element: &BytesStart<'_>) -> IoResult<Rgb> {
    for attr in element.attributes().flatten() {
        if attr.key.local_name().as_ref() == b"displaycolor" {
            let value = attr_str(&attr.value, "displaycolor")?;
            return Rgb::from_hex(value).ok_or_else(|| {
                IoError::invalid_content(format!("invalid displaycolor {value:?}"))
            });
        }
    }
    Err(IoError::invalid_content("base material without displaycolor"))
}

/// Parse a vertex element from XML attributes.
fn parse_vertex_element(element: &BytesStart<'_>) -> IoResult<Vertex> {
    let mut coords = [None; 3];

    for attr in element.attributes().flatten() {
        let slot = match attr.key.local_name().as_ref() {
            b"x" => 0,
            b"y" => 1,
            b"z" => 2,
            _ => continue,
        };
        let value = attr_str(&attr.value, "vertex")?;
        let coord: f64 = value
            .parse()
            .map_err(|e| IoError::invalid_content(format!("invalid coordinate {value:?}: {e}")))?;
        coords[slot] = Some(coord);
    }

    match coords {
        [Some(x), Some(y), Some(z)] => Ok(Vertex::from_coords(x, y, z)),
        _ => Err(IoError::invalid_content(format!(
            "vertex missing {}",
            missing_names(&coords, ["x", "y", "z"])
        ))),
    }
}

/// Parse a triangle element into its face and optional `p1` material.
fn parse_triangle_element(
    element: &BytesStart<'_>,
    vertex_offset: u32,
) -> IoResult<([u32; 3], Option<u32>)> {
    let mut slots = [None; 3];
    let mut material = None;

    for attr in element.attributes().flatten() {
        let key = attr.key.local_name();
        let slot = match key.as_ref() {
            b"v1" => Some(0),
            b"v2" => Some(1),
            b"v3" => Some(2),
            b"p1" => None,
            _ => continue,
        };
        let value = attr_str(&attr.value, "triangle")?;
        let index: u32 = value
            .parse()
            .map_err(|e| IoError::invalid_content(format!("invalid index {value:?}: {e}")))?;

        match slot {
            Some(i) => {
                slots[i] = Some(index.checked_add(vertex_offset).ok_or_else(|| {
                    IoError::invalid_content("vertex index exceeds the u32 range")
                })?);
            }
            None => material = Some(index),
        }
    }

    match slots {
        [Some(a), Some(b), Some(c)] => Ok(([a, b, c], material)),
        _ => Err(IoError::invalid_content(format!(
            "triangle missing {}",
            missing_names(&slots, ["v1", "v2", "v3"])
        ))),
    }
}

/// Comma-separated names of the attributes that were not seen.
fn missing_names<T>(slots: &[Option<T>; 3], names: [&str; 3]) -> String {
    slots
        .iter()
        .zip(names)
        .filter(|(slot, _)| slot.is_none())
        .map(|(_, name)| name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Save a colored mesh to a 3MF file.
///
/// The archive is staged next to `path` and moved into place once
/// complete, so a failed save never leaves a partial file at the
/// destination. Archive timestamps are fixed, so saving the same mesh
/// twice produces identical bytes.
///
/// # Arguments
///
/// * `mesh` - The mesh to save
/// * `path` - Output file path
///
/// # Returns
///
/// The size of the written file in bytes.
///
/// # Errors
///
/// Returns an error if the mesh has out-of-range vertex or material
/// indices, or the file cannot be written.
///
/// # Example
///
/// ```no_run
/// use mesh_io::{load_3mf, save_3mf};
///
/// let mesh = load_3mf("input.3mf").unwrap();
/// save_3mf(&mesh, "output.3mf").unwrap();
/// ```
pub fn save_3mf<P: AsRef<Path>>(mesh: &MaterialMesh, path: P) -> IoResult<u64> {
    let path = path.as_ref();
    let size = write_atomic(path, |writer| write_3mf(mesh, writer))?;

    info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        triangles = mesh.face_count(),
        colors = mesh.palette.len(),
        bytes = size,
        "Saved 3MF"
    );
    Ok(size)
}

/// Encode a colored mesh as a 3MF package.
///
/// # Errors
///
/// Returns an error if the mesh has out-of-range vertex or material
/// indices, or the writer fails.
pub fn write_3mf<W: Write + Seek>(mesh: &MaterialMesh, writer: W) -> IoResult<()> {
    mesh.validate()
        .map_err(|e| IoError::invalid_content(e.to_string()))?;

    let model_xml = generate_model_xml(mesh)?;

    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
        ("_rels/.rels", RELS_XML.as_bytes()),
        (MODEL_PATH, model_xml.as_bytes()),
    ] {
        zip.start_file(name, options).map_err(IoError::zip)?;
        zip.write_all(content)?;
    }

    zip.finish().map_err(IoError::zip)?;
    Ok(())
}

/// Content types XML for 3MF.
const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="model" ContentType="application/vnd.ms-package.3dmanufacturing-3dmodel+xml"/>
</Types>"#;

/// Relationships XML for 3MF.
const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Target="/3D/3dmodel.model" Id="rel0" Type="http://schemas.microsoft.com/3dmanufacturing/2013/01/3dmodel"/>
</Relationships>"#;

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> IoResult<()> {
    writer.write_event(event).map_err(IoError::xml)
}

/// Generate the 3D model XML content.
fn generate_model_xml(mesh: &MaterialMesh) -> IoResult<String> {
    let mut buffer = Vec::new();
    let mut writer = Writer::new_with_indent(Cursor::new(&mut buffer), b' ', 2);
    let colored = !mesh.palette.is_empty();

    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    let mut model = BytesStart::new("model");
    model.push_attribute(("xmlns", NAMESPACE_3MF));
    model.push_attribute(("xmlns:m", NAMESPACE_MATERIAL));
    model.push_attribute(("unit", "millimeter"));
    model.push_attribute(("xml:lang", "en-US"));
    emit(&mut writer, Event::Start(model))?;
    emit(&mut writer, Event::Start(BytesStart::new("resources")))?;

    if colored {
        write_materials(&mut writer, &mesh.palette)?;
    }

    let mut object = BytesStart::new("object");
    object.push_attribute(("id", OBJECT_ID));
    object.push_attribute(("type", "model"));
    emit(&mut writer, Event::Start(object))?;
    emit(&mut writer, Event::Start(BytesStart::new("mesh")))?;

    emit(&mut writer, Event::Start(BytesStart::new("vertices")))?;
    for v in &mesh.mesh.vertices {
        let mut vertex = BytesStart::new("vertex");
        vertex.push_attribute(("x", format!("{:.6}", v.position.x).as_str()));
        vertex.push_attribute(("y", format!("{:.6}", v.position.y).as_str()));
        vertex.push_attribute(("z", format!("{:.6}", v.position.z).as_str()));
        emit(&mut writer, Event::Empty(vertex))?;
    }
    emit(&mut writer, Event::End(BytesEnd::new("vertices")))?;

    emit(&mut writer, Event::Start(BytesStart::new("triangles")))?;
    for (&[v1, v2, v3], &material) in mesh.mesh.faces.iter().zip(&mesh.face_materials) {
        let mut triangle = BytesStart::new("triangle");
        triangle.push_attribute(("v1", v1.to_string().as_str()));
        triangle.push_attribute(("v2", v2.to_string().as_str()));
        triangle.push_attribute(("v3", v3.to_string().as_str()));
        if colored {
            triangle.push_attribute(("pid", MATERIAL_GROUP_ID));
            triangle.push_attribute(("p1", material.to_string().as_str()));
        }
        emit(&mut writer, Event::Empty(triangle))?;
    }
    emit(&mut writer, Event::End(BytesEnd::new("triangles")))?;

    emit(&mut writer, Event::End(BytesEnd::new("mesh")))?;
    emit(&mut writer, Event::End(BytesEnd::new("object")))?;
    emit(&mut writer, Event::End(BytesEnd::new("resources")))?;

    emit(&mut writer, Event::Start(BytesStart::new("build")))?;
    let mut item = BytesStart::new("item");
    item.push_attribute(("objectid", OBJECT_ID));
    emit(&mut writer, Event::Empty(item))?;
    emit(&mut writer, Event::End(BytesEnd::new("build")))?;

    emit(&mut writer, Event::End(BytesEnd::new("model")))?;

    String::from_utf8(buffer).map_err(IoError::xml)
}

/// Write the palette as a `basematerials` group.
fn write_materials<W: Write>(writer: &mut Writer<W>, palette: &MaterialPalette) -> IoResult<()> {
    let mut group = BytesStart::new("m:basematerials");
    group.push_attribute(("id", MATERIAL_GROUP_ID));
    emit(writer, Event::Start(group))?;

    for (index, color) in palette.iter().enumerate() {
        let mut base = BytesStart::new("m:base");
        base.push_attribute(("name", format!("Color_{index}").as_str()));
        base.push_attribute(("displaycolor", color.to_hex().as_str()));
        emit(writer, Event::Empty(base))?;
    }

    emit(writer, Event::End(BytesEnd::new("m:basematerials")))
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
    use mesh_types::IndexedMesh;

    fn create_test_cube() -> IndexedMesh {
        let mut mesh = IndexedMesh::new();

        // 8 vertices of a unit cube
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 1.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 1.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 1.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 1.0, 1.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 1.0));

        // 12 triangles (2 per face)
        mesh.faces.push([0, 2, 1]);
        mesh.faces.push([0, 3, 2]);
        mesh.faces.push([4, 5, 6]);
        mesh.faces.push([4, 6, 7]);
        mesh.faces.push([3, 7, 6]);
        mesh.faces.push([3, 6, 2]);
        mesh.faces.push([0, 1, 5]);
        mesh.faces.push([0, 5, 4]);
        mesh.faces.push([0, 4, 7]);
        mesh.faces.push([0, 7, 3]);
        mesh.faces.push([1, 2, 6]);
        mesh.faces.push([1, 6, 5]);

        mesh
    }

    /// Unit cube with its bottom in the first color and the rest in the second.
    fn create_two_tone_cube() -> MaterialMesh {
        let palette: MaterialPalette = [Rgb::new(0xAB, 0x12, 0x09), Rgb::WHITE]
            .into_iter()
            .collect();
        let mut mesh = MaterialMesh::uniform(create_test_cube(), palette, 1);
        mesh.face_materials[0] = 0;
        mesh.face_materials[1] = 0;
        mesh
    }

    fn encode(mesh: &MaterialMesh) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        write_3mf(mesh, &mut cursor).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn model_xml_carries_materials() {
        let xml = generate_model_xml(&create_two_tone_cube()).unwrap();

        assert!(xml.contains(r#"xmlns:m="http://schemas.microsoft.com/3dmanufacturing/material/2015/02""#));
        assert!(xml.contains(r#"unit="millimeter""#));
        assert!(xml.contains(r#"<m:basematerials id="1">"#));
        assert!(xml.contains(r##"<m:base name="Color_0" displaycolor="#AB1209"/>"##));
        assert!(xml.contains(r##"<m:base name="Color_1" displaycolor="#FFFFFF"/>"##));
        assert!(xml.contains(r#"<object id="2" type="model">"#));
        assert!(xml.contains(r#"<vertex x="1.000000" y="1.000000" z="0.000000"/>"#));
        assert!(xml.contains(r#"<triangle v1="0" v2="2" v3="1" pid="1" p1="0"/>"#));
        assert!(xml.contains(r#"<triangle v1="1" v2="6" v3="5" pid="1" p1="1"/>"#));
        assert!(xml.contains(r#"<item objectid="2"/>"#));
    }

    #[test]
    fn uncolored_mesh_has_no_material_group() {
        let mesh = MaterialMesh::from(create_test_cube());
        let xml = generate_model_xml(&mesh).unwrap();

        assert!(!xml.contains("basematerials"));
        assert!(!xml.contains("pid="));
        assert!(xml.contains(r#"<triangle v1="0" v2="2" v3="1"/>"#));
    }

    #[test]
    fn archive_has_three_parts() {
        let bytes = encode(&create_two_tone_cube());
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["3D/3dmodel.model", "[Content_Types].xml", "_rels/.rels"]);
    }

    #[test]
    fn roundtrip_restores_palette_and_materials() {
        let original = create_two_tone_cube();

        let temp_dir = tempfile::tempdir().ok();
        let temp_dir = temp_dir.as_ref();

        if let Some(dir) = temp_dir {
            let path = dir.path().join("cube.3mf");
            save_3mf(&original, &path).unwrap();

            let loaded = load_3mf(&path).unwrap();
            assert_eq!(loaded.vertex_count(), original.vertex_count());
            assert_eq!(loaded.mesh.faces, original.mesh.faces);
            assert_eq!(loaded.face_materials, original.face_materials);
            assert_eq!(loaded.palette, original.palette);

            for (orig, load) in original.mesh.vertices.iter().zip(&loaded.mesh.vertices) {
                assert!((orig.position - load.position).norm() < 1e-6);
            }
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        let mesh = create_two_tone_cube();
        assert_eq!(encode(&mesh), encode(&mesh));
    }

    #[test]
    fn invalid_material_is_rejected_on_write() {
        let mut mesh = create_two_tone_cube();
        mesh.face_materials[3] = 7;

        let mut cursor = Cursor::new(Vec::new());
        assert!(matches!(
            write_3mf(&mesh, &mut cursor),
            Err(IoError::InvalidContent { .. })
        ));
    }

    #[test]
    fn load_nonexistent_file() {
        let result = load_3mf("nonexistent_file_12345.3mf");
        assert!(result.is_err());
        if let Err(IoError::FileNotFound { path }) = result {
            assert!(path.to_string_lossy().contains("nonexistent"));
        }
    }

    #[test]
    fn non_zip_input_is_rejected() {
        let result = read_3mf(Cursor::new(b"solid not a zip".to_vec()));
        assert!(matches!(result, Err(IoError::Zip { .. })));
    }

    #[test]
    fn parse_minimal_model() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<model xmlns="http://schemas.microsoft.com/3dmanufacturing/core/2015/02">
  <resources>
    <object id="1" type="model">
      <mesh>
        <vertices>
          <vertex x="0" y="0" z="0"/>
          <vertex x="1" y="0" z="0"/>
          <vertex x="0" y="1" z="0"/>
        </vertices>
        <triangles>
          <triangle v1="0" v2="1" v3="2"/>
        </triangles>
      </mesh>
    </object>
  </resources>
</model>"#;

        let mesh = parse_3mf_model(xml).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert!(mesh.palette.is_empty());
        assert_eq!(mesh.face_materials, vec![0]);
    }

    #[test]
    fn duplicate_file_colors_share_a_palette_entry() {
        let xml = r##"<model xmlns="http://schemas.microsoft.com/3dmanufacturing/core/2015/02"
       xmlns:m="http://schemas.microsoft.com/3dmanufacturing/material/2015/02">
  <resources>
    <m:basematerials id="1">
      <m:base name="a" displaycolor="#FF0000"/>
      <m:base name="b" displaycolor="#00FF00FF"/>
      <m:base name="c" displaycolor="#FF0000"/>
    </m:basematerials>
    <object id="2" type="model">
      <mesh>
        <vertices>
          <vertex x="0" y="0" z="0"/>
          <vertex x="1" y="0" z="0"/>
          <vertex x="0" y="1" z="0"/>
        </vertices>
        <triangles>
          <triangle v1="0" v2="1" v3="2" pid="1" p1="2"/>
          <triangle v1="0" v2="2" v3="1" pid="1" p1="1"/>
        </triangles>
      </mesh>
    </object>
  </resources>
</model>"##;

        let mesh = parse_3mf_model(xml).unwrap();
        assert_eq!(mesh.palette.colors(), &[Rgb::RED, Rgb::GREEN]);
        assert_eq!(mesh.face_materials, vec![0, 1]);
    }

    #[test]
    fn undefined_material_is_rejected_on_read() {
        let xml = r#"<model>
  <resources>
    <object id="2" type="model">
      <mesh>
        <vertices>
          <vertex x="0" y="0" z="0"/>
          <vertex x="1" y="0" z="0"/>
          <vertex x="0" y="1" z="0"/>
        </vertices>
        <triangles>
          <triangle v1="0" v2="1" v3="2" pid="1" p1="4"/>
        </triangles>
      </mesh>
    </object>
  </resources>
</model>"#;

        assert!(matches!(
            parse_3mf_model(xml),
            Err(IoError::InvalidContent { .. })
        ));
    }

    fn single_triangle_model(vertex: &str, triangle: &str) -> String {
        format!(
            r#"<model>
  <resources>
    <object id="2" type="model">
      <mesh>
        <vertices>
          <vertex x="0" y="0" z="0"/>
          <vertex x="1" y="0" z="0"/>
          {vertex}
        </vertices>
        <triangles>
          {triangle}
        </triangles>
      </mesh>
    </object>
  </resources>
</model>"#
        )
    }

    #[test]
    fn triangle_without_all_corners_is_rejected() {
        let xml = single_triangle_model(
            r#"<vertex x="0" y="1" z="0"/>"#,
            r#"<triangle v1="1" v2="2"/>"#,
        );

        match parse_3mf_model(&xml) {
            Err(IoError::InvalidContent { message }) => assert!(message.contains("v3")),
            other => panic!("expected missing v3, got {other:?}"),
        }
    }

    #[test]
    fn vertex_without_all_coordinates_is_rejected() {
        let xml = single_triangle_model(
            r#"<vertex x="5"/>"#,
            r#"<triangle v1="0" v2="1" v3="2"/>"#,
        );

        match parse_3mf_model(&xml) {
            Err(IoError::InvalidContent { message }) => {
                assert!(message.contains('y'));
                assert!(message.contains('z'));
            }
            other => panic!("expected missing coordinates, got {other:?}"),
        }
    }
}
