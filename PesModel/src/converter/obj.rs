//! Wavefront OBJ/MTL export for decoded meshes.
//!
//! Vertices, UVs and normals share one index space, so every face corner
//! repeats the same index (`f 3/3/3 ...`). Meshes without normals are
//! written as `v/vt` pairs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::formats::model::Mesh;

/// Naming used in the exported files.
#[derive(Debug, Clone)]
pub struct ObjExportOptions {
    /// Object name (`o` statement).
    pub object_name: String,
    /// Material name shared by the OBJ and MTL files.
    pub material_name: String,
    /// Diffuse texture referenced from the MTL file.
    pub texture: Option<String>,
    /// Source file noted in the OBJ header comment.
    pub source: Option<String>,
}

impl Default for ObjExportOptions {
    fn default() -> Self {
        Self {
            object_name: "model".to_string(),
            material_name: "material1".to_string(),
            texture: None,
            source: None,
        }
    }
}

/// Write `mesh` as OBJ text. `mtl_file` is referenced with `mtllib` when given.
pub fn write_obj<W: Write>(
    mesh: &Mesh,
    writer: &mut W,
    options: &ObjExportOptions,
    mtl_file: Option<&str>,
) -> Result<()> {
    writeln!(writer, "# PES/WE model export")?;
    if let Some(source) = &options.source {
        writeln!(writer, "# OBJ Model {source}")?;
    }
    writeln!(writer)?;
    if let Some(mtl_file) = mtl_file {
        writeln!(writer, "mtllib {mtl_file}")?;
        writeln!(writer)?;
    }
    writeln!(writer, "o {}", options.object_name)?;
    writeln!(writer)?;

    writeln!(writer, "# Vertices {}", mesh.vertices().len())?;
    for v in mesh.vertices() {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }
    writeln!(writer)?;

    writeln!(writer, "# UVs {}", mesh.uvs().len())?;
    for vt in mesh.uvs() {
        writeln!(writer, "vt {} {}", vt.u, vt.v)?;
    }
    writeln!(writer)?;

    let normals = mesh.normals().ok();
    if let Some(normals) = normals {
        writeln!(writer, "# Normals {}", normals.len())?;
        for vn in normals {
            writeln!(writer, "vn {} {} {}", vn.x, vn.y, vn.z)?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "usemtl {}", options.material_name)?;
    writeln!(writer)?;
    writeln!(writer, "# Faces {}", mesh.faces().len())?;
    for face in mesh.faces() {
        let [a, b, c] = [face.i1, face.i2, face.i3];
        if normals.is_some() {
            writeln!(writer, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
        } else {
            writeln!(writer, "f {a}/{a} {b}/{b} {c}/{c}")?;
        }
    }

    Ok(())
}

/// Write the MTL file declaring the material.
pub fn write_mtl<W: Write>(writer: &mut W, options: &ObjExportOptions) -> Result<()> {
    writeln!(writer, "newmtl {}", options.material_name)?;
    if let Some(texture) = &options.texture {
        writeln!(writer, "\tmap_Kd {texture}")?;
    }
    Ok(())
}

/// Write `mesh` to `obj_path` and a sibling `.mtl` file. Returns the MTL path.
pub fn export_obj<P: AsRef<Path>>(mesh: &Mesh, obj_path: P, options: &ObjExportOptions) -> Result<PathBuf> {
    let obj_path = obj_path.as_ref();
    let mtl_path = obj_path.with_extension("mtl");
    let mtl_name = mtl_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    let mut obj = BufWriter::new(File::create(obj_path)?);
    write_obj(mesh, &mut obj, options, mtl_name.as_deref())?;
    obj.flush()?;

    let mut mtl = BufWriter::new(File::create(&mtl_path)?);
    write_mtl(&mut mtl, options)?;
    mtl.flush()?;

    tracing::info!("Exported OBJ: {} (+ {})", obj_path.display(), mtl_path.display());
    Ok(mtl_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::model::{PolygonalFace, Vertex, VertexNormal, VertexTexture};
    use pretty_assertions::assert_eq;

    fn triangle(normals: bool) -> Mesh {
        Mesh::new(
            vec![
                Vertex::new(0.0, 0.0, 0.0),
                Vertex::new(1.0, 0.0, 0.0),
                Vertex::new(0.0, 1.5, 0.0),
            ],
            normals.then(|| vec![VertexNormal::new(0.0, 0.0, 1.0); 3]),
            vec![
                VertexTexture { u: 0.0, v: 1.0 },
                VertexTexture { u: 1.0, v: 1.0 },
                VertexTexture { u: 0.0, v: 0.5 },
            ],
            vec![PolygonalFace::new(1, 2, 3)],
        )
    }

    #[test]
    fn test_write_obj_with_normals() {
        let mut out = Vec::new();
        write_obj(&triangle(true), &mut out, &ObjExportOptions::default(), Some("face.mtl")).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("mtllib face.mtl\n"));
        assert!(text.contains("v 0 1.5 0\n"));
        assert!(text.contains("vt 0 0.5\n"));
        assert!(text.contains("# Normals 3\n"));
        assert!(text.contains("usemtl material1\n"));
        assert!(text.trim_end().ends_with("f 1/1/1 2/2/2 3/3/3"));
    }

    #[test]
    fn test_write_obj_without_normals() {
        let mut out = Vec::new();
        write_obj(&triangle(false), &mut out, &ObjExportOptions::default(), None).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(!text.contains("vn "));
        assert!(!text.contains("mtllib"));
        assert!(text.trim_end().ends_with("f 1/1 2/2 3/3"));
    }

    #[test]
    fn test_write_mtl() {
        let options = ObjExportOptions {
            texture: Some("face.png".to_string()),
            ..ObjExportOptions::default()
        };
        let mut out = Vec::new();
        write_mtl(&mut out, &options).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "newmtl material1\n\tmap_Kd face.png\n");
    }
}
