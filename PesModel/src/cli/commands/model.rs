//! Model CLI commands
//!
//! Commands for inspecting and converting PES/WE models.

use std::path::Path;

use super::ModelSource;
use crate::archive::{locate_model, read_archive};
use crate::converter::{ObjExportOptions, export_obj};
use crate::formats::model::{ConsoleHeader, DecodeOptions, decode_model};

/// Read the model blob described by `source`, unpacking the archive if asked.
fn load_blob(source: &ModelSource) -> anyhow::Result<Vec<u8>> {
    if source.archive {
        let inflated = read_archive(&source.path)?;
        Ok(locate_model(&inflated, source.platform)?.to_vec())
    } else {
        Ok(std::fs::read(&source.path)?)
    }
}

fn load_options(source: &ModelSource) -> anyhow::Result<DecodeOptions> {
    Ok(match &source.config {
        Some(config) => DecodeOptions::load(config)?,
        None => DecodeOptions::default(),
    })
}

/// Decode a model and display a summary (or the whole mesh as JSON).
pub fn inspect(source: &ModelSource, json: bool) -> anyhow::Result<()> {
    let blob = load_blob(source)?;
    let mesh = decode_model(source.platform, &blob, &load_options(source)?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&mesh)?);
        return Ok(());
    }

    println!("Model: {}", source.path.display());
    println!();
    println!("Model Information");
    println!("=================");
    println!("Platform:    {}", source.platform);
    if source.platform.is_piece_based() {
        println!("Pieces:      {}", ConsoleHeader::read(&blob)?.piece_count);
    }
    println!("Vertices:    {}", mesh.vertex_count());
    println!("UVs:         {}", mesh.uvs().len());
    println!(
        "Normals:     {}",
        if mesh.has_normals() { "yes" } else { "not available" }
    );
    println!("Faces:       {}", mesh.face_count());

    if let Some(bounds) = mesh.bounds() {
        let size = bounds.size();
        println!();
        println!("Bounds:");
        println!("  Min:  ({:.4}, {:.4}, {:.4})", bounds.min.x, bounds.min.y, bounds.min.z);
        println!("  Max:  ({:.4}, {:.4}, {:.4})", bounds.max.x, bounds.max.y, bounds.max.z);
        println!("  Size: ({:.4}, {:.4}, {:.4})", size.x, size.y, size.z);
    }

    Ok(())
}

/// Decode a model and export it to OBJ + MTL.
pub fn convert(
    source: &ModelSource,
    destination: &Path,
    texture: Option<&str>,
    object: Option<&str>,
) -> anyhow::Result<()> {
    println!("Converting {} model to OBJ...", source.platform);
    println!("  Source:      {}", source.path.display());
    println!("  Destination: {}", destination.display());

    let blob = load_blob(source)?;
    let mesh = decode_model(source.platform, &blob, &load_options(source)?)?;

    let object_name = object
        .map(str::to_string)
        .or_else(|| {
            destination
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "model".to_string());
    let options = ObjExportOptions {
        object_name,
        texture: texture.map(str::to_string),
        source: source
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
        ..ObjExportOptions::default()
    };
    let mtl_path = export_obj(&mesh, destination, &options)?;

    println!();
    println!("Conversion complete!");
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Faces:    {}", mesh.face_count());
    println!("  Material: {}", mtl_path.display());

    Ok(())
}
