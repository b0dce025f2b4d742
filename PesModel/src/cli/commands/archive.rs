//! Archive CLI commands

use std::path::Path;

use crate::archive::inflate_archive;

/// Inflate an archive and write the raw payload.
pub fn decompress(path: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let output_path = if let Some(out) = output {
        out.to_path_buf()
    } else {
        let stem = path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        path.with_file_name(format!("{stem}_decompressed.bin"))
    };

    println!("Decompressing archive...");
    println!("  Source:      {}", path.display());
    println!("  Destination: {}", output_path.display());

    let data = std::fs::read(path)?;
    let inflated = inflate_archive(&data)?;
    std::fs::write(&output_path, &inflated)?;

    println!();
    println!("Decompression complete!");
    println!("  Original size:     {} bytes", data.len());
    println!("  Decompressed size: {} bytes", inflated.len());

    Ok(())
}
