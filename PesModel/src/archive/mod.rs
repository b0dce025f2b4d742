//! Game resource archives.
//!
//! An archive file is a 32-byte header followed by a zlib stream. The
//! inflated blob is a container whose entries include the model; the model
//! is found by its platform signature.

use std::path::Path;

use crate::compression::decompress_zlib;
use crate::error::{Error, Result};
use crate::formats::model::Platform;
use crate::utils::ByteView;

/// Size of the header preceding the zlib stream.
pub const ARCHIVE_HEADER_SIZE: usize = 32;

/// Inflate an archive held in memory.
///
/// # Errors
/// Returns [`Error::ArchiveTooSmall`] if the data is shorter than the header,
/// or [`Error::ZlibDecompressionFailed`] if the payload is corrupt.
pub fn inflate_archive(data: &[u8]) -> Result<Vec<u8>> {
    let payload = data
        .get(ARCHIVE_HEADER_SIZE..)
        .ok_or(Error::ArchiveTooSmall { size: data.len() })?;
    let inflated = decompress_zlib(payload)?;
    tracing::debug!("Inflated archive: {} -> {} bytes", payload.len(), inflated.len());
    Ok(inflated)
}

/// Read and inflate an archive file.
pub fn read_archive<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let data = std::fs::read(path)?;
    inflate_archive(&data)
}

/// The model blob inside an inflated archive: everything from the first
/// occurrence of the platform signature.
///
/// # Errors
/// Returns [`Error::ModelNotFound`] if the signature does not occur.
pub fn locate_model(blob: &[u8], platform: Platform) -> Result<&[u8]> {
    let offset = ByteView::new(blob)
        .find(&platform.magic())
        .ok_or(Error::ModelNotFound { platform })?;
    tracing::debug!("Found {} model at offset {:#x}", platform, offset);
    Ok(&blob[offset..])
}
