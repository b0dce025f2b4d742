//! Compression utilities

use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::error::{Error, Result};

/// Decompress a zlib stream.
///
/// # Errors
/// Returns [`Error::ZlibDecompressionFailed`] if the stream is corrupt.
pub fn decompress_zlib(compressed: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(compressed);
    let mut decompressed = Vec::with_capacity(compressed.len().saturating_mul(4));

    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| Error::ZlibDecompressionFailed { message: e.to_string() })?;

    Ok(decompressed)
}
