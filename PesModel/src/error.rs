//! Error types for `PesModel`

use thiserror::Error;

use crate::formats::model::Platform;

/// The error type for `PesModel` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Model Format Errors ====================
    /// The blob does not start with the platform's model signature.
    #[error("invalid {platform} model magic: found {found:02X?}")]
    InvalidFormat {
        /// The platform the blob was decoded as.
        platform: Platform,
        /// The first bytes of the blob.
        found: Vec<u8>,
    },

    /// A computed offset or length runs past the end of the buffer.
    #[error("read of {len} bytes at offset {offset} exceeds buffer of {size} bytes")]
    OutOfRange {
        /// Offset of the attempted read.
        offset: usize,
        /// Length of the attempted read.
        len: usize,
        /// Size of the buffer.
        size: usize,
    },

    /// The console piece region ends before the declared pieces do.
    #[error("piece {piece} truncated: needs {needed} bytes at region offset {offset}, {available} available")]
    TruncatedContainer {
        /// Index of the piece being split off.
        piece: usize,
        /// Offset of the piece within the piece region.
        offset: usize,
        /// Bytes required by the read.
        needed: usize,
        /// Bytes left in the region.
        available: usize,
    },

    /// A piece declares a length too small to hold its own length field.
    #[error("piece {piece} declares invalid length {length}")]
    InvalidPieceLength {
        /// Index of the piece.
        piece: usize,
        /// The declared length.
        length: u32,
    },

    /// The PS2 triangle marker was not found in a piece.
    #[error("triangle marker not found in piece {piece}")]
    MarkerNotFound {
        /// Index of the piece.
        piece: usize,
    },

    /// Discovered PS2 attribute counts do not line up with the vertex count.
    #[error("piece {piece}: {vertices} vertices but {normals} normals and {uvs} UVs")]
    AttributeCountMismatch {
        /// Index of the piece.
        piece: usize,
        /// Discovered vertex count.
        vertices: usize,
        /// Discovered normal count.
        normals: usize,
        /// Discovered UV count.
        uvs: usize,
    },

    /// The decoder declines to interpret data it cannot validate.
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),

    // ==================== Archive Errors ====================
    /// The archive is shorter than its fixed header.
    #[error("archive too small: {size} bytes")]
    ArchiveTooSmall {
        /// Size of the archive in bytes.
        size: usize,
    },

    /// No model with the platform's signature was found in the archive.
    #[error("no {platform} model found in archive")]
    ModelNotFound {
        /// The platform searched for.
        platform: Platform,
    },

    /// Zlib decompression failed.
    #[error("Zlib decompression failed: {message}")]
    ZlibDecompressionFailed {
        /// The error message.
        message: String,
    },

    // ==================== Parsing Errors ====================
    /// Decoder options file could not be parsed.
    #[error("invalid decoder options: {0}")]
    Config(#[from] toml::de::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for `PesModel` operations.
pub type Result<T> = std::result::Result<T, Error>;
