//! PES/WE model decoding for PC, PS2 and PSP.
//!
//! Each platform stores a model differently; all of them decode to the same
//! [`Mesh`]. Pick a decoder with an explicit [`Platform`] tag:
//!
//! ```no_run
//! use pesmodel::formats::model::{decode_model, DecodeOptions, Platform};
//!
//! let blob = std::fs::read("face.model")?;
//! let mesh = decode_model(Platform::Ps2, &blob, &DecodeOptions::default())?;
//! println!("{} vertices, {} faces", mesh.vertex_count(), mesh.face_count());
//! # Ok::<(), pesmodel::Error>(())
//! ```

pub mod options;
pub mod pc;
pub mod pieces;
pub mod ps2;
pub mod psp;
pub mod strip;
pub mod types;

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::utils::ByteView;

pub use options::{DecodeOptions, MissingMarkerPolicy, PcOptions, Ps2Options, UniformCorrection};
pub use pc::{PC_MAGIC, PcDecoder};
pub use pieces::{Piece, split_pieces};
pub use ps2::{CONSOLE_MAGIC, PieceLayout, Ps2Decoder, discover_piece_layout};
pub use psp::PspDecoder;
pub use strip::strip_to_faces;
pub use types::{Bounds, Mesh, PolygonalFace, Vertex, VertexNormal, VertexTexture};

/// Target platform of a model blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Pc,
    Ps2,
    Psp,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Pc, Platform::Ps2, Platform::Psp];

    /// The 4-byte signature a model of this platform starts with.
    pub fn magic(self) -> [u8; 4] {
        match self {
            Platform::Pc => PC_MAGIC,
            Platform::Ps2 | Platform::Psp => CONSOLE_MAGIC,
        }
    }

    /// Whether decoded meshes carry normals.
    pub fn decodes_normals(self) -> bool {
        !matches!(self, Platform::Psp)
    }

    /// Whether the model is split into pieces.
    pub fn is_piece_based(self) -> bool {
        !matches!(self, Platform::Pc)
    }

    /// Build the decoder for this platform.
    pub fn decoder(self, options: &DecodeOptions) -> Box<dyn MeshDecoder> {
        match self {
            Platform::Pc => Box::new(PcDecoder::new(options.pc.clone())),
            Platform::Ps2 => Box::new(Ps2Decoder::new(options.ps2.clone())),
            Platform::Psp => Box::new(PspDecoder),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::Pc => "PC",
            Platform::Ps2 => "PS2",
            Platform::Psp => "PSP",
        })
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pc" | "win" | "windows" => Ok(Platform::Pc),
            "ps2" | "playstation2" => Ok(Platform::Ps2),
            "psp" => Ok(Platform::Psp),
            _ => Err(format!("Invalid platform '{s}'. Valid values: pc, ps2, psp")),
        }
    }
}

/// Decodes one model blob into a [`Mesh`].
pub trait MeshDecoder: Send + Sync {
    fn platform(&self) -> Platform;

    /// Decode a whole model blob.
    ///
    /// # Errors
    /// Fails on a signature mismatch or any out-of-bounds structure; no
    /// partial mesh is returned.
    fn decode(&self, blob: &[u8]) -> Result<Mesh>;
}

/// Decode `blob` as a model of `platform`.
///
/// # Errors
/// See [`MeshDecoder::decode`].
pub fn decode_model(platform: Platform, blob: &[u8], options: &DecodeOptions) -> Result<Mesh> {
    let mesh = platform.decoder(options).decode(blob)?;
    tracing::info!(
        "Decoded {} model: {} vertices, {} faces",
        platform,
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}

pub(crate) fn check_magic(blob: &[u8], magic: &[u8; 4], platform: Platform) -> Result<()> {
    if blob.starts_with(magic) {
        Ok(())
    } else {
        Err(Error::InvalidFormat {
            platform,
            found: blob.iter().take(magic.len()).copied().collect(),
        })
    }
}

/// Piece table fields of a console model header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleHeader {
    pub piece_count: usize,
    pub pieces_start: usize,
    pub pieces_end: usize,
}

impl ConsoleHeader {
    pub fn read(blob: &[u8]) -> Result<Self> {
        let view = ByteView::new(blob);
        Ok(Self {
            piece_count: view.offset_be(32)?,
            pieces_start: view.offset_be(36)?,
            pieces_end: view.offset_be(44)?,
        })
    }
}

/// Geometry decoded from one console piece, indices already global.
#[derive(Debug, Clone, Default)]
pub(crate) struct PieceGeometry {
    pub vertices: Vec<Vertex>,
    pub normals: Option<Vec<VertexNormal>>,
    pub uvs: Vec<VertexTexture>,
    pub faces: Vec<PolygonalFace>,
}

/// Mesh under construction plus the index offset for the next piece.
struct MeshAccumulator {
    vertices: Vec<Vertex>,
    normals: Option<Vec<VertexNormal>>,
    uvs: Vec<VertexTexture>,
    faces: Vec<PolygonalFace>,
    next_index: u32,
}

impl MeshAccumulator {
    fn push(mut self, piece: PieceGeometry) -> Self {
        self.next_index += piece.vertices.len() as u32;
        self.normals = match (self.normals, piece.normals) {
            (Some(mut all), Some(normals)) => {
                all.extend(normals);
                Some(all)
            }
            _ => None,
        };
        self.vertices.extend(piece.vertices);
        self.uvs.extend(piece.uvs);
        self.faces.extend(piece.faces);
        self
    }
}

/// Decode pieces in order, threading the running vertex index offset
/// (starting at `first_index`) from each piece into the next.
pub(crate) fn assemble_pieces<'a, F>(
    platform: Platform,
    pieces: &[Piece<'a>],
    first_index: u32,
    mut decode_piece: F,
) -> Result<Mesh>
where
    F: FnMut(&Piece<'a>, u32) -> Result<PieceGeometry>,
{
    let init = MeshAccumulator {
        vertices: Vec::new(),
        normals: platform.decodes_normals().then(Vec::new),
        uvs: Vec::new(),
        faces: Vec::new(),
        next_index: first_index,
    };

    let mesh = pieces.iter().try_fold(init, |acc, piece| {
        let geometry = decode_piece(piece, acc.next_index)?;
        tracing::debug!(
            "{} piece {} ({} bytes): {} vertices, {} faces, index offset {}",
            platform,
            piece.index,
            piece.len(),
            geometry.vertices.len(),
            geometry.faces.len(),
            acc.next_index
        );
        Ok::<_, Error>(acc.push(geometry))
    })?;

    Ok(Mesh::new(mesh.vertices, mesh.normals, mesh.uvs, mesh.faces))
}
