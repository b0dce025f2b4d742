//! PS2 model decoder.
//!
//! A PS2 model is a header followed by a run of pieces (see
//! [`split_pieces`]). Inside a piece, geometry is stored as a chain of
//! packed blocks whose positions have to be discovered: every block is
//! introduced by a 4-byte code whose third byte is the element count, and a
//! block of 6-byte elements with an odd count is padded by 2 bytes.
//!
//! Strip entries follow a fixed 8-byte marker. Entry values address vertex
//! memory in 4-byte units; the high bit is a flag and is masked off.

use super::options::{MissingMarkerPolicy, Ps2Options};
use super::pieces::{Piece, split_pieces};
use super::strip::strip_to_faces;
use super::types::{Mesh, PolygonalFace, Vertex, VertexNormal, VertexTexture};
use super::{ConsoleHeader, MeshDecoder, PieceGeometry, Platform, check_magic};
use crate::error::{Error, Result};
use crate::utils::ByteView;
use crate::utils::byte_view::checked_offset;

/// Console model signature shared by PS2 and PSP models.
pub const CONSOLE_MAGIC: [u8; 4] = [0x03, 0x00, 0xFF, 0xFF];

/// Vertex and normal scale.
pub const PS2_POSITION_SCALE: f32 = 0.001953;

/// UV scale.
pub const PS2_UV_SCALE: f32 = 0.000244;

const LAYOUT_POINTER_OFFSET: usize = 8;
const LAYOUT_BASE: usize = 96;
const BLOCK_COUNT_OFFSET: usize = 2;
const BLOCK_DATA_OFFSET: usize = 4;
const PARITY_SHIFT: usize = 2;
const VECTOR_SIZE: usize = 6;
const UV_SIZE: usize = 4;
const STRIP_FLAG: u16 = 0x8000;

/// Where a piece keeps its attribute blocks (piece-relative offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceLayout {
    pub vertex_count: usize,
    pub vertex_start: usize,
    pub normal_count: usize,
    pub normal_start: usize,
    pub uv_count: usize,
    pub uv_start: usize,
    /// Extra bytes after each block when the vertex count is odd.
    pub parity_shift: usize,
}

/// Locate the vertex, normal and UV blocks of a piece.
///
/// The vertex block's code sits 96 bytes past the pointer at offset 8. The
/// normal and UV blocks follow, each shifted by 2 bytes when the vertex
/// count is odd.
pub fn discover_piece_layout(piece: &[u8]) -> Result<PieceLayout> {
    let view = ByteView::new(piece);
    let size = view.len();

    let base = checked_offset(view.offset_be(LAYOUT_POINTER_OFFSET)?, LAYOUT_BASE, size)?;
    let vertex_count = view.u8(checked_offset(base, BLOCK_COUNT_OFFSET, size)?)? as usize;
    let vertex_start = checked_offset(base, BLOCK_DATA_OFFSET, size)?;
    let parity_shift = if vertex_count % 2 == 1 { PARITY_SHIFT } else { 0 };

    let next_block = |start: usize, count: usize| -> Result<(usize, usize)> {
        let code = checked_offset(start, count * VECTOR_SIZE + parity_shift, size)?;
        let count = view.u8(checked_offset(code, BLOCK_COUNT_OFFSET, size)?)? as usize;
        Ok((count, checked_offset(code, BLOCK_DATA_OFFSET, size)?))
    };

    let (normal_count, normal_start) = next_block(vertex_start, vertex_count)?;
    let (uv_count, uv_start) = next_block(normal_start, normal_count)?;

    Ok(PieceLayout {
        vertex_count,
        vertex_start,
        normal_count,
        normal_start,
        uv_count,
        uv_start,
        parity_shift,
    })
}

/// Map a raw strip entry to a piece-local vertex index.
pub fn strip_entry_to_local(raw: u16) -> u32 {
    u32::from(if raw >= STRIP_FLAG { raw - STRIP_FLAG } else { raw }) / 4
}

/// Decoder for PS2 models.
#[derive(Debug, Clone, Default)]
pub struct Ps2Decoder {
    options: Ps2Options,
}

impl Ps2Decoder {
    pub fn new(options: Ps2Options) -> Self {
        Self { options }
    }

    /// Raw strip entries of a piece, `None` when the marker is absent.
    fn read_strip(&self, piece: &Piece<'_>) -> Result<Option<Vec<u16>>> {
        let view = piece.view();
        let marker = &self.options.triangle_marker;
        let Some(found) = view.find(marker) else {
            return Ok(None);
        };

        let marker_end = found + marker.len();
        let entries = view.u8(marker_end + BLOCK_COUNT_OFFSET)? as usize * 8 / 2;
        Ok(Some(view.u16_be_run(marker_end + BLOCK_DATA_OFFSET, entries)?))
    }

    fn decode_piece(&self, piece: &Piece<'_>, index_offset: u32) -> Result<PieceGeometry> {
        let layout = discover_piece_layout(piece.bytes)?;
        tracing::debug!("PS2 piece {} layout: {:?}", piece.index, layout);

        if layout.normal_count != layout.vertex_count || layout.uv_count != layout.vertex_count {
            return Err(Error::AttributeCountMismatch {
                piece: piece.index,
                vertices: layout.vertex_count,
                normals: layout.normal_count,
                uvs: layout.uv_count,
            });
        }

        let view = piece.view();
        let read_vector = |start: usize, i: usize| -> Result<[f32; 3]> {
            let pos = start + i * VECTOR_SIZE;
            Ok([
                f32::from(view.i16_le(pos)?) * PS2_POSITION_SCALE,
                -f32::from(view.i16_le(pos + 2)?) * PS2_POSITION_SCALE,
                f32::from(view.i16_le(pos + 4)?) * PS2_POSITION_SCALE,
            ])
        };

        let vertices = (0..layout.vertex_count)
            .map(|i| read_vector(layout.vertex_start, i).map(|[x, y, z]| Vertex::new(x, y, z)))
            .collect::<Result<Vec<_>>>()?;
        let normals = (0..layout.normal_count)
            .map(|i| read_vector(layout.normal_start, i).map(|[x, y, z]| VertexNormal::new(x, y, z)))
            .collect::<Result<Vec<_>>>()?;
        let uvs = (0..layout.uv_count)
            .map(|i| {
                let pos = layout.uv_start + i * UV_SIZE;
                Ok(VertexTexture::from_raw(
                    f32::from(view.i16_le(pos)?) * PS2_UV_SCALE,
                    f32::from(view.i16_le(pos + 2)?) * PS2_UV_SCALE,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        let faces = match self.read_strip(piece)? {
            Some(raw) => {
                let strip = raw
                    .into_iter()
                    .map(|x| strip_entry_to_local(x) + index_offset + 1)
                    .collect::<Vec<_>>();
                strip_to_faces(&strip)
            }
            None => match self.options.missing_marker {
                MissingMarkerPolicy::Fail => {
                    return Err(Error::MarkerNotFound { piece: piece.index });
                }
                MissingMarkerPolicy::Skip => {
                    tracing::warn!("PS2 piece {}: no triangle marker, keeping vertices only", piece.index);
                    Vec::<PolygonalFace>::new()
                }
            },
        };

        Ok(PieceGeometry {
            vertices,
            normals: Some(normals),
            uvs,
            faces,
        })
    }
}

impl MeshDecoder for Ps2Decoder {
    fn platform(&self) -> Platform {
        Platform::Ps2
    }

    fn decode(&self, blob: &[u8]) -> Result<Mesh> {
        check_magic(blob, &CONSOLE_MAGIC, Platform::Ps2)?;
        let header = ConsoleHeader::read(blob)?;
        let pieces = split_pieces(blob, header.pieces_start, header.pieces_end, header.piece_count)?;

        // The running offset starts at 0; strip entries add 1 on top.
        super::assemble_pieces(Platform::Ps2, &pieces, 0, |piece, offset| {
            self.decode_piece(piece, offset)
        })
    }
}
