//! PSP model decoder.
//!
//! Same header and piece run as PS2 models, but each piece has a fixed
//! layout:
//!
//! | Offset | Field |
//! |--------|-------|
//! | 0x08   | vertex records pointer (u32) |
//! | 0x0C   | strip pointer (u32), 0 when the piece has no faces |
//! | 0x10   | strip length (u32) |
//! | 0x5C   | vertex count (u16) |
//!
//! Vertex records are 14 bytes: position (3 × i16), normal (2 values, not
//! decoded), UV (2 × i16).

use super::pieces::{Piece, split_pieces};
use super::ps2::{CONSOLE_MAGIC, PS2_UV_SCALE};
use super::strip::strip_to_faces;
use super::types::{Mesh, Vertex, VertexTexture};
use super::{ConsoleHeader, MeshDecoder, PieceGeometry, Platform, check_magic};
use crate::error::Result;

/// Position scale.
pub const PSP_POSITION_SCALE: f32 = 0.00001;

/// UV scale.
pub const PSP_UV_SCALE: f32 = PS2_UV_SCALE;

/// Bytes per vertex record.
pub const PSP_VERTEX_STRIDE: usize = 14;

const VERTEX_POINTER_OFFSET: usize = 8;
const STRIP_POINTER_OFFSET: usize = 12;
const STRIP_LENGTH_OFFSET: usize = 16;
const VERTEX_COUNT_OFFSET: usize = 92;
const NORMAL_OFFSET: usize = 6;
const UV_OFFSET: usize = NORMAL_OFFSET + 4;

/// Decoder for PSP models. Normals are reported as unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct PspDecoder;

impl PspDecoder {
    fn decode_piece(piece: &Piece<'_>, index_offset: u32) -> Result<PieceGeometry> {
        let view = piece.view();
        let vertex_start = view.offset_be(VERTEX_POINTER_OFFSET)?;
        let vertex_count = view.u16_be(VERTEX_COUNT_OFFSET)? as usize;
        let records = view.slice(vertex_start, vertex_count * PSP_VERTEX_STRIDE)?;

        let mut vertices = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);
        for record in records.chunks_exact(PSP_VERTEX_STRIDE) {
            let component = |at: usize| f32::from(i16::from_le_bytes([record[at], record[at + 1]]));
            vertices.push(Vertex::new(
                component(0) * PSP_POSITION_SCALE,
                -component(2) * PSP_POSITION_SCALE,
                component(4) * PSP_POSITION_SCALE,
            ));
            uvs.push(VertexTexture::from_raw(
                component(UV_OFFSET) * PSP_UV_SCALE,
                component(UV_OFFSET + 2) * PSP_UV_SCALE,
            ));
        }

        let strip_at = view.offset_be(STRIP_POINTER_OFFSET)?;
        let faces = if strip_at == 0 {
            tracing::debug!("PSP piece {} has no strip", piece.index);
            Vec::new()
        } else {
            let strip_len = view.offset_be(STRIP_LENGTH_OFFSET)?;
            let strip = view
                .u16_be_run(strip_at, strip_len)?
                .into_iter()
                .map(|entry| u32::from(entry) + index_offset)
                .collect::<Vec<_>>();
            strip_to_faces(&strip)
        };

        Ok(PieceGeometry {
            vertices,
            normals: None,
            uvs,
            faces,
        })
    }
}

impl MeshDecoder for PspDecoder {
    fn platform(&self) -> Platform {
        Platform::Psp
    }

    fn decode(&self, blob: &[u8]) -> Result<Mesh> {
        check_magic(blob, &CONSOLE_MAGIC, Platform::Psp)?;
        let header = ConsoleHeader::read(blob)?;
        let pieces = split_pieces(blob, header.pieces_start, header.pieces_end, header.piece_count)?;

        // Unlike PS2, the running offset starts at 1.
        super::assemble_pieces(Platform::Psp, &pieces, 1, Self::decode_piece)
    }
}
