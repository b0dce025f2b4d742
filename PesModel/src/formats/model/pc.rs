//! PC model decoder.
//!
//! Layout (offsets from the model start, big-endian):
//!
//! | Offset | Field |
//! |--------|-------|
//! | 0x00   | magic `20 05 04 20` |
//! | 0x10   | parts pointer; vertex count (u16) at `parts + 8` |
//! | 0x14   | faces pointer; strip length (u16), then u16 strip entries |
//!
//! Vertex records start 8 bytes after the vertex count and are 32 bytes
//! wide: position (3 × f32), normal (3 × f32), UV (2 × f32).

use glam::Vec3;

use super::options::PcOptions;
use super::strip::strip_to_faces;
use super::types::{Mesh, Vertex, VertexNormal, VertexTexture};
use super::{MeshDecoder, Platform, check_magic};
use crate::error::Result;
use crate::utils::ByteView;
use crate::utils::byte_view::checked_offset;

/// PC model signature.
pub const PC_MAGIC: [u8; 4] = [0x20, 0x05, 0x04, 0x20];

/// Bytes per vertex record.
pub const PC_VERTEX_STRIDE: usize = 32;

const PARTS_POINTER_OFFSET: usize = 16;
const FACES_POINTER_OFFSET: usize = 20;
const NORMAL_OFFSET: usize = 12;
const UV_OFFSET: usize = 24;

/// Decoder for PC models.
#[derive(Debug, Clone, Default)]
pub struct PcDecoder {
    options: PcOptions,
}

impl PcDecoder {
    pub fn new(options: PcOptions) -> Self {
        Self { options }
    }

    /// File axes to model axes: X from +8, Y from +4 negated, Z from +0.
    fn read_remapped(view: &ByteView<'_>, pos: usize) -> Result<Vec3> {
        Ok(Vec3::new(
            view.f32_be(pos + 8)?,
            -view.f32_be(pos + 4)?,
            view.f32_be(pos)?,
        ))
    }
}

impl MeshDecoder for PcDecoder {
    fn platform(&self) -> Platform {
        Platform::Pc
    }

    fn decode(&self, blob: &[u8]) -> Result<Mesh> {
        check_magic(blob, &PC_MAGIC, Platform::Pc)?;
        let view = ByteView::new(blob);

        let vertex_count_at = checked_offset(view.offset_be(PARTS_POINTER_OFFSET)?, 8, view.len())?;
        let vertex_count = view.u16_be(vertex_count_at)? as usize;
        let vertex_start = checked_offset(vertex_count_at, 8, view.len())?;

        // Validate the whole record block up front.
        view.slice(vertex_start, vertex_count * PC_VERTEX_STRIDE)?;

        let mut vertices = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);

        for i in 0..vertex_count {
            let pos = vertex_start + i * PC_VERTEX_STRIDE;

            let position = self.options.transform(Self::read_remapped(&view, pos)?);
            vertices.push(Vertex::from(position));

            let normal = Self::read_remapped(&view, pos + NORMAL_OFFSET)?;
            normals.push(VertexNormal::new(normal.x, normal.y, normal.z));

            let uv = pos + UV_OFFSET;
            uvs.push(VertexTexture::from_raw(view.f32_be(uv)?, view.f32_be(uv + 4)?));
        }

        let faces_at = view.offset_be(FACES_POINTER_OFFSET)?;
        let strip_len = view.u16_be(faces_at)? as usize;
        let strip_start = checked_offset(faces_at, 2, view.len())?;
        let strip = view
            .u16_be_run(strip_start, strip_len)?
            .into_iter()
            .map(|entry| u32::from(entry) + 1)
            .collect::<Vec<_>>();
        let faces = strip_to_faces(&strip);

        tracing::debug!(
            "PC model: {} vertices, {} strip entries, {} faces",
            vertex_count,
            strip_len,
            faces.len()
        );

        Ok(Mesh::new(vertices, Some(normals), uvs, faces))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::formats::model::PolygonalFace;
    use pretty_assertions::assert_eq;

    /// Minimal PC model: header, parts block at 0x20, faces block after the vertices.
    fn build_pc_model(records: &[[f32; 8]], strip: &[u16]) -> Vec<u8> {
        let parts = 0x20usize;
        let vertex_start = parts + 16;
        let faces = vertex_start + records.len() * PC_VERTEX_STRIDE;

        let mut data = vec![0u8; faces];
        data[..4].copy_from_slice(&PC_MAGIC);
        data[16..20].copy_from_slice(&(parts as u32).to_be_bytes());
        data[20..24].copy_from_slice(&(faces as u32).to_be_bytes());
        data[parts + 8..parts + 10].copy_from_slice(&(records.len() as u16).to_be_bytes());

        for (i, record) in records.iter().enumerate() {
            let pos = vertex_start + i * PC_VERTEX_STRIDE;
            for (j, value) in record.iter().enumerate() {
                data[pos + j * 4..pos + j * 4 + 4].copy_from_slice(&value.to_be_bytes());
            }
        }

        data.extend((strip.len() as u16).to_be_bytes());
        for index in strip {
            data.extend(index.to_be_bytes());
        }
        data
    }

    #[test]
    fn test_decode_pc() {
        let records = [
            [0.0, 40.0, 80.0, 0.0, 1.0, 0.0, 0.25, 0.75],
            [40.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.5, 0.0],
            [0.0, 0.0, 40.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        ];
        let model = build_pc_model(&records, &[0, 1, 2]);
        let mesh = PcDecoder::default().decode(&model).unwrap();

        assert_eq!(
            mesh.vertices(),
            &[
                Vertex::new(2.0, -1.0, 0.0),
                Vertex::new(0.0, 0.0, 1.0),
                Vertex::new(1.0, 0.0, 0.0),
            ]
        );
        assert_eq!(mesh.normals().unwrap()[0], VertexNormal::new(0.0, -1.0, 0.0));
        assert_eq!(mesh.normals().unwrap()[2], VertexNormal::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.uvs()[0], VertexTexture { u: 0.25, v: 0.25 });
        assert_eq!(mesh.uvs()[1], VertexTexture { u: 0.5, v: 1.0 });
        assert_eq!(mesh.faces(), &[PolygonalFace::new(1, 2, 3)]);
    }

    #[test]
    fn test_strip_indices_become_one_based() {
        let records = [[0.0; 8]; 4];
        let model = build_pc_model(&records, &[0, 1, 2, 3]);
        let mesh = PcDecoder::default().decode(&model).unwrap();
        assert_eq!(
            mesh.faces(),
            &[PolygonalFace::new(1, 2, 3), PolygonalFace::new(3, 2, 4)]
        );
    }

    #[test]
    fn test_bad_magic() {
        let mut model = build_pc_model(&[[0.0; 8]], &[]);
        model[0] = 0x21;
        assert!(matches!(
            PcDecoder::default().decode(&model),
            Err(Error::InvalidFormat { platform: Platform::Pc, .. })
        ));
    }

    #[test]
    fn test_truncated_vertices() {
        let mut model = build_pc_model(&[[1.0; 8], [1.0; 8]], &[]);
        model.truncate(0x20 + 16 + PC_VERTEX_STRIDE);
        assert!(matches!(
            PcDecoder::default().decode(&model),
            Err(Error::OutOfRange { .. })
        ));
    }
}
