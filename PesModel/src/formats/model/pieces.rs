//! Console piece splitting.
//!
//! PS2 and PSP models keep their geometry in a run of pieces. Each piece
//! starts with its own big-endian byte length, the length field included.

use crate::error::{Error, Result};
use crate::utils::ByteView;

/// Size of the length prefix at the start of each piece.
pub const PIECE_LENGTH_SIZE: usize = 4;

/// One piece of a console model.
#[derive(Debug, Clone, Copy)]
pub struct Piece<'a> {
    /// Position in the piece sequence.
    pub index: usize,
    /// Absolute offset of the piece within the model blob.
    pub offset: usize,
    /// Piece bytes, starting with the length field.
    pub bytes: &'a [u8],
}

impl<'a> Piece<'a> {
    pub fn view(&self) -> ByteView<'a> {
        ByteView::new(self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Split `model[start..end]` into `count` length-prefixed pieces, in order.
///
/// # Errors
/// Returns [`Error::OutOfRange`] if the region does not fit the model,
/// [`Error::TruncatedContainer`] if a piece runs past the region and
/// [`Error::InvalidPieceLength`] for a length smaller than its own prefix.
pub fn split_pieces(model: &[u8], start: usize, end: usize, count: usize) -> Result<Vec<Piece<'_>>> {
    let region_len = end.checked_sub(start).ok_or(Error::OutOfRange {
        offset: start,
        len: 0,
        size: end,
    })?;
    let region = ByteView::new(model).slice(start, region_len)?;

    let mut pieces = Vec::with_capacity(count.min(region_len / PIECE_LENGTH_SIZE));
    let mut cursor = 0usize;

    for index in 0..count {
        let available = region_len - cursor;
        let truncated = |needed: usize| Error::TruncatedContainer {
            piece: index,
            offset: cursor,
            needed,
            available,
        };

        let length_field = ByteView::new(region)
            .u32_be(cursor)
            .map_err(|_| truncated(PIECE_LENGTH_SIZE))?;
        if (length_field as usize) < PIECE_LENGTH_SIZE {
            return Err(Error::InvalidPieceLength {
                piece: index,
                length: length_field,
            });
        }

        let length = length_field as usize;
        if length > available {
            return Err(truncated(length));
        }

        pieces.push(Piece {
            index,
            offset: start + cursor,
            bytes: &region[cursor..cursor + length],
        });
        cursor += length;
    }

    tracing::debug!(
        "Split {} pieces from region {start:#x}..{end:#x} ({} bytes unused)",
        pieces.len(),
        region_len - cursor
    );

    Ok(pieces)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece_bytes(length: u32, fill: u8) -> Vec<u8> {
        let mut bytes = length.to_be_bytes().to_vec();
        bytes.resize(length as usize, fill);
        bytes
    }

    #[test]
    fn test_split_round_trip() {
        let mut model = vec![0xEE; 6];
        let region_start = model.len();
        model.extend(piece_bytes(8, 0xA1));
        model.extend(piece_bytes(12, 0xB2));
        model.extend(piece_bytes(4, 0));
        let region_end = model.len();

        let pieces = split_pieces(&model, region_start, region_end, 3).unwrap();
        assert_eq!(pieces.len(), 3);
        assert_eq!(pieces[1].index, 1);
        assert_eq!(pieces[1].offset, region_start + 8);
        assert_eq!(pieces[1].view().u32_be(0).unwrap(), 12);
        assert_eq!(pieces[1].len(), 12);
        assert!(!pieces[2].is_empty());

        let joined: Vec<u8> = pieces.iter().flat_map(|p| p.bytes.iter().copied()).collect();
        assert_eq!(joined, model[region_start..region_end]);
    }

    #[test]
    fn test_empty_piece() {
        let piece = Piece { index: 0, offset: 0, bytes: &[] };
        assert!(piece.is_empty());
        assert_eq!(piece.len(), 0);
    }

    #[test]
    fn test_zero_pieces() {
        assert!(split_pieces(&[], 0, 0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_piece() {
        let model = piece_bytes(16, 1);
        let result = split_pieces(&model, 0, 10, 1);
        assert!(matches!(
            result,
            Err(Error::TruncatedContainer { piece: 0, needed: 16, available: 10, .. })
        ));
    }

    #[test]
    fn test_count_exceeds_data() {
        let model = piece_bytes(8, 1);
        let result = split_pieces(&model, 0, model.len(), 2);
        assert!(matches!(
            result,
            Err(Error::TruncatedContainer { piece: 1, offset: 8, .. })
        ));
    }

    #[test]
    fn test_invalid_length() {
        let model = [0, 0, 0, 2, 0, 0, 0, 0];
        assert!(matches!(
            split_pieces(&model, 0, model.len(), 1),
            Err(Error::InvalidPieceLength { piece: 0, length: 2 })
        ));
    }

    #[test]
    fn test_region_outside_model() {
        let model = piece_bytes(8, 1);
        assert!(matches!(split_pieces(&model, 4, 20, 1), Err(Error::OutOfRange { .. })));
        assert!(matches!(split_pieces(&model, 6, 2, 1), Err(Error::OutOfRange { .. })));
    }
}
