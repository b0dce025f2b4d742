//! Bounds-checked reads over model blobs.
//!
//! Header fields, pointers, counts and strip indices are big-endian.
//! Console per-vertex components are little-endian signed 16-bit values,
//! PC vertex data is big-endian IEEE-754.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{Error, Result};

/// Read-only window over a byte buffer.
#[derive(Debug, Clone, Copy)]
pub struct ByteView<'a> {
    data: &'a [u8],
}

impl<'a> ByteView<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Validated sub-slice of `len` bytes starting at `offset`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if the range does not fit the buffer.
    pub fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or(Error::OutOfRange {
                offset,
                len,
                size: self.data.len(),
            })
    }

    pub fn u8(&self, offset: usize) -> Result<u8> {
        Ok(self.slice(offset, 1)?[0])
    }

    pub fn u16_be(&self, offset: usize) -> Result<u16> {
        Ok(BigEndian::read_u16(self.slice(offset, 2)?))
    }

    pub fn u32_be(&self, offset: usize) -> Result<u32> {
        Ok(BigEndian::read_u32(self.slice(offset, 4)?))
    }

    /// `count` consecutive big-endian u16 values starting at `offset`.
    pub fn u16_be_run(&self, offset: usize, count: usize) -> Result<Vec<u16>> {
        let bytes = self.slice(offset, count.saturating_mul(2))?;
        let mut values = vec![0u16; count];
        BigEndian::read_u16_into(bytes, &mut values);
        Ok(values)
    }

    pub fn i16_le(&self, offset: usize) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.slice(offset, 2)?))
    }

    pub fn f32_be(&self, offset: usize) -> Result<f32> {
        Ok(BigEndian::read_f32(self.slice(offset, 4)?))
    }

    /// Big-endian 32-bit field widened to an offset.
    pub fn offset_be(&self, offset: usize) -> Result<usize> {
        self.u32_be(offset).map(|v| v as usize)
    }

    /// Offset of the first occurrence of `needle`, if any.
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() || needle.len() > self.data.len() {
            return None;
        }
        self.data.windows(needle.len()).position(|w| w == needle)
    }
}

/// `base + delta`, reporting overflow as an out-of-range read.
pub(crate) fn checked_offset(base: usize, delta: usize, size: usize) -> Result<usize> {
    base.checked_add(delta).ok_or(Error::OutOfRange {
        offset: base,
        len: delta,
        size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endianness() {
        let data = [0x12, 0x34, 0x56, 0x78];
        let view = ByteView::new(&data);
        assert_eq!(view.u16_be(0).unwrap(), 0x1234);
        assert_eq!(view.u32_be(0).unwrap(), 0x1234_5678);
        assert_eq!(view.i16_le(0).unwrap(), 0x3412);
        assert_eq!(view.u8(3).unwrap(), 0x78);
    }

    #[test]
    fn test_f32_be() {
        let data = 0.25f32.to_be_bytes();
        assert_eq!(ByteView::new(&data).f32_be(0).unwrap(), 0.25);
    }

    #[test]
    fn test_negative_i16_le() {
        let data = (-512i16).to_le_bytes();
        assert_eq!(ByteView::new(&data).i16_le(0).unwrap(), -512);
    }

    #[test]
    fn test_out_of_range() {
        let data = [0u8; 4];
        let view = ByteView::new(&data);
        assert!(matches!(
            view.u32_be(1),
            Err(Error::OutOfRange { offset: 1, len: 4, size: 4 })
        ));
        assert!(matches!(view.slice(usize::MAX, 2), Err(Error::OutOfRange { .. })));
        assert!(view.slice(4, 0).is_ok());
    }

    #[test]
    fn test_u16_be_run() {
        let data = [0xFF, 0x00, 0x12, 0x34, 0x80, 0x08];
        let view = ByteView::new(&data);
        assert_eq!(view.u16_be_run(2, 2).unwrap(), vec![0x1234, 0x8008]);
        assert!(view.u16_be_run(2, 0).unwrap().is_empty());
        assert!(matches!(
            view.u16_be_run(2, 3),
            Err(Error::OutOfRange { offset: 2, len: 6, size: 6 })
        ));
    }

    #[test]
    fn test_empty_view() {
        let view = ByteView::new(&[]);
        assert!(view.is_empty());
        assert_eq!(view.len(), 0);
        assert!(!ByteView::new(&[0]).is_empty());
    }

    #[test]
    fn test_find() {
        let data = [1, 2, 3, 4, 3, 4];
        let view = ByteView::new(&data);
        assert_eq!(view.find(&[3, 4]), Some(2));
        assert_eq!(view.find(&[4, 5]), None);
        assert_eq!(view.find(&[]), None);
    }
}
