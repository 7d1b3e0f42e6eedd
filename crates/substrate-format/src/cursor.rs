//! Sequential big-endian reader over a byte buffer.
//!
//! Every decoder in this crate threads a single [`ByteCursor`] through its
//! fields. Reads either consume exactly the width of the requested primitive
//! or fail with [`DecodeError::UnexpectedEndOfData`] without moving the cursor.

use crate::error::{DecodeError, Result};

/// Read cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether every byte has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Unread tail of the buffer.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Consume `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(DecodeError::UnexpectedEndOfData {
                offset: self.pos,
                needed: len,
                remaining: self.remaining(),
            })?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Look at the next byte without consuming it.
    #[must_use]
    pub fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    /// Read a one-byte boolean; any nonzero byte is `true`.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.take_array().map(i16::from_be_bytes)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.take_array().map(i32::from_be_bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.take_array().map(u32::from_be_bytes)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.take_array().map(f32::from_be_bytes)
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        self.take_array().map(f64::from_be_bytes)
    }

    /// Read `count` consecutive values with the same reader.
    pub fn read_many<T>(
        &mut self,
        count: usize,
        mut read: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut values = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            values.push(read(self)?);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_big_endian_primitives() {
        let mut data = Vec::new();
        data.push(0x02);
        data.extend_from_slice(&(-2i16).to_be_bytes());
        data.extend_from_slice(&95i32.to_be_bytes());
        data.extend_from_slice(&1.5f32.to_be_bytes());
        data.extend_from_slice(&(-0.25f64).to_be_bytes());

        let mut cursor = ByteCursor::new(&data);
        assert!(cursor.read_bool().unwrap());
        assert_eq!(cursor.read_i16().unwrap(), -2);
        assert_eq!(cursor.read_i32().unwrap(), 95);
        assert_eq!(cursor.read_f32().unwrap(), 1.5);
        assert_eq!(cursor.read_f64().unwrap(), -0.25);
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.position(), 19);
    }

    #[test]
    fn test_zero_byte_is_false() {
        let mut cursor = ByteCursor::new(&[0x00, 0xFF]);
        assert!(!cursor.read_bool().unwrap());
        assert!(cursor.read_bool().unwrap());
    }

    #[test]
    fn test_short_read_does_not_advance() {
        let mut cursor = ByteCursor::new(&[0, 0, 0, 1, 0xAA, 0xBB]);
        assert_eq!(cursor.read_i32().unwrap(), 1);
        let err = cursor.read_i32().unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnexpectedEndOfData {
                offset: 4,
                needed: 4,
                remaining: 2
            }
        ));
        assert_eq!(cursor.position(), 4);
        assert_eq!(cursor.rest(), &[0xAA, 0xBB]);
    }

    #[test]
    fn test_read_many() {
        let data = [0, 1, 0, 2, 0, 3];
        let mut cursor = ByteCursor::new(&data);
        let values = cursor.read_many(3, ByteCursor::read_i16).unwrap();
        assert_eq!(values, vec![1, 2, 3]);
        assert!(cursor.read_many(1, ByteCursor::read_i16).is_err());
    }

    #[test]
    fn test_take_overflowing_length() {
        let mut cursor = ByteCursor::new(&[1, 2, 3]);
        assert!(cursor.take(usize::MAX).is_err());
        assert_eq!(cursor.take(2).unwrap(), &[1, 2]);
        assert_eq!(cursor.peek_u8(), Some(3));
    }
}
