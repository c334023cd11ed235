//! Big-endian byte cursor over an in-memory buffer.
//!
//! The WeaveMaker container is fully buffered before parsing, so every reader
//! in this crate works on borrowed slices. `ByteCursor` tracks the absolute
//! file offset of its position, which lets errors raised deep inside a
//! sub-block (the color block, a segment payload) still name the byte offset
//! in the original file.
//!
//! # Example
//!
//! ```
//! use wmdf_core::cursor::ByteCursor;
//!
//! let data = [0x00, 0x2A, b't', 0x04];
//! let mut cursor = ByteCursor::new(&data);
//! assert_eq!(cursor.read_u16_be().unwrap(), 42);
//! assert_eq!(cursor.read_u8().unwrap(), b't');
//! assert_eq!(cursor.read_i8().unwrap(), 4);
//! assert!(cursor.is_eof());
//! ```

use crate::error::{Result, WmdfError};

/// A forward-only reader over a byte slice.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    /// Underlying bytes.
    data: &'a [u8],
    /// Read position within `data`.
    pos: usize,
    /// Absolute file offset of `data[0]`.
    base: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor over a whole file.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_base(data, 0)
    }

    /// Create a cursor over a sub-slice that starts at file offset `base`.
    pub fn with_base(data: &'a [u8], base: usize) -> Self {
        Self { data, pos: 0, base }
    }

    /// Position relative to the start of the slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Absolute file offset of the next byte to be read.
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Check if every byte has been consumed.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Move to a position relative to the start of the slice.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos.min(self.data.len());
    }

    /// Skip `count` bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }

    /// Borrow the next `count` bytes and advance past them.
    pub fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(WmdfError::unexpected_eof(self.offset(), count));
        }
        let data: &'a [u8] = self.data;
        let slice = &data[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    /// Read one unsigned byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read one signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Read a big-endian `u16`.
    pub fn read_u16_be(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    /// Read three big-endian `u16` values (an RGB triple in 16-bit range).
    pub fn read_u16_triple(&mut self) -> Result<[u16; 3]> {
        Ok([self.read_u16_be()?, self.read_u16_be()?, self.read_u16_be()?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_big_endian() {
        let data = [0x12, 0x34, 0xDE, 0xAD];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_u16_be().unwrap(), 0x1234);
        assert_eq!(cursor.read_u16_be().unwrap(), 0xDEAD);
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_signed_byte() {
        let data = [0xFF, 0x7F];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_i8().unwrap(), -1);
        assert_eq!(cursor.read_i8().unwrap(), 127);
    }

    #[test]
    fn test_eof_reports_absolute_offset() {
        let data = [1, 2, 3];
        let mut cursor = ByteCursor::with_base(&data, 100);
        cursor.skip(2).unwrap();
        let err = cursor.read_u16_be().unwrap_err();
        match err {
            WmdfError::UnexpectedEof { offset, expected } => {
                assert_eq!(offset, 102);
                assert_eq!(expected, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        // A failed read does not advance.
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_triple_and_seek() {
        let data = [0xFF, 0xFF, 0x80, 0x00, 0x00, 0x00, b'x'];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_u16_triple().unwrap(), [0xFFFF, 0x8000, 0]);
        assert_eq!(cursor.remaining(), 1);
        cursor.seek(0);
        assert_eq!(cursor.offset(), 0);
    }
}
