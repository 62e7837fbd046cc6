//! Bounds-checked binary reader with cursor tracking.

use std::str;

use crate::BufferError;

/// Reads big-endian values from a byte slice.
///
/// Every read checks the remaining length first and leaves the cursor
/// untouched when it fails.
///
/// # Example
///
/// ```
/// use partition_buffers::Reader;
///
/// let data = [0, 0, 0, 2, b'o', b'u'];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.try_u32().unwrap(), 2);
/// assert_eq!(reader.try_utf8(2).unwrap(), "ou");
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Number of bytes left to read.
    pub fn size(&self) -> usize {
        self.end - self.x
    }

    pub fn is_empty(&self) -> bool {
        self.x >= self.end
    }

    #[inline]
    fn check(&self, n: usize) -> Result<(), BufferError> {
        if n > self.size() {
            Err(BufferError::EndOfBuffer)
        } else {
            Ok(())
        }
    }

    #[inline]
    fn array<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        self.check(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.uint8[self.x..self.x + N]);
        self.x += N;
        Ok(out)
    }

    #[inline]
    pub fn try_u32(&mut self) -> Result<u32, BufferError> {
        self.array::<4>().map(u32::from_be_bytes)
    }

    #[inline]
    pub fn try_i32(&mut self) -> Result<i32, BufferError> {
        self.array::<4>().map(i32::from_be_bytes)
    }

    #[inline]
    pub fn try_u64(&mut self) -> Result<u64, BufferError> {
        self.array::<8>().map(u64::from_be_bytes)
    }

    #[inline]
    pub fn try_i64(&mut self) -> Result<i64, BufferError> {
        self.array::<8>().map(i64::from_be_bytes)
    }

    /// Returns the next `size` bytes and advances past them.
    pub fn try_buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        let start = self.x;
        self.x += size;
        Ok(&self.uint8[start..self.x])
    }

    /// Reads a UTF-8 string of `size` bytes.
    ///
    /// The cursor does not move when the bytes are not valid UTF-8.
    pub fn try_utf8(&mut self, size: usize) -> Result<&'a str, BufferError> {
        self.check(size)?;
        let bytes = &self.uint8[self.x..self.x + size];
        let s = str::from_utf8(bytes).map_err(|_| BufferError::InvalidUtf8)?;
        self.x += size;
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian_integers() {
        let data = [0, 0, 0, 5, 0xff, 0xff, 0xff, 0xfe, 0, 0, 0, 0, 0, 0, 1, 0];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u32(), Ok(5));
        assert_eq!(reader.try_i32(), Ok(-2));
        assert_eq!(reader.try_u64(), Ok(256));
        assert!(reader.is_empty());
    }

    #[test]
    fn failed_read_keeps_cursor() {
        let data = [1, 2, 3];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u32(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
        assert_eq!(reader.try_buf(4), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.try_buf(2), Ok(&[1u8, 2][..]));
        assert_eq!(reader.size(), 1);
        assert_eq!(reader.try_buf(1), Ok(&[3u8][..]));
    }

    #[test]
    fn rejects_invalid_utf8() {
        let data = [0xc3, 0x28];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_utf8(2), Err(BufferError::InvalidUtf8));
        assert_eq!(reader.x, 0);
    }
}
