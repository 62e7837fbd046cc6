//! Binary buffer writer with auto-growing capacity.

/// Appends big-endian values to a growable byte buffer.
///
/// # Example
///
/// ```
/// use partition_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u32(2);
/// writer.buf(b"ou");
/// assert_eq!(writer.flush(), [0, 0, 0, 2, b'o', b'u']);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Writer {
    /// The underlying byte buffer.
    pub uint8: Vec<u8>,
    /// Position where the last flush happened.
    pub x0: usize,
}

impl Writer {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
            x0: 0,
        }
    }

    /// Current cursor position.
    pub fn x(&self) -> usize {
        self.uint8.len()
    }

    /// Returns everything written since the previous flush.
    pub fn flush(&mut self) -> Vec<u8> {
        let result = self.uint8[self.x0..].to_vec();
        self.x0 = self.uint8.len();
        result
    }

    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a byte slice verbatim.
    pub fn buf(&mut self, buf: &[u8]) {
        self.uint8.extend_from_slice(buf);
    }

    /// Writes a UTF-8 string. Returns the number of bytes written.
    pub fn utf8(&mut self, s: &str) -> usize {
        self.uint8.extend_from_slice(s.as_bytes());
        s.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_returns_only_new_bytes() {
        let mut writer = Writer::new();
        writer.u32(1);
        assert_eq!(writer.flush(), [0, 0, 0, 1]);
        writer.i32(-1);
        assert_eq!(writer.flush(), [0xff, 0xff, 0xff, 0xff]);
        assert!(writer.flush().is_empty());
    }
}
