//! Auto-growing big-endian byte writer.

/// A binary buffer writer.
///
/// All multi-byte integers are written big-endian. The writer owns its
/// buffer; [`Writer::flush`] hands the accumulated bytes to the caller and
/// leaves the writer empty and reusable.
///
/// # Example
///
/// ```
/// use action_pack_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8u16(0xcd, 0x0100);
/// assert_eq!(writer.flush(), vec![0xcd, 0x01, 0x00]);
/// assert!(writer.is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct Writer {
    bytes: Vec<u8>,
}

impl Writer {
    /// Default initial capacity, large enough for a typical order action.
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Discards any bytes written so far, keeping the allocation.
    pub fn reset(&mut self) {
        self.bytes.clear();
    }

    /// Number of bytes written since the last reset/flush.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes written so far, without consuming them.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Takes the written bytes out of the writer. The next write allocates
    /// afresh, sized by what it writes.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.bytes)
    }

    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.bytes.push(val);
    }

    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.bytes.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.bytes.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.bytes.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a one-byte tag followed by a one-byte payload.
    #[inline]
    pub fn u8u8(&mut self, tag: u8, val: u8) {
        self.bytes.extend_from_slice(&[tag, val]);
    }

    /// Writes a one-byte tag followed by a big-endian `u16`.
    #[inline]
    pub fn u8u16(&mut self, tag: u8, val: u16) {
        self.u8(tag);
        self.u16(val);
    }

    /// Writes a one-byte tag followed by a big-endian `u32`.
    #[inline]
    pub fn u8u32(&mut self, tag: u8, val: u32) {
        self.u8(tag);
        self.u32(val);
    }

    /// Writes a one-byte tag followed by a big-endian `u64`.
    #[inline]
    pub fn u8u64(&mut self, tag: u8, val: u64) {
        self.u8(tag);
        self.u64(val);
    }

    /// Appends raw bytes.
    pub fn buf(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Appends the UTF-8 bytes of `s` and returns how many were written.
    pub fn utf8(&mut self, s: &str) -> usize {
        self.bytes.extend_from_slice(s.as_bytes());
        s.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_integers() {
        let mut w = Writer::new();
        w.u16(0x0102);
        w.u32(0x0304_0506);
        w.u64(0x0708_090a_0b0c_0d0e);
        assert_eq!(
            w.flush(),
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14]
        );
    }

    #[test]
    fn test_tagged_writes() {
        let mut w = Writer::new();
        w.u8u8(0xcc, 0xff);
        w.u8u32(0xce, 1);
        w.u8u64(0xcf, u64::MAX);
        assert_eq!(
            w.flush(),
            vec![
                0xcc, 0xff, 0xce, 0, 0, 0, 1, 0xcf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
                0xff
            ]
        );
    }

    #[test]
    fn test_flush_leaves_writer_reusable() {
        let mut w = Writer::with_capacity(4);
        assert_eq!(w.utf8("héllo"), 6);
        assert_eq!(w.len(), 6);
        let first = w.flush();
        assert_eq!(first, "héllo".as_bytes());
        assert!(w.is_empty());
        w.buf(&[9, 9]);
        assert_eq!(w.as_slice(), &[9, 9]);
        w.reset();
        assert!(w.is_empty());
    }

    #[test]
    fn test_flush_does_not_carry_capacity_over() {
        let mut w = Writer::new();
        w.buf(&[0u8; 4096]);
        assert_eq!(w.flush().len(), 4096);
        w.u8(0x80);
        let small = w.flush();
        assert_eq!(small, vec![0x80]);
        assert!(small.capacity() < 4096);
    }
}
