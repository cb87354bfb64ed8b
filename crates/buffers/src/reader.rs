use std::str;

use crate::BufferError;

/// Cursor over a borrowed byte slice.
///
/// Reads are big-endian. A read that would run past the end fails with
/// [`BufferError::EndOfBuffer`] and leaves the cursor where it was.
///
/// ```
/// use action_pack_buffers::{BufferError, Reader};
///
/// let mut reader = Reader::new(&[0xcd, 0x01, 0x2c]);
/// assert_eq!(reader.u8(), Ok(0xcd));
/// assert_eq!(reader.u16(), Ok(300));
/// assert_eq!(reader.u8(), Err(BufferError::EndOfBuffer { needed: 1, remaining: 0 }));
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn peek(&self) -> Result<u8, BufferError> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or(BufferError::EndOfBuffer {
                needed: 1,
                remaining: 0,
            })
    }

    pub fn skip(&mut self, len: usize) -> Result<(), BufferError> {
        self.take(len).map(drop)
    }

    /// Borrows the next `len` bytes.
    pub fn buf(&mut self, len: usize) -> Result<&'a [u8], BufferError> {
        self.take(len)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], BufferError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(BufferError::EndOfBuffer {
                needed: len,
                remaining,
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn fixed<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn u8(&mut self) -> Result<u8, BufferError> {
        self.fixed::<1>().map(|[byte]| byte)
    }

    pub fn u16(&mut self) -> Result<u16, BufferError> {
        self.fixed().map(u16::from_be_bytes)
    }

    pub fn u32(&mut self) -> Result<u32, BufferError> {
        self.fixed().map(u32::from_be_bytes)
    }

    pub fn u64(&mut self) -> Result<u64, BufferError> {
        self.fixed().map(u64::from_be_bytes)
    }

    /// Borrows the next `len` bytes as UTF-8 text.
    pub fn utf8(&mut self, len: usize) -> Result<&'a str, BufferError> {
        let start = self.pos;
        let bytes = self.take(len)?;
        str::from_utf8(bytes).map_err(|_| {
            self.pos = start;
            BufferError::InvalidUtf8
        })
    }
}
