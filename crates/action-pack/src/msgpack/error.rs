//! MessagePack decoder error type.

use action_pack_buffers::BufferError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MsgPackError {
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEof(usize),
    #[error("invalid UTF-8 in string at offset {0}")]
    InvalidUtf8(usize),
    #[error("unsupported MessagePack byte 0x{marker:02x} at offset {offset}")]
    UnsupportedMarker { marker: u8, offset: usize },
    #[error("map key at offset {0} is not a string")]
    NonStringKey(usize),
    #[error("non-minimal header 0x{marker:02x} at offset {offset}")]
    NonCanonical { marker: u8, offset: usize },
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
}

impl MsgPackError {
    /// Maps a buffer failure at `offset` to the decoder's error space.
    pub(crate) fn from_buffer(err: BufferError, offset: usize) -> Self {
        match err {
            BufferError::EndOfBuffer { .. } => MsgPackError::UnexpectedEof(offset),
            BufferError::InvalidUtf8 => MsgPackError::InvalidUtf8(offset),
        }
    }
}
