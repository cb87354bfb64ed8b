//! Byte-level plumbing shared by the action-pack encoder, decoder and
//! conformance checks.
//!
//! [`Writer`] appends big-endian integers and text to a growable buffer,
//! [`Reader`] walks a borrowed slice with bounds checks, and
//! [`first_difference`] plus [`print_window`] explain where two encodings
//! stop agreeing.
//!
//! ```
//! use action_pack_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8u8(0xd9, 5);
//! writer.utf8("order");
//! let bytes = writer.flush();
//!
//! let mut reader = Reader::new(&bytes);
//! assert_eq!(reader.u8(), Ok(0xd9));
//! assert_eq!(reader.u8(), Ok(5));
//! assert_eq!(reader.utf8(5), Ok("order"));
//! ```

mod diff;
mod reader;
mod writer;

use std::fmt;

pub use diff::{first_difference, print_window};
pub use reader::Reader;
pub use writer::Writer;

/// Why a [`Reader`] could not satisfy a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    EndOfBuffer { needed: usize, remaining: usize },
    InvalidUtf8,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndOfBuffer { needed, remaining } => write!(
                f,
                "end of buffer: needed {needed} bytes, {remaining} remaining"
            ),
            Self::InvalidUtf8 => f.write_str("invalid UTF-8 sequence"),
        }
    }
}

impl std::error::Error for BufferError {}
