//! Structural MessagePack decoder.
//!
//! The inverse of [`MsgPackEncoder`](super::MsgPackEncoder) over the subset of
//! MessagePack the canonical encoder emits. Production signing never decodes;
//! this exists for round-trip tests and for taking apart bytes produced by a
//! foreign implementation when the conformance harness reports a divergence.

use action_pack_buffers::Reader;

use super::MsgPackError;
use crate::constants::*;
use crate::value::{Fields, Value};

/// Maximum container nesting accepted before giving up.
pub const MAX_DEPTH: usize = 64;

/// MessagePack decoder producing [`Value`]s.
///
/// Strings decode to [`Value::Text`]; the wire does not record whether a
/// string was a decimal quantity. In strict mode every header must be the
/// narrowest one for its payload, which is how non-canonical output from
/// another encoder (a `str16` where `str8` fits, an 8-byte integer holding
/// a small value) is caught.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackDecoder {
    strict: bool,
}

impl MsgPackDecoder {
    /// Lenient decoder: accepts any header width.
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Strict decoder: rejects non-minimal headers.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Decodes exactly one value; trailing bytes are an error.
    pub fn decode(&self, data: &[u8]) -> Result<Value, MsgPackError> {
        let (value, consumed) = self.decode_with_consumed(data)?;
        if consumed != data.len() {
            return Err(MsgPackError::TrailingBytes(data.len() - consumed));
        }
        Ok(value)
    }

    /// Decodes one value from the front of `data` and reports its length.
    pub fn decode_with_consumed(&self, data: &[u8]) -> Result<(Value, usize), MsgPackError> {
        let mut reader = Reader::new(data);
        let value = self.read_any(&mut reader, 0)?;
        Ok((value, reader.position()))
    }

    fn read_any(&self, r: &mut Reader<'_>, depth: usize) -> Result<Value, MsgPackError> {
        if depth > MAX_DEPTH {
            return Err(MsgPackError::TooDeep(MAX_DEPTH));
        }
        let offset = r.position();
        let marker = r.u8().map_err(|e| MsgPackError::from_buffer(e, offset))?;
        match marker {
            0x00..=0x7f => Ok(Value::UInt(u64::from(marker))),
            0x80..=0x8f => self.read_fields(r, usize::from(marker & 0x0f), depth),
            0x90..=0x9f => self.read_sequence(r, usize::from(marker & 0x0f), depth),
            0xa0..=0xbf => read_str(r, usize::from(marker & 0x1f)),
            FALSE => Ok(Value::Bool(false)),
            TRUE => Ok(Value::Bool(true)),
            UINT8 | UINT16 | UINT32 | UINT64 => {
                let uint = read_uint(r, marker)?;
                self.check_minimal(marker, offset, uint, uint_floor(marker))?;
                Ok(Value::UInt(uint))
            }
            STR8 | STR16 | STR32 => {
                let len = read_len(r, marker)?;
                self.check_minimal(marker, offset, len as u64, len_floor(marker))?;
                read_str(r, len)
            }
            ARRAY16 | ARRAY32 => {
                let len = read_len(r, marker)?;
                self.check_minimal(marker, offset, len as u64, len_floor(marker))?;
                self.read_sequence(r, len, depth)
            }
            MAP16 | MAP32 => {
                let len = read_len(r, marker)?;
                self.check_minimal(marker, offset, len as u64, len_floor(marker))?;
                self.read_fields(r, len, depth)
            }
            _ => Err(MsgPackError::UnsupportedMarker { marker, offset }),
        }
    }

    fn read_sequence(
        &self,
        r: &mut Reader<'_>,
        len: usize,
        depth: usize,
    ) -> Result<Value, MsgPackError> {
        // Every element takes at least one byte.
        let mut items = Vec::with_capacity(len.min(r.remaining()));
        for _ in 0..len {
            items.push(self.read_any(r, depth + 1)?);
        }
        Ok(Value::Sequence(items))
    }

    fn read_fields(
        &self,
        r: &mut Reader<'_>,
        len: usize,
        depth: usize,
    ) -> Result<Value, MsgPackError> {
        let mut fields = Fields::with_capacity(len.min(r.remaining() / 2));
        for _ in 0..len {
            let key_offset = r.position();
            let key = match self.read_any(r, depth + 1)? {
                Value::Text(key) => key,
                _ => return Err(MsgPackError::NonStringKey(key_offset)),
            };
            let value = self.read_any(r, depth + 1)?;
            fields.push(key, value);
        }
        Ok(Value::Fields(fields))
    }

    fn check_minimal(
        &self,
        marker: u8,
        offset: usize,
        payload: u64,
        floor: u64,
    ) -> Result<(), MsgPackError> {
        if self.strict && payload < floor {
            return Err(MsgPackError::NonCanonical { marker, offset });
        }
        Ok(())
    }
}

/// Smallest value that legitimately needs this integer marker.
fn uint_floor(marker: u8) -> u64 {
    match marker {
        UINT8 => POSITIVE_FIXINT_MAX + 1,
        UINT16 => 0x100,
        UINT32 => 0x1_0000,
        _ => 0x1_0000_0000,
    }
}

/// Smallest length that legitimately needs this string/collection marker.
fn len_floor(marker: u8) -> u64 {
    match marker {
        STR8 => FIXSTR_MAX as u64 + 1,
        STR16 => 0x100,
        ARRAY16 | MAP16 => FIXCOLLECTION_MAX as u64 + 1,
        _ => 0x1_0000,
    }
}

fn read_uint(r: &mut Reader<'_>, marker: u8) -> Result<u64, MsgPackError> {
    let offset = r.position();
    let uint = match marker {
        UINT8 => r.u8().map(u64::from),
        UINT16 => r.u16().map(u64::from),
        UINT32 => r.u32().map(u64::from),
        _ => r.u64(),
    };
    uint.map_err(|e| MsgPackError::from_buffer(e, offset))
}

fn read_len(r: &mut Reader<'_>, marker: u8) -> Result<usize, MsgPackError> {
    let offset = r.position();
    let len = match marker {
        STR8 => r.u8().map(usize::from),
        STR16 | ARRAY16 | MAP16 => r.u16().map(usize::from),
        _ => r.u32().map(|len| len as usize),
    };
    len.map_err(|e| MsgPackError::from_buffer(e, offset))
}

fn read_str(r: &mut Reader<'_>, len: usize) -> Result<Value, MsgPackError> {
    let offset = r.position();
    r.utf8(len)
        .map(|s| Value::Text(s.to_owned()))
        .map_err(|e| MsgPackError::from_buffer(e, offset))
}
