//! Canonical MessagePack encoder.

use action_pack_buffers::Writer;
use tracing::trace;

use crate::constants::*;
use crate::value::{Fields, Value};

/// Canonical MessagePack encoder.
///
/// Every header and integer takes the narrowest form its magnitude allows,
/// and map pairs are written in the order the [`Fields`] value stores them.
/// No key is ever sorted, and nothing is emitted for [`Value::Absent`].
///
/// The encoder keeps a reusable [`Writer`]; the output of
/// [`MsgPackEncoder::encode`] depends only on the value passed in.
pub struct MsgPackEncoder {
    pub writer: Writer,
}

impl Default for MsgPackEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    pub fn encode(&mut self, value: &Value) -> Vec<u8> {
        self.writer.reset();
        self.write_any(value);
        trace!(len = self.writer.len(), "encoded value");
        self.writer.flush()
    }

    pub fn write_any(&mut self, value: &Value) {
        match value {
            Value::Absent => {}
            Value::Bool(b) => self.write_boolean(*b),
            Value::UInt(u) => self.write_u_integer(*u),
            Value::DecimalString(s) | Value::Text(s) => self.write_str(s),
            Value::Sequence(items) => self.write_arr(items),
            Value::Fields(fields) => self.write_fields(fields),
        }
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.u8(if b { TRUE } else { FALSE });
    }

    pub fn write_u_integer(&mut self, uint: u64) {
        let w = &mut self.writer;
        if uint <= POSITIVE_FIXINT_MAX {
            w.u8(uint as u8);
        } else if uint <= 0xff {
            w.u8u8(UINT8, uint as u8);
        } else if uint <= 0xffff {
            w.u8u16(UINT16, uint as u16);
        } else if uint <= 0xffff_ffff {
            w.u8u32(UINT32, uint as u32);
        } else {
            w.u8u64(UINT64, uint);
        }
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_str_hdr(s.len());
        self.writer.utf8(s);
    }

    /// Lengths beyond `u32::MAX` are outside the supported document shapes.
    pub fn write_str_hdr(&mut self, length: usize) {
        let w = &mut self.writer;
        if length <= FIXSTR_MAX {
            w.u8(FIXSTR | length as u8);
        } else if length <= 0xff {
            w.u8u8(STR8, length as u8);
        } else if length <= 0xffff {
            w.u8u16(STR16, length as u16);
        } else {
            w.u8u32(STR32, length as u32);
        }
    }

    pub fn write_arr(&mut self, items: &[Value]) {
        let count = items.iter().filter(|item| !item.is_absent()).count();
        self.write_arr_hdr(count);
        for item in items {
            self.write_any(item);
        }
    }

    pub fn write_arr_hdr(&mut self, length: usize) {
        let w = &mut self.writer;
        if length <= FIXCOLLECTION_MAX {
            w.u8(FIXARRAY | length as u8);
        } else if length <= 0xffff {
            w.u8u16(ARRAY16, length as u16);
        } else {
            w.u8u32(ARRAY32, length as u32);
        }
    }

    pub fn write_fields(&mut self, fields: &Fields) {
        self.write_map_hdr(fields.len());
        for (key, value) in fields.iter() {
            self.write_str(key);
            self.write_any(value);
        }
    }

    pub fn write_map_hdr(&mut self, length: usize) {
        let w = &mut self.writer;
        if length <= FIXCOLLECTION_MAX {
            w.u8(FIXMAP | length as u8);
        } else if length <= 0xffff {
            w.u8u16(MAP16, length as u16);
        } else {
            w.u8u32(MAP32, length as u32);
        }
    }
}
