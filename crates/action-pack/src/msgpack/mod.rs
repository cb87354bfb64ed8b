//! Canonical MessagePack encoding.
//!
//! The format is the MessagePack subset needed for action documents:
//! booleans, unsigned integers, strings, arrays and maps, each with the
//! narrowest header that fits (see [`crate::constants`]).

mod decoder;
mod encoder;
mod error;

pub use decoder::{MsgPackDecoder, MAX_DEPTH};
pub use encoder::MsgPackEncoder;
pub use error::MsgPackError;

use crate::value::Value;

/// Encoded MessagePack bytes.
pub type MsgPack = Vec<u8>;

/// Encode a [`Value`] into canonical MessagePack bytes.
pub fn encode(value: &Value) -> MsgPack {
    MsgPackEncoder::new().encode(value)
}

/// Decode MessagePack bytes into a [`Value`], accepting any header width.
pub fn decode(blob: &[u8]) -> Result<Value, MsgPackError> {
    MsgPackDecoder::new().decode(blob)
}

/// Whether `blob` is exactly one value in canonical (minimal-width) form.
pub fn is_canonical(blob: &[u8]) -> bool {
    MsgPackDecoder::strict()
        .decode(blob)
        .map(|value| encode(&value) == blob)
        .unwrap_or(false)
}
