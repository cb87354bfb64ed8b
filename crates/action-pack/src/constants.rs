//! MessagePack markers and width thresholds.
//!
//! These values are part of the signed wire contract. Changing any of them
//! changes the bytes (and therefore the hash) of every action document.

pub const FALSE: u8 = 0xc2;
pub const TRUE: u8 = 0xc3;
/// Only produced by foreign encoders; the canonical encoder never emits nil.
pub const NIL: u8 = 0xc0;

// Unsigned integers
pub const POSITIVE_FIXINT_MAX: u64 = 0x7f;
pub const UINT8: u8 = 0xcc;
pub const UINT16: u8 = 0xcd;
pub const UINT32: u8 = 0xce;
pub const UINT64: u8 = 0xcf;

// Strings
pub const FIXSTR: u8 = 0xa0;
pub const FIXSTR_MAX: usize = 31;
pub const STR8: u8 = 0xd9;
pub const STR16: u8 = 0xda;
pub const STR32: u8 = 0xdb;

// Arrays
pub const FIXARRAY: u8 = 0x90;
pub const ARRAY16: u8 = 0xdc;
pub const ARRAY32: u8 = 0xdd;

// Maps
pub const FIXMAP: u8 = 0x80;
pub const MAP16: u8 = 0xde;
pub const MAP32: u8 = 0xdf;

/// Largest element/pair count encodable in a fixarray/fixmap header.
pub const FIXCOLLECTION_MAX: usize = 15;

/// Width of the big-endian nonce in a signing payload.
pub const NONCE_LEN: usize = 8;
/// Width of an account/vault address.
pub const ADDRESS_LEN: usize = 20;
/// Width of a client order id.
pub const CLOID_LEN: usize = 16;

pub const ADDRESS_ABSENT: u8 = 0x00;
pub const ADDRESS_PRESENT: u8 = 0x01;
pub const EXPIRY_MARKER: u8 = 0x00;
