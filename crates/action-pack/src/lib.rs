//! Canonical MessagePack encoding and signing payloads for exchange action
//! documents.
//!
//! An action (an order, a cancel, a modify) is hashed and signed as the
//! MessagePack encoding of its fields, followed by a nonce and an optional
//! address block. Two implementations only agree on the hash if they agree on
//! every byte, so this crate fixes the things general-purpose serializers
//! leave open:
//!
//! - field order comes from a [`Schema`], never from a map's iteration order;
//! - unset optional fields are omitted, never written as nil;
//! - integers and headers always take their narrowest MessagePack form;
//! - prices and sizes are decimal text written verbatim.
//!
//! # Example
//!
//! ```
//! use action_pack::action::{OrderAction, OrderType, OrderWire, Tif};
//! use action_pack::assemble;
//!
//! let order = OrderWire::new(173, true, "0.1233", "45", false, OrderType::Limit { tif: Tif::Gtc });
//! let action = OrderAction::new(vec![order]);
//!
//! let payload = assemble(&action, 1_761_133_685_960, None).unwrap();
//! assert_eq!(payload.len(), 75 + 8 + 1);
//! assert_eq!(&payload[75..83], &[0x00, 0x00, 0x01, 0x9a, 0x0b, 0xbf, 0x6c, 0xc8]);
//! ```

pub mod action;
pub mod conformance;
pub mod constants;
pub mod msgpack;
pub mod payload;
pub mod schema;

mod address;
mod error;
mod value;

pub use action::ActionDocument;
pub use address::Address;
pub use conformance::{
    compare, compare_against_golden, compare_encoders, CanonicalEncoder, Comparison,
    ConformanceConfig, Divergence, GoldenCorpus,
};
pub use error::{Error, Result};
pub use msgpack::{MsgPackDecoder, MsgPackEncoder};
pub use payload::{assemble, assemble_encoded, assemble_with_expiry, payload_len};
pub use schema::{FieldsBuilder, Schema, SchemaViolation};
pub use value::{Fields, Value};
