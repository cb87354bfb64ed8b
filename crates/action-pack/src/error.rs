//! Crate-level error type.

use thiserror::Error;

use crate::conformance::GoldenError;
use crate::msgpack::MsgPackError;
use crate::schema::SchemaViolation;

/// Every failure the crate can report.
///
/// All of these are construction-time failures: encoding is pure, so the
/// same input fails the same way on every attempt and nothing is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaViolation),
    #[error("invalid address length: expected 20 bytes, got {0}")]
    InvalidAddressLength(usize),
    #[error("invalid address `{0}`: expected 40 hex characters with optional 0x prefix")]
    InvalidAddress(String),
    #[error("unrepresentable value `{value}`: {reason}")]
    UnrepresentableValue { value: String, reason: &'static str },
    #[error("invalid client order id `{0}`: expected 32 hex characters")]
    InvalidClientOrderId(String),
    #[error("invalid decimal `{value}`: {reason}")]
    InvalidDecimal { value: String, reason: &'static str },
    #[error("malformed signing payload: {0}")]
    MalformedPayload(&'static str),
    #[error("MessagePack decode error: {0}")]
    Decode(#[from] MsgPackError),
    #[error("golden vector error: {0}")]
    Golden(#[from] GoldenError),
}

impl Error {
    pub(crate) fn unrepresentable(value: impl ToString, reason: &'static str) -> Self {
        Error::UnrepresentableValue {
            value: value.to_string(),
            reason,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
