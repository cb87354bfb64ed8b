use std::fmt;
use std::str::FromStr;

use crate::constants::ADDRESS_LEN;
use crate::error::Error;

/// A 20-byte account or vault address.
///
/// Only the length is checked; whether the address exists or is allowed to
/// act is the exchange's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; ADDRESS_LEN]>::try_from(bytes)
            .map(Self)
            .map_err(|_| Error::InvalidAddressLength(bytes.len()))
    }
}

/// Accepts 40 hex characters of either case, with an optional `0x` prefix.
impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| Error::InvalidAddress(s.to_owned()))?;
        Ok(Self(bytes))
    }
}

/// Lowercase hex with a `0x` prefix, the form builder addresses take on the wire.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
