use std::fmt;
use std::str::FromStr;

use crate::constants::CLOID_LEN;
use crate::error::Error;

/// A client order id: 16 raw bytes, rendered as 32 lowercase hex characters
/// without a `0x` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cloid([u8; CLOID_LEN]);

impl Cloid {
    pub const fn from_bytes(bytes: [u8; CLOID_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn from_u128(id: u128) -> Self {
        Self(id.to_be_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; CLOID_LEN] {
        &self.0
    }

    /// The wire form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Accepts 32 hex characters of either case, with an optional `0x` prefix.
impl FromStr for Cloid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let mut bytes = [0u8; CLOID_LEN];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| Error::InvalidClientOrderId(s.to_owned()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Cloid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Cloid> for crate::value::Value {
    fn from(cloid: Cloid) -> Self {
        crate::value::Value::Text(cloid.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_prefix() {
        let plain: Cloid = "06c60000000000000000000000003f5a".parse().unwrap();
        let prefixed: Cloid = "0x06C60000000000000000000000003F5A".parse().unwrap();
        assert_eq!(plain, prefixed);
        assert_eq!(plain.to_hex(), "06c60000000000000000000000003f5a");
        assert_eq!(plain, Cloid::from_u128(0x06c6_0000_0000_0000_0000_0000_0000_3f5a));
    }

    #[test]
    fn rejects_wrong_length_or_alphabet() {
        for bad in ["", "0x", "06c6", "06c60000000000000000000000003f5a00", "zz".repeat(16).as_str()] {
            assert_eq!(
                bad.parse::<Cloid>(),
                Err(Error::InvalidClientOrderId(bad.to_owned()))
            );
        }
    }
}
