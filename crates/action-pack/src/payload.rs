//! Signing payload assembly.
//!
//! Layout: `action bytes ‖ nonce (u64 BE) ‖ 0x00` or
//! `action bytes ‖ nonce ‖ 0x01 ‖ 20 address bytes`, optionally followed by
//! the expiry block `0x00 ‖ expires_after (u64 BE)`. The result is what gets
//! hashed and signed; nothing here hashes or signs.

use action_pack_buffers::{Reader, Writer};
use tracing::debug;

use crate::action::ActionDocument;
use crate::address::Address;
use crate::constants::{ADDRESS_ABSENT, ADDRESS_LEN, ADDRESS_PRESENT, EXPIRY_MARKER, NONCE_LEN};
use crate::error::{Error, Result};
use crate::msgpack::{self, MsgPackDecoder};

/// Encodes `action` and appends the nonce and address block.
///
/// `address` is the vault or sub-account acting on the signer's behalf. Only
/// its length is checked.
///
/// ```
/// use action_pack::{assemble, Fields};
///
/// let action = Fields::new().with("type", "noop");
/// let payload = assemble(&action, 1, None).unwrap();
/// assert_eq!(&payload[payload.len() - 9..], &[0, 0, 0, 0, 0, 0, 0, 1, 0]);
/// ```
pub fn assemble<A>(action: &A, nonce: u64, address: Option<&[u8]>) -> Result<Vec<u8>>
where
    A: ActionDocument + ?Sized,
{
    assemble_with_expiry(action, nonce, address, None)
}

/// [`assemble`] with an optional trailing expiry block.
pub fn assemble_with_expiry<A>(
    action: &A,
    nonce: u64,
    address: Option<&[u8]>,
    expires_after: Option<u64>,
) -> Result<Vec<u8>>
where
    A: ActionDocument + ?Sized,
{
    let address = address.map(Address::try_from).transpose()?;
    let action_bytes = msgpack::encode(&action.to_value()?);
    debug!(
        action_type = action.action_type(),
        action_len = action_bytes.len(),
        "encoded action"
    );
    let parts = PayloadParts {
        action: &action_bytes,
        nonce,
        address,
        expires_after,
    };
    Ok(parts.to_bytes())
}

/// Assembles a payload around already-encoded action bytes.
pub fn assemble_encoded(
    action_bytes: &[u8],
    nonce: u64,
    address: Option<&[u8]>,
    expires_after: Option<u64>,
) -> Result<Vec<u8>> {
    let parts = PayloadParts {
        action: action_bytes,
        nonce,
        address: address.map(Address::try_from).transpose()?,
        expires_after,
    };
    Ok(parts.to_bytes())
}

/// Total payload length for an action of `action_len` bytes.
pub fn payload_len(action_len: usize, has_address: bool, has_expiry: bool) -> usize {
    let address_block = if has_address { 1 + ADDRESS_LEN } else { 1 };
    let expiry_block = if has_expiry { 1 + NONCE_LEN } else { 0 };
    action_len + NONCE_LEN + address_block + expiry_block
}

/// A signing payload taken apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadParts<'a> {
    pub action: &'a [u8],
    pub nonce: u64,
    pub address: Option<Address>,
    pub expires_after: Option<u64>,
}

impl PayloadParts<'_> {
    pub fn encoded_len(&self) -> usize {
        payload_len(
            self.action.len(),
            self.address.is_some(),
            self.expires_after.is_some(),
        )
    }

    /// Writes the parts out in payload order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = Writer::with_capacity(self.encoded_len());
        writer.buf(self.action);
        writer.u64(self.nonce);
        match &self.address {
            Some(address) => {
                writer.u8(ADDRESS_PRESENT);
                writer.buf(address.as_bytes());
            }
            None => writer.u8(ADDRESS_ABSENT),
        }
        if let Some(expires_after) = self.expires_after {
            writer.u8u64(EXPIRY_MARKER, expires_after);
        }
        debug!(
            nonce = self.nonce,
            has_address = self.address.is_some(),
            has_expiry = self.expires_after.is_some(),
            payload_len = writer.len(),
            "assembled signing payload"
        );
        writer.flush()
    }
}

/// Splits a payload back into its parts.
///
/// The action's extent is found by decoding it, so the action must be
/// well-formed MessagePack.
pub fn split(payload: &[u8]) -> Result<PayloadParts<'_>> {
    let (_, action_len) = MsgPackDecoder::new().decode_with_consumed(payload)?;
    let (action, rest) = payload.split_at(action_len);
    let truncated = |_| Error::MalformedPayload("truncated nonce or address block");
    let mut r = Reader::new(rest);
    let nonce = r.u64().map_err(truncated)?;
    let address = match r.u8().map_err(truncated)? {
        ADDRESS_ABSENT => None,
        ADDRESS_PRESENT => Some(Address::try_from(r.buf(ADDRESS_LEN).map_err(truncated)?)?),
        _ => return Err(Error::MalformedPayload("unknown address flag")),
    };
    let expires_after = if r.is_empty() {
        None
    } else {
        if r.u8().map_err(truncated)? != EXPIRY_MARKER {
            return Err(Error::MalformedPayload("unknown trailing block"));
        }
        Some(r.u64().map_err(truncated)?)
    };
    if !r.is_empty() {
        return Err(Error::MalformedPayload("trailing bytes after payload"));
    }
    Ok(PayloadParts {
        action,
        nonce,
        address,
        expires_after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Fields;

    fn action() -> Fields {
        Fields::new().with("type", "order")
    }

    #[test]
    fn no_address_appends_zero_flag() {
        let payload = assemble(&action(), 0x0102_0304_0506_0708, None).unwrap();
        let action_len = msgpack::encode(&action().into()).len();
        assert_eq!(
            &payload[action_len..],
            &[1, 2, 3, 4, 5, 6, 7, 8, ADDRESS_ABSENT]
        );
        assert_eq!(payload.len(), payload_len(action_len, false, false));
    }

    #[test]
    fn address_block_and_expiry() {
        let address = [0x11u8; ADDRESS_LEN];
        let payload = assemble_with_expiry(&action(), 7, Some(&address[..]), Some(9)).unwrap();
        let parts = split(&payload).unwrap();
        assert_eq!(parts.nonce, 7);
        assert_eq!(parts.address, Some(Address::new(address)));
        assert_eq!(parts.expires_after, Some(9));
        assert_eq!(&payload[payload.len() - 9..], &[0, 0, 0, 0, 0, 0, 0, 0, 9]);
    }

    #[test]
    fn wrong_address_length_is_rejected() {
        for len in [0, 19, 21, 32] {
            let address = vec![0u8; len];
            assert_eq!(
                assemble(&action(), 1, Some(address.as_slice())),
                Err(Error::InvalidAddressLength(len))
            );
        }
    }

    #[test]
    fn split_rejects_malformed_tails() {
        let mut payload = assemble(&action(), 1, None).unwrap();
        let flag = payload.len() - 1;
        payload[flag] = 2;
        assert_eq!(
            split(&payload),
            Err(Error::MalformedPayload("unknown address flag"))
        );
        let short = assemble(&action(), 1, None).unwrap();
        assert!(matches!(
            split(&short[..short.len() - 2]),
            Err(Error::MalformedPayload(_))
        ));
    }
}
