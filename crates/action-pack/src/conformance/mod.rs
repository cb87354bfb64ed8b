//! Byte-identity checks between encoders.
//!
//! Two encoders agree only if they produce the same bytes; this module finds
//! where they stop agreeing and shows the bytes around that point. A mismatch
//! is a reported [`Comparison`], never an error.

mod golden;

pub use golden::{GoldenCorpus, GoldenError, GoldenReport, GoldenVector};

use std::fmt;

use action_pack_buffers::{first_difference, print_window};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::msgpack::{self, MsgPackDecoder, MsgPackEncoder};
use crate::value::Value;

/// Bytes shown on each side of the first difference.
pub const DEFAULT_WINDOW: usize = 10;

/// Something that turns a [`Value`] into bytes.
///
/// Implemented by [`MsgPackEncoder`] and by closures, so a second
/// implementation (a foreign encoder behind FFI, a replay of captured
/// fixtures) can be compared against the canonical one.
pub trait CanonicalEncoder {
    fn encode(&mut self, value: &Value) -> Vec<u8>;
}

impl CanonicalEncoder for MsgPackEncoder {
    fn encode(&mut self, value: &Value) -> Vec<u8> {
        MsgPackEncoder::encode(self, value)
    }
}

impl<F> CanonicalEncoder for F
where
    F: FnMut(&Value) -> Vec<u8>,
{
    fn encode(&mut self, value: &Value) -> Vec<u8> {
        self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConformanceConfig {
    /// Bytes of context on each side of a divergence.
    pub window: usize,
}

impl Default for ConformanceConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Identical { len: usize },
    Diverged(Divergence),
}

impl Comparison {
    pub fn is_identical(&self) -> bool {
        matches!(self, Comparison::Identical { .. })
    }

    pub fn divergence(&self) -> Option<&Divergence> {
        match self {
            Comparison::Identical { .. } => None,
            Comparison::Diverged(divergence) => Some(divergence),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::Identical { len } => write!(f, "identical ({len} bytes)"),
            Comparison::Diverged(divergence) => divergence.fmt(f),
        }
    }
}

/// Where two byte sequences first differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    pub index: usize,
    /// `None` when the left side ended before `index`.
    pub left: Option<u8>,
    pub right: Option<u8>,
    pub left_len: usize,
    pub right_len: usize,
    pub left_window: String,
    pub right_window: String,
}

fn fmt_byte(byte: Option<u8>) -> String {
    match byte {
        Some(byte) => format!("0x{byte:02x}"),
        None => "end of input".to_owned(),
    }
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "first difference at byte {}: {} vs {} (lengths {} and {})",
            self.index,
            fmt_byte(self.left),
            fmt_byte(self.right),
            self.left_len,
            self.right_len
        )?;
        writeln!(f, "  left:  {}", self.left_window)?;
        write!(f, "  right: {}", self.right_window)
    }
}

/// [`compare_with`] using the default window.
///
/// ```
/// use action_pack::conformance::compare;
///
/// let diff = compare(&[0xa4, 0x74], &[0xa6, 0x74]);
/// assert_eq!(diff.divergence().map(|d| d.index), Some(0));
/// ```
pub fn compare(left: &[u8], right: &[u8]) -> Comparison {
    compare_with(left, right, &ConformanceConfig::default())
}

pub fn compare_with(left: &[u8], right: &[u8], config: &ConformanceConfig) -> Comparison {
    let Some(index) = first_difference(left, right) else {
        return Comparison::Identical { len: left.len() };
    };
    let divergence = Divergence {
        index,
        left: left.get(index).copied(),
        right: right.get(index).copied(),
        left_len: left.len(),
        right_len: right.len(),
        left_window: print_window(left, index, config.window),
        right_window: print_window(right, index, config.window),
    };
    warn!(
        index,
        left_len = divergence.left_len,
        right_len = divergence.right_len,
        "byte sequences diverge"
    );
    Comparison::Diverged(divergence)
}

/// Encodes `value` with both encoders and compares the results.
///
/// On divergence, each side is also checked with the strict decoder; a side
/// that is not canonical MessagePack is logged with the reason.
pub fn compare_encoders<L, R>(left: &mut L, right: &mut R, value: &Value) -> Comparison
where
    L: CanonicalEncoder + ?Sized,
    R: CanonicalEncoder + ?Sized,
{
    let left_bytes = left.encode(value);
    let right_bytes = right.encode(value);
    let comparison = compare(&left_bytes, &right_bytes);
    if !comparison.is_identical() {
        for (side, bytes) in [("left", &left_bytes), ("right", &right_bytes)] {
            if let Err(err) = MsgPackDecoder::strict().decode(bytes) {
                warn!(side, %err, "encoding is not canonical");
            }
        }
    }
    comparison
}

/// Compares the canonical encoding of `value` (left) with golden bytes
/// given as hex (right). Whitespace in the hex is ignored.
pub fn compare_against_golden(value: &Value, expected_hex: &str) -> Result<Comparison, GoldenError> {
    let expected = decode_hex(expected_hex)?;
    Ok(compare(&msgpack::encode(value), &expected))
}

pub(crate) fn decode_hex(text: &str) -> Result<Vec<u8>, GoldenError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    hex::decode(&compact).map_err(|err| GoldenError::InvalidHex(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_sequences() {
        assert_eq!(compare(&[1, 2, 3], &[1, 2, 3]), Comparison::Identical { len: 3 });
        assert_eq!(compare(&[], &[]), Comparison::Identical { len: 0 });
    }

    #[test]
    fn reports_first_difference_with_window() {
        let left: Vec<u8> = (0..30).collect();
        let mut right = left.clone();
        right[15] = 0xff;
        let divergence = compare(&left, &right).divergence().cloned().unwrap();
        assert_eq!(divergence.index, 15);
        assert_eq!(divergence.left, Some(15));
        assert_eq!(divergence.right, Some(0xff));
        assert_eq!(
            divergence.left_window,
            "@5: 05 06 07 08 09 0a 0b 0c 0d 0e [0f] 10 11 12 13 14 15 16 17 18 19"
        );
        assert!(divergence.right_window.contains("[ff]"));
    }

    #[test]
    fn length_mismatch_reports_end_of_input() {
        let divergence = compare(&[1, 2], &[1, 2, 3]).divergence().cloned().unwrap();
        assert_eq!(divergence.index, 2);
        assert_eq!(divergence.left, None);
        assert_eq!(divergence.right, Some(3));
        assert!(divergence.to_string().contains("end of input vs 0x03"));
    }

    #[test]
    fn window_is_configurable() {
        let config = ConformanceConfig { window: 1 };
        let comparison = compare_with(&[1, 2, 3, 4, 5], &[1, 2, 9, 4, 5], &config);
        assert_eq!(
            comparison.divergence().map(|d| d.left_window.as_str()),
            Some("@1: 02 [03] 04")
        );
    }

    #[test]
    fn config_deserializes_with_default_window() {
        let config: ConformanceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.window, DEFAULT_WINDOW);
        let config: ConformanceConfig = serde_json::from_str(r#"{"window": 4}"#).unwrap();
        assert_eq!(config.window, 4);
    }

    #[test]
    fn malformed_golden_hex_is_an_error() {
        assert!(matches!(
            compare_against_golden(&Value::Bool(true), "c"),
            Err(GoldenError::InvalidHex(_))
        ));
        assert!(compare_against_golden(&Value::Bool(true), " c3\n")
            .unwrap()
            .is_identical());
    }
}
