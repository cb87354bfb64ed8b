//! Golden vectors: named values paired with the exact bytes they must encode to.
//!
//! A corpus is JSON so it can be shared with implementations in other
//! languages:
//!
//! ```json
//! {
//!   "config": { "window": 10 },
//!   "vectors": [
//!     { "name": "order without cloid", "value": { "type": "order", ... },
//!       "expected_hex": "83a4..." },
//!     { "name": "payload", "value": { ... }, "nonce": 1761133685960,
//!       "address": "0x...", "expires_after": 1761133700000,
//!       "expected_hex": "..." }
//!   ]
//! }
//! ```
//!
//! Object key order in `value` is emission order. When `nonce` is present
//! the expected bytes are a whole signing payload rather than just the
//! encoded value.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::{compare_with, decode_hex, CanonicalEncoder, Comparison, ConformanceConfig};
use crate::address::Address;
use crate::payload::PayloadParts;
use crate::value::Value;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GoldenError {
    #[error("invalid golden hex: {0}")]
    InvalidHex(String),
    #[error("invalid golden corpus: {0}")]
    InvalidJson(String),
    #[error("golden vector `{name}`: {reason}")]
    InvalidVector { name: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenVector {
    pub name: String,
    pub value: Value,
    pub nonce: Option<u64>,
    pub address: Option<Address>,
    pub expires_after: Option<u64>,
    pub expected: Vec<u8>,
}

impl GoldenVector {
    /// Produces the bytes this vector pins, using `encoder` for the value.
    pub fn actual<E>(&self, encoder: &mut E) -> Vec<u8>
    where
        E: CanonicalEncoder + ?Sized,
    {
        let encoded = encoder.encode(&self.value);
        match self.nonce {
            None => encoded,
            Some(nonce) => PayloadParts {
                action: &encoded,
                nonce,
                address: self.address,
                expires_after: self.expires_after,
            }
            .to_bytes(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawCorpus {
    #[serde(default)]
    config: ConformanceConfig,
    vectors: Vec<RawVector>,
}

#[derive(Debug, Deserialize)]
struct RawVector {
    name: String,
    value: serde_json::Value,
    #[serde(default)]
    nonce: Option<u64>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    expires_after: Option<u64>,
    expected_hex: String,
}

impl TryFrom<RawVector> for GoldenVector {
    type Error = GoldenError;

    fn try_from(raw: RawVector) -> Result<Self, Self::Error> {
        let invalid = |reason: String| GoldenError::InvalidVector {
            name: raw.name.clone(),
            reason,
        };
        let value = Value::try_from(&raw.value).map_err(|err| invalid(err.to_string()))?;
        let address = raw
            .address
            .as_deref()
            .map(str::parse::<Address>)
            .transpose()
            .map_err(|err| invalid(err.to_string()))?;
        let expected = decode_hex(&raw.expected_hex).map_err(|err| invalid(err.to_string()))?;
        if raw.nonce.is_none() && (address.is_some() || raw.expires_after.is_some()) {
            return Err(invalid("address or expiry given without a nonce".to_owned()));
        }
        Ok(GoldenVector {
            name: raw.name,
            value,
            nonce: raw.nonce,
            address,
            expires_after: raw.expires_after,
            expected,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenReport {
    pub name: String,
    pub comparison: Comparison,
}

impl GoldenReport {
    pub fn passed(&self) -> bool {
        self.comparison.is_identical()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoldenCorpus {
    pub config: ConformanceConfig,
    pub vectors: Vec<GoldenVector>,
}

impl GoldenCorpus {
    pub fn from_json(json: &str) -> Result<Self, GoldenError> {
        let raw: RawCorpus =
            serde_json::from_str(json).map_err(|err| GoldenError::InvalidJson(err.to_string()))?;
        let vectors = raw
            .vectors
            .into_iter()
            .map(GoldenVector::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            vectors = vectors.len(),
            window = raw.config.window,
            "loaded golden corpus"
        );
        Ok(Self {
            config: raw.config,
            vectors,
        })
    }

    /// Runs every vector through `encoder`: actual bytes on the left,
    /// golden bytes on the right.
    pub fn run<E>(&self, encoder: &mut E) -> Vec<GoldenReport>
    where
        E: CanonicalEncoder + ?Sized,
    {
        self.vectors
            .iter()
            .map(|vector| GoldenReport {
                name: vector.name.clone(),
                comparison: compare_with(&vector.actual(encoder), &vector.expected, &self.config),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msgpack::MsgPackEncoder;

    const CORPUS: &str = r#"{
        "config": {"window": 2},
        "vectors": [
            {"name": "true", "value": true, "expected_hex": "c3"},
            {"name": "map", "value": {"b": 1, "a": null}, "expected_hex": "81 a1 62 01"},
            {"name": "payload", "value": 5, "nonce": 1, "expected_hex": "05000000000000000100"}
        ]
    }"#;

    #[test]
    fn loads_and_passes() {
        let corpus = GoldenCorpus::from_json(CORPUS).unwrap();
        assert_eq!(corpus.config.window, 2);
        assert_eq!(corpus.vectors.len(), 3);
        let reports = corpus.run(&mut MsgPackEncoder::new());
        assert!(reports.iter().all(GoldenReport::passed), "{reports:?}");
    }

    #[test]
    fn divergent_encoder_fails_the_right_vectors() {
        let corpus = GoldenCorpus::from_json(CORPUS).unwrap();
        let mut always_false = |_: &Value| vec![0xc2];
        let reports = corpus.run(&mut always_false);
        assert!(!reports[0].passed());
        assert_eq!(reports[0].comparison.divergence().map(|d| d.index), Some(0));
    }

    #[test]
    fn widest_window_reports_instead_of_panicking() {
        let json = r#"{
            "config": {"window": 18446744073709551615},
            "vectors": [{"name": "one", "value": 1, "expected_hex": "02"}]
        }"#;
        let corpus = GoldenCorpus::from_json(json).unwrap();
        assert_eq!(corpus.config.window, usize::MAX);
        let reports = corpus.run(&mut MsgPackEncoder::new());
        let divergence = reports[0].comparison.divergence().unwrap();
        assert_eq!(divergence.index, 0);
        assert_eq!(divergence.left_window, "@0: [01]");
        assert_eq!(divergence.right_window, "@0: [02]");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            GoldenCorpus::from_json("{"),
            Err(GoldenError::InvalidJson(_))
        ));
        let bad_hex = r#"{"vectors": [{"name": "x", "value": 1, "expected_hex": "zz"}]}"#;
        assert!(matches!(
            GoldenCorpus::from_json(bad_hex),
            Err(GoldenError::InvalidVector { .. })
        ));
        let negative = r#"{"vectors": [{"name": "x", "value": -1, "expected_hex": "00"}]}"#;
        assert!(matches!(
            GoldenCorpus::from_json(negative),
            Err(GoldenError::InvalidVector { .. })
        ));
        let orphan = r#"{"vectors": [{"name": "x", "value": 1, "expires_after": 3, "expected_hex": "01"}]}"#;
        assert!(matches!(
            GoldenCorpus::from_json(orphan),
            Err(GoldenError::InvalidVector { .. })
        ));
    }
}
