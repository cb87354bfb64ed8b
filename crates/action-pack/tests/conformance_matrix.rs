//! Encoder-vs-encoder conformance matrix.
//!
//! Each foreign encoder here reproduces a real class of interop bug: keys
//! sorted alphabetically, a too-wide string header, a nil for an unset field.

use action_pack::action::{ActionDocument, Cloid, OrderAction, OrderType, OrderWire, Tif};
use action_pack::conformance::{compare_with, ConformanceConfig};
use action_pack::msgpack::{self, MsgPackDecoder, MsgPackError};
use action_pack::{compare, compare_encoders, Comparison, Fields, MsgPackEncoder, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn order_action(cloid: Option<Cloid>) -> Value {
    let mut order =
        OrderWire::new(173, true, "0.1233", "45", false, OrderType::Limit { tif: Tif::Gtc });
    order.cloid = cloid;
    OrderAction::new(vec![order]).to_value().unwrap()
}

fn sorted(value: &Value) -> Value {
    match value {
        Value::Sequence(items) => Value::Sequence(items.iter().map(sorted).collect()),
        Value::Fields(fields) => {
            let mut pairs: Vec<(String, Value)> = fields
                .iter()
                .map(|(key, value)| (key.to_owned(), sorted(value)))
                .collect();
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Fields(pairs.into_iter().collect())
        }
        other => other.clone(),
    }
}

#[test]
fn canonical_encoder_agrees_with_itself() {
    let value = order_action(None);
    let mut left = MsgPackEncoder::new();
    let mut right = |v: &Value| msgpack::encode(v);
    assert_eq!(
        compare_encoders(&mut left, &mut right, &value),
        Comparison::Identical { len: 75 }
    );
}

#[test]
fn sorted_keys_diverge_at_the_first_reordered_key() {
    init_tracing();
    let value = order_action(None);
    let mut canonical = MsgPackEncoder::new();
    let mut sorting = |v: &Value| msgpack::encode(&sorted(v));
    let comparison = compare_encoders(&mut canonical, &mut sorting, &value);
    let divergence = comparison.divergence().unwrap();
    // Top-level map: "type" (a4 ...) vs "grouping" (a8 ...).
    assert_eq!(divergence.index, 1);
    assert_eq!(divergence.left, Some(0xa4));
    assert_eq!(divergence.right, Some(0xa8));
    assert_eq!(divergence.left_len, divergence.right_len);
}

#[test]
fn wide_string_header_is_caught_and_explained() {
    init_tracing();
    let value = order_action(None);
    let canonical = msgpack::encode(&value);
    // "na" written with a str16 header instead of fixstr.
    let mut widened = canonical[..canonical.len() - 3].to_vec();
    widened.extend_from_slice(&[0xda, 0x00, 0x02, b'n', b'a']);

    let comparison = compare(&canonical, &widened);
    let divergence = comparison.divergence().unwrap();
    assert_eq!(divergence.index, canonical.len() - 3);
    assert_eq!(divergence.left, Some(0xa2));
    assert_eq!(divergence.right, Some(0xda));
    assert!(divergence.right_window.contains("[da]"));

    // Structurally the same document, but not canonical.
    assert_eq!(
        MsgPackDecoder::new().decode(&widened),
        Ok(value.to_wire_form())
    );
    assert_eq!(
        MsgPackDecoder::strict().decode(&widened),
        Err(MsgPackError::NonCanonical {
            marker: 0xda,
            offset: canonical.len() - 3
        })
    );
    assert!(!msgpack::is_canonical(&widened));
}

#[test]
fn nil_for_unset_cloid_changes_the_pair_count() {
    let canonical = msgpack::encode(&order_action(None));
    let with_cloid = msgpack::encode(&order_action(Some(Cloid::from_u128(1))));
    // A nil cloid would still bump the order map to 7 pairs.
    let mut nil_cloid = canonical.clone();
    nil_cloid[20] = 0x87;
    nil_cloid.splice(28..28, [0xa1, b'c', 0xc0]);

    let comparison = compare(&canonical, &nil_cloid);
    assert_eq!(comparison.divergence().map(|d| d.index), Some(20));
    assert!(matches!(
        MsgPackDecoder::new().decode(&nil_cloid),
        Err(MsgPackError::UnsupportedMarker { marker: 0xc0, .. })
    ));
    assert!(!compare(&canonical, &with_cloid).is_identical());
}

#[test]
fn truncated_output_reports_end_of_input() {
    let canonical = msgpack::encode(&order_action(None));
    let truncated = &canonical[..canonical.len() - 1];
    let divergence = compare(truncated, &canonical).divergence().cloned().unwrap();
    assert_eq!(divergence.index, canonical.len() - 1);
    assert_eq!(divergence.left, None);
    assert!(divergence.left_window.ends_with("[--]"));
}

#[test]
fn window_width_comes_from_config() {
    let left = msgpack::encode(&Value::Fields(Fields::new().with("k", "aaaa")));
    let right = msgpack::encode(&Value::Fields(Fields::new().with("k", "aaab")));
    let narrow = compare_with(&left, &right, &ConformanceConfig { window: 0 });
    assert_eq!(
        narrow.divergence().map(|d| d.left_window.as_str()),
        Some("@7: [61]")
    );
}

#[test]
fn unbounded_window_renders_whole_buffers() {
    let comparison = compare_with(&[0x01], &[0x02], &ConformanceConfig { window: usize::MAX });
    let divergence = comparison.divergence().unwrap();
    assert_eq!(divergence.left_window, "@0: [01]");
    assert_eq!(divergence.right_window, "@0: [02]");
}
