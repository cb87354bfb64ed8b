//! [`Value`]: the closed set of shapes the canonical encoder can emit.

use serde_json::Value as JsonValue;

use crate::error::Error;

/// A value ready for canonical encoding.
///
/// There is no null variant: an optional field that is unset is
/// [`Value::Absent`], and absent values never reach the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A field that is omitted entirely.
    Absent,
    Bool(bool),
    UInt(u64),
    /// Exact decimal text of a price or size, encoded verbatim as a string.
    DecimalString(String),
    Text(String),
    Sequence(Vec<Value>),
    Fields(Fields),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn decimal(s: impl Into<String>) -> Self {
        Value::DecimalString(s.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt(u) => Some(*u),
            _ => None,
        }
    }

    /// String content of either string-kind variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::DecimalString(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_fields(&self) -> Option<&Fields> {
        match self {
            Value::Fields(fields) => Some(fields),
            _ => None,
        }
    }

    /// The value as the structural decoder would return it.
    ///
    /// `DecimalString` becomes `Text` (the wire does not distinguish them)
    /// and `Absent` sequence items disappear. For every value `v`,
    /// `decode(encode(v)) == v.to_wire_form()`.
    pub fn to_wire_form(&self) -> Value {
        match self {
            Value::DecimalString(s) => Value::Text(s.clone()),
            Value::Sequence(items) => Value::Sequence(
                items
                    .iter()
                    .filter(|item| !item.is_absent())
                    .map(Value::to_wire_form)
                    .collect(),
            ),
            Value::Fields(fields) => Value::Fields(
                fields
                    .iter()
                    .map(|(key, value)| (key.to_owned(), value.to_wire_form()))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::UInt(u)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::UInt(u64::from(u))
    }
}

impl From<u16> for Value {
    fn from(u: u16) -> Self {
        Value::UInt(u64::from(u))
    }
}

impl From<u8> for Value {
    fn from(u: u8) -> Self {
        Value::UInt(u64::from(u))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Fields> for Value {
    fn from(fields: Fields) -> Self {
        Value::Fields(fields)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Absent, Into::into)
    }
}

impl TryFrom<i64> for Value {
    type Error = Error;

    fn try_from(i: i64) -> Result<Self, Self::Error> {
        u64::try_from(i)
            .map(Value::UInt)
            .map_err(|_| Error::unrepresentable(i, "negative integers have no wire encoding"))
    }
}

impl TryFrom<u128> for Value {
    type Error = Error;

    fn try_from(u: u128) -> Result<Self, Self::Error> {
        u64::try_from(u)
            .map(Value::UInt)
            .map_err(|_| Error::unrepresentable(u, "wider than 64 bits"))
    }
}

/// JSON to [`Value`], preserving object key order.
///
/// Used for golden corpora written as JSON. `null` maps to `Absent`, so a
/// `null` object member is omitted just like an unset optional field.
impl TryFrom<&JsonValue> for Value {
    type Error = Error;

    fn try_from(json: &JsonValue) -> Result<Self, Self::Error> {
        Ok(match json {
            JsonValue::Null => Value::Absent,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => match n.as_u64() {
                Some(u) => Value::UInt(u),
                None if n.is_f64() => {
                    return Err(Error::unrepresentable(
                        n,
                        "fractional numbers must be carried as decimal strings",
                    ))
                }
                None => {
                    return Err(Error::unrepresentable(
                        n,
                        "negative integers have no wire encoding",
                    ))
                }
            },
            JsonValue::String(s) => Value::Text(s.clone()),
            JsonValue::Array(items) => Value::Sequence(
                items
                    .iter()
                    .map(Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            JsonValue::Object(map) => {
                let mut fields = Fields::with_capacity(map.len());
                for (key, member) in map {
                    fields.push(key.as_str(), Value::try_from(member)?);
                }
                Value::Fields(fields)
            }
        })
    }
}

/// An ordered list of key/value pairs.
///
/// Pairs are kept exactly in the order they are pushed; nothing here sorts
/// or hashes keys. Pushing an [`Value::Absent`] value is a no-op, so an
/// explicitly absent field and a never-added field are indistinguishable.
/// Schema order is enforced one level up, by
/// [`FieldsBuilder`](crate::schema::FieldsBuilder).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    pairs: Vec<(String, Value)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let value = value.into();
        if !value.is_absent() {
            self.pairs.push((key.into(), value));
        }
    }

    /// Chaining form of [`Fields::push`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(key, value);
        self
    }

    /// Number of pairs that will be encoded.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.pairs.iter().position(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (key, value) in iter {
            fields.push(key, value);
        }
        fields
    }
}

impl IntoIterator for Fields {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_is_never_stored() {
        let explicit = Fields::new()
            .with("a", 1u64)
            .with("c", Value::Absent)
            .with("p", "1");
        let omitted = Fields::new().with("a", 1u64).with("p", "1");
        assert_eq!(explicit, omitted);
        assert_eq!(explicit.len(), 2);
        assert_eq!(explicit.get("c"), None);
    }

    #[test]
    fn option_maps_to_absent() {
        assert_eq!(Value::from(None::<u64>), Value::Absent);
        assert_eq!(Value::from(Some("x")), Value::text("x"));
    }

    #[test]
    fn pairs_keep_push_order() {
        let fields = Fields::new().with("z", 1u64).with("a", 2u64).with("m", 3u64);
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(fields.position("a"), Some(1));
    }

    #[test]
    fn wire_form_erases_producer_intent() {
        let value = Value::Sequence(vec![
            Value::decimal("0.5"),
            Value::Absent,
            Value::Fields(Fields::new().with("p", Value::decimal("1"))),
        ]);
        assert_eq!(
            value.to_wire_form(),
            Value::Sequence(vec![
                Value::text("0.5"),
                Value::Fields(Fields::new().with("p", "1")),
            ])
        );
    }

    #[test]
    fn json_conversion_preserves_key_order() {
        let json = json!({"type": "order", "orders": [], "grouping": "na", "builder": null});
        let value = Value::try_from(&json).unwrap();
        let fields = value.as_fields().unwrap();
        assert_eq!(
            fields.keys().collect::<Vec<_>>(),
            vec!["type", "orders", "grouping"]
        );
    }

    #[test]
    fn json_numbers_outside_u64_are_rejected() {
        for json in [json!(-1), json!(1.5)] {
            assert!(matches!(
                Value::try_from(&json),
                Err(Error::UnrepresentableValue { .. })
            ));
        }
        assert!(matches!(
            Value::try_from(u128::from(u64::MAX) + 1),
            Err(Error::UnrepresentableValue { .. })
        ));
        assert_eq!(Value::try_from(7i64), Ok(Value::UInt(7)));
    }
}
