//! Schemas: the declared field order, optionality and nested shape of every
//! action document.
//!
//! The encoder itself is schema-agnostic. Schema discipline is applied when a
//! [`Fields`] value is built ([`FieldsBuilder`]) or checked ([`Schema::validate`]),
//! so emission order never depends on how a caller happened to supply fields.

mod builder;
pub mod definitions;

pub use builder::{build, FieldsBuilder};

use thiserror::Error;

use crate::action::is_canonical_decimal;
use crate::value::{Fields, Value};

/// A schema violation, naming the schema and the (dotted) field path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("schema `{schema}`, field `{field}`: {kind}")]
pub struct SchemaViolation {
    pub schema: &'static str,
    pub field: String,
    pub kind: ViolationKind,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    #[error("required field is missing")]
    Missing,
    #[error("field is not declared by the schema")]
    Unknown,
    #[error("field supplied more than once")]
    Duplicate,
    #[error("field is out of schema order")]
    OutOfOrder,
    #[error("expected {0}")]
    WrongShape(&'static str),
}

impl SchemaViolation {
    fn new(schema: &Schema, field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            schema: schema.name,
            field: field.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// May be omitted entirely; never encoded as null.
    Optional,
}

/// The shape a field's value must have.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    Bool,
    UInt,
    /// Canonical decimal text, see [`is_canonical_decimal`].
    Decimal,
    Text,
    /// Text drawn from a closed set of tags.
    Tag(&'static [&'static str]),
    /// 32 lowercase hex characters (16 raw bytes).
    Cloid,
    /// `0x` followed by 40 lowercase hex characters.
    Address,
    /// An exchange order id (integer) or a client order id.
    OrderRef,
    Nested(&'static Schema),
    /// A single-pair map; the key names the schema of the inner map.
    Variant(&'static [&'static Schema]),
    SequenceOf(&'static Shape),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub presence: Presence,
    pub shape: Shape,
}

impl FieldSpec {
    pub const fn required(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            presence: Presence::Required,
            shape,
        }
    }

    pub const fn optional(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            presence: Presence::Optional,
            shape,
        }
    }
}

/// An ordered field list. Declaration order is emission order.
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|field| field.name)
    }

    /// Checks an already-built [`Fields`] against this schema, recursively.
    pub fn validate(&self, fields: &Fields) -> Result<(), SchemaViolation> {
        self.validate_at("", fields)
    }

    fn validate_at(&self, prefix: &str, fields: &Fields) -> Result<(), SchemaViolation> {
        let mut indices = Vec::with_capacity(fields.len());
        for key in fields.keys() {
            let kind = match self.position(key) {
                None => ViolationKind::Unknown,
                Some(idx) if indices.contains(&idx) => ViolationKind::Duplicate,
                Some(idx) => {
                    indices.push(idx);
                    continue;
                }
            };
            return Err(SchemaViolation::new(self, join(prefix, key), kind));
        }
        if let Some(i) = indices.windows(2).position(|w| w[0] > w[1]) {
            let key = self.fields[indices[i + 1]].name;
            return Err(SchemaViolation::new(
                self,
                join(prefix, key),
                ViolationKind::OutOfOrder,
            ));
        }
        if let Some(field) = self
            .fields
            .iter()
            .enumerate()
            .find(|(idx, field)| field.presence == Presence::Required && !indices.contains(idx))
            .map(|(_, field)| field)
        {
            return Err(SchemaViolation::new(
                self,
                join(prefix, field.name),
                ViolationKind::Missing,
            ));
        }
        fields.iter().zip(&indices).try_for_each(|((key, value), &idx)| {
            self.fields[idx].shape.check(self, &join(prefix, key), value)
        })
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

fn is_lower_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

impl Shape {
    /// Human-readable description used in violation messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Shape::Bool => "a boolean",
            Shape::UInt => "an unsigned integer",
            Shape::Decimal => "canonical decimal text",
            Shape::Text => "text",
            Shape::Tag(_) => "one of the declared tags",
            Shape::Cloid => "32 lowercase hex characters",
            Shape::Address => "0x followed by 40 lowercase hex characters",
            Shape::OrderRef => "an order id or a client order id",
            Shape::Nested(_) => "a nested map",
            Shape::Variant(_) => "a map with exactly one declared variant",
            Shape::SequenceOf(_) => "a sequence",
        }
    }

    /// Checks `value` against this shape. `schema` is the schema declaring
    /// the field and `path` the field's dotted path, both for error reports.
    pub fn check(
        &self,
        schema: &Schema,
        path: &str,
        value: &Value,
    ) -> Result<(), SchemaViolation> {
        let ok = match self {
            Shape::Bool => value.as_bool().is_some(),
            Shape::UInt => value.as_u64().is_some(),
            Shape::Decimal => value.as_str().is_some_and(is_canonical_decimal),
            Shape::Text => value.as_str().is_some(),
            Shape::Tag(tags) => value.as_str().is_some_and(|s| tags.iter().any(|tag| *tag == s)),
            Shape::Cloid => value.as_str().is_some_and(|s| is_lower_hex(s, 32)),
            Shape::Address => value
                .as_str()
                .and_then(|s| s.strip_prefix("0x"))
                .is_some_and(|hex| is_lower_hex(hex, 40)),
            Shape::OrderRef => {
                value.as_u64().is_some() || value.as_str().is_some_and(|s| is_lower_hex(s, 32))
            }
            Shape::Nested(inner) => {
                return match value.as_fields() {
                    Some(fields) => inner.validate_at(path, fields),
                    None => Err(self.wrong(schema, path)),
                };
            }
            Shape::Variant(variants) => {
                let mut pairs = value.as_fields().map(Fields::iter).into_iter().flatten();
                return match (pairs.next(), pairs.next()) {
                    (Some((key, inner)), None) => {
                        let variant = variants.iter().find(|variant| variant.name == key);
                        match (variant, inner.as_fields()) {
                            (Some(variant), Some(fields)) => {
                                variant.validate_at(&join(path, key), fields)
                            }
                            _ => Err(self.wrong(schema, path)),
                        }
                    }
                    _ => Err(self.wrong(schema, path)),
                };
            }
            Shape::SequenceOf(item_shape) => {
                return match value.as_sequence() {
                    Some(items) => items
                        .iter()
                        .enumerate()
                        .filter(|(_, item)| !item.is_absent())
                        .try_for_each(|(i, item)| {
                            item_shape.check(schema, &format!("{path}[{i}]"), item)
                        }),
                    None => Err(self.wrong(schema, path)),
                };
            }
        };
        if ok {
            Ok(())
        } else {
            Err(self.wrong(schema, path))
        }
    }

    fn wrong(&self, schema: &Schema, path: &str) -> SchemaViolation {
        SchemaViolation::new(schema, path, ViolationKind::WrongShape(self.describe()))
    }
}
