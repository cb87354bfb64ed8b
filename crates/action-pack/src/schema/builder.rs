use tracing::trace;

use super::{Presence, Schema, SchemaViolation, ViolationKind};
use crate::value::{Fields, Value};

/// Collects field values in any order and emits them in schema order.
///
/// ```
/// use action_pack::schema::{definitions::LIMIT, FieldsBuilder};
///
/// let limit = FieldsBuilder::new(&LIMIT).set("tif", "Gtc").build().unwrap();
/// assert_eq!(limit.keys().collect::<Vec<_>>(), vec!["tif"]);
/// ```
#[derive(Debug)]
pub struct FieldsBuilder {
    schema: &'static Schema,
    supplied: Vec<(String, Value)>,
}

impl FieldsBuilder {
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            supplied: Vec::with_capacity(schema.fields.len()),
        }
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Supplies a field. Setting the same name twice fails at [`build`](Self::build).
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.supplied.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<Fields, SchemaViolation> {
        build(self.schema, self.supplied)
    }
}

/// Builds a [`Fields`] whose pairs follow `schema` declaration order.
///
/// Absent optionals are omitted. An unknown name, a name supplied twice, a
/// missing required field or a value of the wrong shape is a
/// [`SchemaViolation`].
pub fn build<K, I>(schema: &'static Schema, populated: I) -> Result<Fields, SchemaViolation>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    let mut slots: Vec<Option<Value>> = vec![None; schema.fields.len()];
    for (name, value) in populated {
        let name = name.into();
        let kind = match schema.position(&name) {
            None => ViolationKind::Unknown,
            Some(idx) if slots[idx].is_some() => ViolationKind::Duplicate,
            Some(idx) => {
                slots[idx] = Some(value);
                continue;
            }
        };
        return Err(SchemaViolation::new(schema, name, kind));
    }

    let mut fields = Fields::with_capacity(slots.len());
    for (field, slot) in schema.fields.iter().zip(slots) {
        match slot.filter(|value| !value.is_absent()) {
            Some(value) => {
                field.shape.check(schema, field.name, &value)?;
                fields.push(field.name, value);
            }
            None if field.presence == Presence::Required => {
                return Err(SchemaViolation::new(
                    schema,
                    field.name,
                    ViolationKind::Missing,
                ));
            }
            None => {}
        }
    }
    trace!(schema = schema.name, fields = fields.len(), "built fields");
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::super::definitions::{CANCEL_WIRE, ORDER_WIRE};
    use super::*;
    use crate::schema::Shape;

    fn limit_gtc() -> Fields {
        Fields::new().with("limit", Fields::new().with("tif", "Gtc"))
    }

    #[test]
    fn emits_declaration_order_regardless_of_supply_order() {
        let fields = FieldsBuilder::new(&ORDER_WIRE)
            .set("t", limit_gtc())
            .set("s", Value::decimal("45"))
            .set("r", false)
            .set("p", Value::decimal("0.1233"))
            .set("b", true)
            .set("a", 173u64)
            .build()
            .unwrap();
        assert_eq!(
            fields.keys().collect::<Vec<_>>(),
            vec!["a", "b", "p", "r", "s", "t"]
        );
    }

    #[test]
    fn optional_absent_is_omitted() {
        let fields = FieldsBuilder::new(&ORDER_WIRE)
            .set("a", 173u64)
            .set("b", true)
            .set("c", Value::Absent)
            .set("p", Value::decimal("0.1233"))
            .set("r", false)
            .set("s", Value::decimal("45"))
            .set("t", limit_gtc())
            .build()
            .unwrap();
        assert_eq!(fields.get("c"), None);
        assert_eq!(fields.len(), 6);
    }

    #[test]
    fn violations() {
        let err = FieldsBuilder::new(&CANCEL_WIRE)
            .set("a", 1u64)
            .build()
            .unwrap_err();
        assert_eq!(err.field, "o");
        assert_eq!(err.kind, ViolationKind::Missing);

        let err = FieldsBuilder::new(&CANCEL_WIRE)
            .set("a", 1u64)
            .set("o", 2u64)
            .set("x", 3u64)
            .build()
            .unwrap_err();
        assert_eq!(err.kind, ViolationKind::Unknown);

        let err = FieldsBuilder::new(&CANCEL_WIRE)
            .set("a", 1u64)
            .set("a", 1u64)
            .build()
            .unwrap_err();
        assert_eq!(err.kind, ViolationKind::Duplicate);

        let err = FieldsBuilder::new(&CANCEL_WIRE)
            .set("a", "1")
            .set("o", 2u64)
            .build()
            .unwrap_err();
        assert_eq!(err.field, "a");
        assert_eq!(err.kind, ViolationKind::WrongShape(Shape::UInt.describe()));
    }

    #[test]
    fn nested_violation_carries_path() {
        let err = FieldsBuilder::new(&ORDER_WIRE)
            .set("a", 0u64)
            .set("b", true)
            .set("p", Value::decimal("1"))
            .set("r", false)
            .set("s", Value::decimal("1"))
            .set("t", Fields::new().with("limit", Fields::new().with("tif", "GTC")))
            .build()
            .unwrap_err();
        assert_eq!(err.schema, "limit");
        assert_eq!(err.field, "t.limit.tif");
    }
}
