//! Typed action documents.
//!
//! Each document builds its [`Value`] through the schemas in
//! [`crate::schema::definitions`], so field order and optional-field policy
//! are never the caller's responsibility.

mod cancel;
mod cloid;
mod decimal;
mod modify;
mod order;

pub use cancel::{Cancel, CancelAction, CancelByCloid, CancelByCloidAction};
pub use cloid::Cloid;
pub use decimal::{float_to_wire, is_canonical_decimal};
pub use modify::{BatchModifyAction, Modify, ModifyAction, OrderRef};
pub use order::{BuilderInfo, Grouping, OrderAction, OrderType, OrderWire, Tif, Tpsl};

use crate::schema::definitions::action_schema;
use crate::schema::SchemaViolation;
use crate::value::{Fields, Value};

/// Something that can be signed as an exchange action.
pub trait ActionDocument {
    /// The document's `type` tag.
    fn action_type(&self) -> &str;

    /// The document as a schema-ordered value.
    fn to_value(&self) -> Result<Value, SchemaViolation>;
}

/// A pre-built document keeps the caller's field order. If its `type` names a
/// known action it must already satisfy that action's schema.
impl ActionDocument for Fields {
    fn action_type(&self) -> &str {
        self.get("type").and_then(Value::as_str).unwrap_or_default()
    }

    fn to_value(&self) -> Result<Value, SchemaViolation> {
        if let Some(schema) = action_schema(self.action_type()) {
            schema.validate(self)?;
        }
        Ok(Value::Fields(self.clone()))
    }
}

impl ActionDocument for Value {
    fn action_type(&self) -> &str {
        self.as_fields()
            .map(ActionDocument::action_type)
            .unwrap_or_default()
    }

    fn to_value(&self) -> Result<Value, SchemaViolation> {
        match self {
            Value::Fields(fields) => fields.to_value(),
            other => Ok(other.clone()),
        }
    }
}

impl<T: ActionDocument + ?Sized> ActionDocument for &T {
    fn action_type(&self) -> &str {
        (**self).action_type()
    }

    fn to_value(&self) -> Result<Value, SchemaViolation> {
        (**self).to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::schema::ViolationKind;

    #[test]
    fn raw_documents_report_their_type() {
        let fields = Fields::new().with("type", "cancel").with("cancels", Vec::<Value>::new());
        assert_eq!(fields.action_type(), "cancel");
        assert_eq!(Value::Fields(fields.clone()).action_type(), "cancel");
        assert_eq!(Value::UInt(1).action_type(), "");
        assert_eq!(fields.to_value(), Ok(Value::Fields(fields)));
    }

    #[test]
    fn raw_documents_of_known_type_are_validated() {
        let swapped = Fields::new().with("cancels", Vec::<Value>::new()).with("type", "cancel");
        let err = swapped.to_value().unwrap_err();
        assert_eq!(err.schema, "cancel");
        assert_eq!(err.field, "type");
        assert_eq!(err.kind, ViolationKind::OutOfOrder);
        assert_eq!(Value::Fields(swapped).to_value().unwrap_err().field, "type");

        let unknown = Fields::new().with("zeta", 1u64).with("type", "noop");
        assert_eq!(unknown.to_value(), Ok(Value::Fields(unknown.clone())));
    }
}
