use super::{ActionDocument, Cloid};
use crate::schema::definitions::{
    CANCEL_ACTION, CANCEL_BY_CLOID_ACTION, CANCEL_BY_CLOID_WIRE, CANCEL_WIRE,
};
use crate::schema::{FieldsBuilder, SchemaViolation};
use crate::value::{Fields, Value};

/// Cancel by exchange order id: `{a, o}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancel {
    pub asset: u32,
    pub oid: u64,
}

impl Cancel {
    pub fn to_fields(&self) -> Result<Fields, SchemaViolation> {
        FieldsBuilder::new(&CANCEL_WIRE)
            .set("a", self.asset)
            .set("o", self.oid)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelAction {
    pub cancels: Vec<Cancel>,
}

impl ActionDocument for CancelAction {
    fn action_type(&self) -> &str {
        CANCEL_ACTION.name
    }

    fn to_value(&self) -> Result<Value, SchemaViolation> {
        let cancels = self
            .cancels
            .iter()
            .map(|cancel| cancel.to_fields().map(Value::Fields))
            .collect::<Result<Vec<_>, _>>()?;
        FieldsBuilder::new(&CANCEL_ACTION)
            .set("type", CANCEL_ACTION.name)
            .set("cancels", cancels)
            .build()
            .map(Value::Fields)
    }
}

/// Cancel by client order id: `{asset, cloid}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelByCloid {
    pub asset: u32,
    pub cloid: Cloid,
}

impl CancelByCloid {
    pub fn to_fields(&self) -> Result<Fields, SchemaViolation> {
        FieldsBuilder::new(&CANCEL_BY_CLOID_WIRE)
            .set("asset", self.asset)
            .set("cloid", self.cloid)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelByCloidAction {
    pub cancels: Vec<CancelByCloid>,
}

impl ActionDocument for CancelByCloidAction {
    fn action_type(&self) -> &str {
        CANCEL_BY_CLOID_ACTION.name
    }

    fn to_value(&self) -> Result<Value, SchemaViolation> {
        let cancels = self
            .cancels
            .iter()
            .map(|cancel| cancel.to_fields().map(Value::Fields))
            .collect::<Result<Vec<_>, _>>()?;
        FieldsBuilder::new(&CANCEL_BY_CLOID_ACTION)
            .set("type", CANCEL_BY_CLOID_ACTION.name)
            .set("cancels", cancels)
            .build()
            .map(Value::Fields)
    }
}
