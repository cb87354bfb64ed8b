use super::{ActionDocument, Cloid, OrderWire};
use crate::schema::definitions::{BATCH_MODIFY_ACTION, MODIFY_ACTION, MODIFY_WIRE};
use crate::schema::{FieldsBuilder, SchemaViolation};
use crate::value::{Fields, Value};

/// The order being modified: an exchange order id or a client order id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderRef {
    Oid(u64),
    Cloid(Cloid),
}

impl From<u64> for OrderRef {
    fn from(oid: u64) -> Self {
        OrderRef::Oid(oid)
    }
}

impl From<Cloid> for OrderRef {
    fn from(cloid: Cloid) -> Self {
        OrderRef::Cloid(cloid)
    }
}

impl From<OrderRef> for Value {
    fn from(order_ref: OrderRef) -> Self {
        match order_ref {
            OrderRef::Oid(oid) => Value::UInt(oid),
            OrderRef::Cloid(cloid) => cloid.into(),
        }
    }
}

/// One entry of a batch modify: `{oid, order}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modify {
    pub oid: OrderRef,
    pub order: OrderWire,
}

impl Modify {
    pub fn new(oid: impl Into<OrderRef>, order: OrderWire) -> Self {
        Self {
            oid: oid.into(),
            order,
        }
    }

    pub fn to_fields(&self) -> Result<Fields, SchemaViolation> {
        FieldsBuilder::new(&MODIFY_WIRE)
            .set("oid", self.oid)
            .set("order", self.order.to_fields()?)
            .build()
    }
}

/// A single modify: `{type: "modify", oid, order}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyAction(pub Modify);

impl ActionDocument for ModifyAction {
    fn action_type(&self) -> &str {
        MODIFY_ACTION.name
    }

    fn to_value(&self) -> Result<Value, SchemaViolation> {
        FieldsBuilder::new(&MODIFY_ACTION)
            .set("type", MODIFY_ACTION.name)
            .set("oid", self.0.oid)
            .set("order", self.0.order.to_fields()?)
            .build()
            .map(Value::Fields)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchModifyAction {
    pub modifies: Vec<Modify>,
}

impl ActionDocument for BatchModifyAction {
    fn action_type(&self) -> &str {
        BATCH_MODIFY_ACTION.name
    }

    fn to_value(&self) -> Result<Value, SchemaViolation> {
        let modifies = self
            .modifies
            .iter()
            .map(|modify| modify.to_fields().map(Value::Fields))
            .collect::<Result<Vec<_>, _>>()?;
        FieldsBuilder::new(&BATCH_MODIFY_ACTION)
            .set("type", BATCH_MODIFY_ACTION.name)
            .set("modifies", modifies)
            .build()
            .map(Value::Fields)
    }
}
