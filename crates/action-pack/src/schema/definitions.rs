//! Field order for every supported action document.
//!
//! Declaration order below is the byte order on the wire. In the order wire
//! `r` (reduce-only) precedes `s` (size).

use super::{FieldSpec, Schema, Shape};

pub const TIF_TAGS: &[&str] = &["Alo", "Ioc", "Gtc"];
pub const TPSL_TAGS: &[&str] = &["tp", "sl"];
pub const GROUPING_TAGS: &[&str] = &["na", "normalTpsl", "positionTpsl"];

pub const LIMIT: Schema = Schema {
    name: "limit",
    fields: &[FieldSpec::required("tif", Shape::Tag(TIF_TAGS))],
};

pub const TRIGGER: Schema = Schema {
    name: "trigger",
    fields: &[
        FieldSpec::required("isMarket", Shape::Bool),
        FieldSpec::required("triggerPx", Shape::Decimal),
        FieldSpec::required("tpsl", Shape::Tag(TPSL_TAGS)),
    ],
};

/// `{"limit": {..}}` or `{"trigger": {..}}`.
pub const ORDER_TYPE: Shape = Shape::Variant(&[&LIMIT, &TRIGGER]);

pub const ORDER_WIRE: Schema = Schema {
    name: "orderWire",
    fields: &[
        FieldSpec::required("a", Shape::UInt),
        FieldSpec::required("b", Shape::Bool),
        FieldSpec::optional("c", Shape::Cloid),
        FieldSpec::required("p", Shape::Decimal),
        FieldSpec::required("r", Shape::Bool),
        FieldSpec::required("s", Shape::Decimal),
        FieldSpec::required("t", ORDER_TYPE),
    ],
};

pub const BUILDER: Schema = Schema {
    name: "builder",
    fields: &[
        FieldSpec::required("b", Shape::Address),
        FieldSpec::required("f", Shape::UInt),
    ],
};

const ORDER_ITEM: Shape = Shape::Nested(&ORDER_WIRE);

pub const ORDER_ACTION: Schema = Schema {
    name: "order",
    fields: &[
        FieldSpec::required("type", Shape::Tag(&["order"])),
        FieldSpec::required("orders", Shape::SequenceOf(&ORDER_ITEM)),
        FieldSpec::required("grouping", Shape::Tag(GROUPING_TAGS)),
        FieldSpec::optional("builder", Shape::Nested(&BUILDER)),
    ],
};

pub const CANCEL_WIRE: Schema = Schema {
    name: "cancelWire",
    fields: &[
        FieldSpec::required("a", Shape::UInt),
        FieldSpec::required("o", Shape::UInt),
    ],
};

const CANCEL_ITEM: Shape = Shape::Nested(&CANCEL_WIRE);

pub const CANCEL_ACTION: Schema = Schema {
    name: "cancel",
    fields: &[
        FieldSpec::required("type", Shape::Tag(&["cancel"])),
        FieldSpec::required("cancels", Shape::SequenceOf(&CANCEL_ITEM)),
    ],
};

pub const CANCEL_BY_CLOID_WIRE: Schema = Schema {
    name: "cancelByCloidWire",
    fields: &[
        FieldSpec::required("asset", Shape::UInt),
        FieldSpec::required("cloid", Shape::Cloid),
    ],
};

const CANCEL_BY_CLOID_ITEM: Shape = Shape::Nested(&CANCEL_BY_CLOID_WIRE);

pub const CANCEL_BY_CLOID_ACTION: Schema = Schema {
    name: "cancelByCloid",
    fields: &[
        FieldSpec::required("type", Shape::Tag(&["cancelByCloid"])),
        FieldSpec::required("cancels", Shape::SequenceOf(&CANCEL_BY_CLOID_ITEM)),
    ],
};

pub const MODIFY_WIRE: Schema = Schema {
    name: "modifyWire",
    fields: &[
        FieldSpec::required("oid", Shape::OrderRef),
        FieldSpec::required("order", ORDER_ITEM),
    ],
};

pub const MODIFY_ACTION: Schema = Schema {
    name: "modify",
    fields: &[
        FieldSpec::required("type", Shape::Tag(&["modify"])),
        FieldSpec::required("oid", Shape::OrderRef),
        FieldSpec::required("order", ORDER_ITEM),
    ],
};

const MODIFY_ITEM: Shape = Shape::Nested(&MODIFY_WIRE);

pub const BATCH_MODIFY_ACTION: Schema = Schema {
    name: "batchModify",
    fields: &[
        FieldSpec::required("type", Shape::Tag(&["batchModify"])),
        FieldSpec::required("modifies", Shape::SequenceOf(&MODIFY_ITEM)),
    ],
};

/// Top-level action schemas, keyed by their `type` tag.
pub const ACTIONS: &[&Schema] = &[
    &ORDER_ACTION,
    &CANCEL_ACTION,
    &CANCEL_BY_CLOID_ACTION,
    &MODIFY_ACTION,
    &BATCH_MODIFY_ACTION,
];

/// The action schema whose `type` tag is `action_type`.
pub fn action_schema(action_type: &str) -> Option<&'static Schema> {
    ACTIONS
        .iter()
        .copied()
        .find(|schema| schema.name == action_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_wire_declares_reduce_only_before_size() {
        let names: Vec<_> = ORDER_WIRE.field_names().collect();
        assert_eq!(names, vec!["a", "b", "c", "p", "r", "s", "t"]);
    }

    #[test]
    fn action_types_lead_with_type_tag() {
        for schema in ACTIONS {
            assert_eq!(schema.fields[0].name, "type");
            assert!(matches!(schema.fields[0].shape, Shape::Tag(tags) if tags == [schema.name]));
        }
        assert_eq!(action_schema("batchModify").map(|s| s.name), Some("batchModify"));
        assert!(action_schema("usdSend").is_none());
    }
}
