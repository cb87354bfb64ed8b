//! The order action and the order wire it carries.

use serde::{Deserialize, Serialize};

use super::{ActionDocument, Cloid};
use crate::address::Address;
use crate::schema::definitions::{BUILDER, LIMIT, ORDER_ACTION, ORDER_WIRE, TRIGGER};
use crate::schema::{FieldsBuilder, SchemaViolation};
use crate::value::{Fields, Value};

/// Time in force of a limit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tif {
    /// Add liquidity only (post-only).
    Alo,
    /// Immediate or cancel.
    Ioc,
    /// Good til cancelled.
    Gtc,
}

impl Tif {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tif::Alo => "Alo",
            Tif::Ioc => "Ioc",
            Tif::Gtc => "Gtc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tpsl {
    Tp,
    Sl,
}

impl Tpsl {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tpsl::Tp => "tp",
            Tpsl::Sl => "sl",
        }
    }
}

/// How the orders of one action relate to each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Grouping {
    #[default]
    Na,
    NormalTpsl,
    PositionTpsl,
}

impl Grouping {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grouping::Na => "na",
            Grouping::NormalTpsl => "normalTpsl",
            Grouping::PositionTpsl => "positionTpsl",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderType {
    Limit {
        tif: Tif,
    },
    Trigger {
        is_market: bool,
        /// Canonical decimal text.
        trigger_px: String,
        tpsl: Tpsl,
    },
}

impl OrderType {
    /// `{limit: {tif}}` or `{trigger: {isMarket, triggerPx, tpsl}}`.
    pub fn to_fields(&self) -> Result<Fields, SchemaViolation> {
        let (name, inner) = match self {
            OrderType::Limit { tif } => (
                LIMIT.name,
                FieldsBuilder::new(&LIMIT).set("tif", tif.as_str()).build()?,
            ),
            OrderType::Trigger {
                is_market,
                trigger_px,
                tpsl,
            } => (
                TRIGGER.name,
                FieldsBuilder::new(&TRIGGER)
                    .set("isMarket", *is_market)
                    .set("triggerPx", Value::decimal(trigger_px.as_str()))
                    .set("tpsl", tpsl.as_str())
                    .build()?,
            ),
        };
        Ok(Fields::new().with(name, inner))
    }
}

/// One order as it appears inside an action.
///
/// Prices and sizes are decimal text and are written exactly as given; use
/// [`float_to_wire`](super::float_to_wire) to produce them from floats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderWire {
    pub asset: u32,
    pub is_buy: bool,
    pub limit_px: String,
    pub sz: String,
    pub reduce_only: bool,
    pub order_type: OrderType,
    pub cloid: Option<Cloid>,
}

impl OrderWire {
    pub fn new(
        asset: u32,
        is_buy: bool,
        limit_px: impl Into<String>,
        sz: impl Into<String>,
        reduce_only: bool,
        order_type: OrderType,
    ) -> Self {
        Self {
            asset,
            is_buy,
            limit_px: limit_px.into(),
            sz: sz.into(),
            reduce_only,
            order_type,
            cloid: None,
        }
    }

    pub fn with_cloid(mut self, cloid: Cloid) -> Self {
        self.cloid = Some(cloid);
        self
    }

    pub fn to_fields(&self) -> Result<Fields, SchemaViolation> {
        FieldsBuilder::new(&ORDER_WIRE)
            .set("a", self.asset)
            .set("b", self.is_buy)
            .set("c", self.cloid)
            .set("p", Value::decimal(self.limit_px.as_str()))
            .set("r", self.reduce_only)
            .set("s", Value::decimal(self.sz.as_str()))
            .set("t", self.order_type.to_fields()?)
            .build()
    }
}

/// Builder fee attribution: `{b: address, f: fee}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderInfo {
    pub address: Address,
    /// Fee in tenths of a basis point.
    pub fee: u64,
}

impl BuilderInfo {
    pub fn to_fields(&self) -> Result<Fields, SchemaViolation> {
        FieldsBuilder::new(&BUILDER)
            .set("b", self.address.to_string())
            .set("f", self.fee)
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAction {
    pub orders: Vec<OrderWire>,
    pub grouping: Grouping,
    pub builder: Option<BuilderInfo>,
}

impl OrderAction {
    pub fn new(orders: Vec<OrderWire>) -> Self {
        Self {
            orders,
            grouping: Grouping::Na,
            builder: None,
        }
    }

    pub fn with_grouping(mut self, grouping: Grouping) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn with_builder(mut self, builder: BuilderInfo) -> Self {
        self.builder = Some(builder);
        self
    }
}

impl ActionDocument for OrderAction {
    fn action_type(&self) -> &str {
        ORDER_ACTION.name
    }

    fn to_value(&self) -> Result<Value, SchemaViolation> {
        let orders = self
            .orders
            .iter()
            .map(|order| order.to_fields().map(Value::Fields))
            .collect::<Result<Vec<_>, _>>()?;
        let builder = self.builder.as_ref().map(BuilderInfo::to_fields).transpose()?;
        FieldsBuilder::new(&ORDER_ACTION)
            .set("type", ORDER_ACTION.name)
            .set("orders", orders)
            .set("grouping", self.grouping.as_str())
            .set("builder", builder)
            .build()
            .map(Value::Fields)
    }
}
