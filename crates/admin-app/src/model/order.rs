/// A customer order (`/orders`).
///
/// Orders reference a [`Customer`](crate::model::Customer) and a
/// [`Product`](crate::model::Product) by id; the backend stores the foreign
/// keys as plain integer columns, which is what reference queries filter on.
use crate::model::{CustomerId, ProductId};
use chrono::NaiveDate;
use data_provider::Identifier;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub i64);

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<OrderId> for Identifier {
    fn from(id: OrderId) -> Self {
        Identifier::Number(id.0)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: u32,
    /// Serialized as `YYYY-MM-DD`.
    pub order_date: NaiveDate,
}

/// Payload for creating a new order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderCreate {
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub order_date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_date: Option<NaiveDate>,
}
