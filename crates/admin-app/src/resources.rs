//! # Resource Registry
//!
//! The admin UI manages three collections. Each one is a [`ResourceKind`],
//! and each typed model implements [`AdminResource`] to say which collection
//! it lives in and what its payloads look like.
//!
//! | Kind | Collection | Model | Create | Update |
//! |---|---|---|---|---|
//! | [`ResourceKind::Products`] | `products` | [`Product`] | [`ProductCreate`] | [`ProductUpdate`] |
//! | [`ResourceKind::Orders`] | `orders` | [`Order`] | [`OrderCreate`] | [`OrderUpdate`] |
//! | [`ResourceKind::Customers`] | `customers` | [`Customer`] | [`CustomerCreate`] | [`CustomerUpdate`] |
//!
//! The collection name is the only thing the data provider ever learns about
//! a resource.

use crate::model::{
    Customer, CustomerCreate, CustomerId, CustomerUpdate, Order, OrderCreate, OrderId,
    OrderUpdate, Product, ProductCreate, ProductId, ProductUpdate,
};
use data_provider::Identifier;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// The collections exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Products,
    Orders,
    Customers,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Products,
        ResourceKind::Orders,
        ResourceKind::Customers,
    ];

    /// Collection name, used as the first path segment.
    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Products => "products",
            ResourceKind::Orders => "orders",
            ResourceKind::Customers => "customers",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown resource: {s}"))
    }
}

/// A typed record of one admin collection.
pub trait AdminResource:
    Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static
{
    const KIND: ResourceKind;

    type Id: Copy + Debug + Display + Into<Identifier> + Send + Sync;
    type Create: Serialize + Debug + Send + Sync;
    type Update: Serialize + Debug + Send + Sync;

    fn id(&self) -> Self::Id;
}

impl AdminResource for Product {
    const KIND: ResourceKind = ResourceKind::Products;
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;

    fn id(&self) -> ProductId {
        self.id
    }
}

impl AdminResource for Order {
    const KIND: ResourceKind = ResourceKind::Orders;
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;

    fn id(&self) -> OrderId {
        self.id
    }
}

impl AdminResource for Customer {
    const KIND: ResourceKind = ResourceKind::Customers;
    type Id = CustomerId;
    type Create = CustomerCreate;
    type Update = CustomerUpdate;

    fn id(&self) -> CustomerId {
        self.id
    }
}
