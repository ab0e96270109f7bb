//! Type-safe wrappers around a [`DataProvider`](data_provider::DataProvider).

pub mod admin_client;
pub mod customer_client;
pub mod error;
pub mod order_client;
pub mod product_client;
pub mod resource_client;

pub use admin_client::*;
pub use customer_client::*;
pub use error::*;
pub use order_client::*;
pub use product_client::*;
pub use resource_client::*;
