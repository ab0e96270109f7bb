//! # Admin Backend Demo
//!
//! Drives the three admin collections through the data provider against a
//! running backend.
//!
//! ## Core Components
//!
//! - **[`data_provider`]**: The HTTP adapter. Nine generic operations over
//!   `filter`/`range`/`sort` query strings.
//! - **[`model`](admin_app::model)**: Typed records ([`Product`], [`Order`], `Customer`).
//! - **[`clients`](admin_app::clients)**: Typed wrappers that validate input
//!   and hide the untyped records.
//! - **[`lifecycle`](admin_app::lifecycle)**: Wiring and tracing setup.
//!
//! ## Quick Start
//!
//! ```bash
//! ADMIN_API_URL=http://localhost:3000/api RUST_LOG=info cargo run -p admin-app
//! ```
//!
//! The run:
//! 1. Registers a customer and creates a product.
//! 2. Places an [`Order`] for it.
//! 3. Lists the customer's orders through a reference query.
//! 4. Bulk-deletes the orders and the product.

use admin_app::clients::AdminClient;
use admin_app::lifecycle::{setup_tracing, AdminSystem};
use admin_app::model::{CustomerCreate, Order, OrderCreate, Product, ProductCreate};
use chrono::Utc;
use data_provider::Pagination;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let system = AdminSystem::from_env().map_err(|e| e.to_string())?;

    let span = tracing::info_span!("customer_setup");
    let customer = async {
        info!("Registering demo customer");
        system
            .customer_client
            .register(CustomerCreate {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                address: Some("1 Main Street".to_string()),
            })
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("catalogue");
    let product: Product = async {
        system
            .product_client
            .create_product(
                ProductCreate::new("Widget", 19.99, true).with_description("A demo widget"),
            )
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("order_processing");
    let order_result = async {
        info!("Placing order");
        system
            .order_client
            .place_order(OrderCreate {
                customer_id: customer.id,
                product_id: product.id,
                quantity: 2,
                order_date: Utc::now().date_naive(),
            })
            .await
    }
    .instrument(span)
    .await;

    match order_result {
        Ok(order) => info!(order_id = %order.id, "Order processed successfully"),
        Err(e) => error!(error = %e, "Order processing failed"),
    }

    let orders = system
        .order_client
        .orders_for_customer(customer.id, Pagination::new(1, 25))
        .await
        .map_err(|e| e.to_string())?;
    info!(
        customer_id = %customer.id,
        shown = orders.items.len(),
        total = orders.total,
        "Orders for customer"
    );

    let order_ids: Vec<_> = orders.items.iter().map(|o: &Order| o.id).collect();
    if !order_ids.is_empty() {
        let deleted = system
            .order_client
            .delete_many(&order_ids)
            .await
            .map_err(|e| e.to_string())?;
        info!(count = deleted.len(), "Orders deleted");
    }
    system
        .product_client
        .delete(product.id)
        .await
        .map_err(|e| e.to_string())?;

    info!("Demo completed successfully");
    Ok(())
}
