//! # Order Client
//!
//! Provides a high-level API for the `orders` collection.
//! It wraps a `ResourceClient<Order>` and handles orchestration logic: an
//! order is only sent once its customer and product are known to exist and
//! the product is in stock.
use crate::clients::admin_client::AdminClient;
use crate::clients::error::ClientError;
use crate::clients::resource_client::{Page, ResourceClient};
use crate::model::{
    Customer, CustomerId, Order, OrderCreate, OrderId, OrderUpdate, Product, ProductId,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use data_provider::{Filter, Pagination, Sort};
use tracing::{debug, info, instrument, warn};

/// Orders dated before this day are rejected.
pub const EARLIEST_ORDER_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2020, 1, 1) {
    Some(date) => date,
    None => panic!("invalid earliest order date"),
};

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Invalid order: {0}")]
    Validation(String),
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
    #[error("Product out of stock: {0}")]
    OutOfStock(ProductId),
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Client for the `orders` collection.
///
/// Holds clients for customers and products so that orders can be checked
/// against them before they are placed.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    customers: ResourceClient<Customer>,
    products: ResourceClient<Product>,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        customers: ResourceClient<Customer>,
        products: ResourceClient<Product>,
    ) -> Self {
        Self {
            inner,
            customers,
            products,
        }
    }

    #[instrument(skip(self))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!("place_order called");
        validate_quantity(params.quantity)?;
        validate_date(params.order_date)?;

        if self.customers.find(params.customer_id).await?.is_none() {
            warn!(customer_id = %params.customer_id, "Unknown customer");
            return Err(OrderError::CustomerNotFound(params.customer_id));
        }
        match self.products.find(params.product_id).await? {
            None => return Err(OrderError::ProductNotFound(params.product_id)),
            Some(product) if !product.in_stock => {
                return Err(OrderError::OutOfStock(params.product_id))
            }
            Some(_) => {}
        }

        info!("Sending order to backend");
        let order = self.inner.create(params).await?;
        info!(order_id = %order.id, "Created");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn update_order(&self, id: OrderId, patch: OrderUpdate) -> Result<Order, OrderError> {
        debug!("Sending request");
        if let Some(quantity) = patch.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(date) = patch.order_date {
            validate_date(date)?;
        }
        Ok(self.inner.patch(id, &patch).await?)
    }

    /// Orders placed by one customer, newest first.
    #[instrument(skip(self))]
    pub async fn orders_for_customer(
        &self,
        customer_id: CustomerId,
        pagination: Pagination,
    ) -> Result<Page<Order>, OrderError> {
        Ok(self
            .inner
            .get_many_reference(
                "customer_id",
                customer_id,
                pagination,
                Sort::desc("order_date"),
                Filter::new(),
            )
            .await?)
    }

    /// Orders for one product, newest first.
    #[instrument(skip(self))]
    pub async fn orders_for_product(
        &self,
        product_id: ProductId,
        pagination: Pagination,
    ) -> Result<Page<Order>, OrderError> {
        Ok(self
            .inner
            .get_many_reference(
                "product_id",
                product_id,
                pagination,
                Sort::desc("order_date"),
                Filter::new(),
            )
            .await?)
    }
}

#[async_trait]
impl AdminClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: ClientError) -> Self::Error {
        OrderError::Client(e)
    }
}

fn validate_quantity(quantity: u32) -> Result<(), OrderError> {
    if quantity == 0 {
        return Err(OrderError::Validation("quantity must be at least 1".into()));
    }
    Ok(())
}

fn validate_date(date: NaiveDate) -> Result<(), OrderError> {
    if date < EARLIEST_ORDER_DATE {
        return Err(OrderError::Validation(format!(
            "order date must be on or after {EARLIEST_ORDER_DATE}, got {date}"
        )));
    }
    Ok(())
}
