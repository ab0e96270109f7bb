//! # Product Client
//!
//! Provides a high-level API for the `products` collection.
//! It wraps a `ResourceClient<Product>` and exposes domain-specific methods.
use crate::clients::admin_client::AdminClient;
use crate::clients::error::ClientError;
use crate::clients::resource_client::{Page, ResourceClient};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use data_provider::{Filter, GetListParams, Identifier, Pagination, Sort};
use serde_json::json;
use tracing::{debug, info, instrument};

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Invalid product: {0}")]
    Validation(String),
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Client for the `products` collection.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        validate_name(&params.name)?;
        validate_price(params.price)?;
        let product = self.inner.create(params).await?;
        info!(product_id = %product.id, "Created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        patch: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
        }
        Ok(self.inner.patch(id, &patch).await?)
    }

    /// Free-text search on the backend's `q` filter, sorted by name.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        q: &str,
        pagination: Pagination,
    ) -> Result<Page<Product>, ProductError> {
        let mut filter = Filter::new();
        filter.insert("q".to_string(), json!(q));
        let params = GetListParams {
            pagination,
            sort: Sort::asc("name"),
            filter,
        };
        Ok(self.inner.list(params).await?)
    }

    #[instrument(skip(self))]
    pub async fn in_stock(&self, pagination: Pagination) -> Result<Page<Product>, ProductError> {
        let mut filter = Filter::new();
        filter.insert("in_stock".to_string(), json!(true));
        let params = GetListParams {
            pagination,
            sort: Sort::default(),
            filter,
        };
        Ok(self.inner.list(params).await?)
    }

    /// Flips the stock flag of several products in one request.
    #[instrument(skip(self))]
    pub async fn set_in_stock(
        &self,
        ids: &[ProductId],
        in_stock: bool,
    ) -> Result<Vec<Identifier>, ProductError> {
        let patch = ProductUpdate {
            in_stock: Some(in_stock),
            ..Default::default()
        };
        let updated = self.inner.update_many(ids, &patch).await?;
        info!(count = updated.len(), in_stock, "Stock flag updated");
        Ok(updated)
    }
}

#[async_trait]
impl AdminClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: ClientError) -> Self::Error {
        ProductError::Client(e)
    }
}

fn validate_name(name: &str) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::Validation("name is required".into()));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ProductError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ProductError::Validation(format!(
            "price must be a non-negative number, got {price}"
        )));
    }
    Ok(())
}
