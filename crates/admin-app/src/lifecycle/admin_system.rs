use crate::clients::{CustomerClient, OrderClient, ProductClient, ResourceClient};
use crate::model::{Customer, Order, Product};
use data_provider::{ConfigError, DataProvider, ProviderConfig, RestDataProvider};
use std::sync::Arc;
use tracing::info;

/// The typed clients of the admin UI, wired to one data provider.
///
/// # Example
///
/// ```ignore
/// let system = AdminSystem::from_env()?;
///
/// let customer = system.customer_client.register(customer_data).await?;
/// let product = system.product_client.create_product(product_data).await?;
/// let order = system.order_client.place_order(order_data).await?;
/// ```
pub struct AdminSystem {
    pub product_client: ProductClient,

    /// Checks customers and products before placing orders.
    pub order_client: OrderClient,

    pub customer_client: CustomerClient,

    provider: Arc<dyn DataProvider>,
}

impl AdminSystem {
    /// Builds the system over HTTP with the given configuration.
    pub fn new(config: ProviderConfig) -> Self {
        info!(
            base_url = %config.base_url(),
            create_policy = ?config.create_policy(),
            "Connecting data provider"
        );
        Self::with_provider(Arc::new(RestDataProvider::new(config)))
    }

    /// Reads the base URL from `ADMIN_API_URL`, falling back to the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(ProviderConfig::from_env()?))
    }

    pub fn with_provider(provider: Arc<dyn DataProvider>) -> Self {
        let customers = ResourceClient::<Customer>::new(provider.clone());
        let products = ResourceClient::<Product>::new(provider.clone());
        let orders = ResourceClient::<Order>::new(provider.clone());

        Self {
            order_client: OrderClient::new(orders, customers.clone(), products.clone()),
            customer_client: CustomerClient::new(customers),
            product_client: ProductClient::new(products),
            provider,
        }
    }

    /// The shared provider, for callers that work with untyped records.
    pub fn provider(&self) -> &Arc<dyn DataProvider> {
        &self.provider
    }
}
