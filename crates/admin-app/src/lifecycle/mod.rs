//! # System Wiring & Observability
//!
//! The clients are simple; wiring them together is where the decisions live.
//! This module owns both:
//!
//! 1. **Provider construction** - one [`RestDataProvider`](data_provider::RestDataProvider)
//!    built from a [`ProviderConfig`](data_provider::ProviderConfig)
//! 2. **Client wiring** - every typed client shares that provider
//! 3. **Observability setup** - [`setup_tracing`] for the binary
//!
//! ## The AdminSystem Pattern
//!
//! ```rust,ignore
//! impl AdminSystem {
//!     pub fn with_provider(provider: Arc<dyn DataProvider>) -> Self {
//!         let customers = ResourceClient::<Customer>::new(provider.clone());
//!         let products = ResourceClient::<Product>::new(provider.clone());
//!         let orders = ResourceClient::<Order>::new(provider.clone());
//!
//!         Self {
//!             // Orders check customers and products before they are placed.
//!             order_client: OrderClient::new(orders, customers.clone(), products.clone()),
//!             customer_client: CustomerClient::new(customers),
//!             product_client: ProductClient::new(products),
//!             provider,
//!         }
//!     }
//! }
//! ```
//!
//! There is nothing to start or shut down: the provider holds no state
//! between calls, and dropping the system drops the HTTP connection pool.
//!
//! ## Swapping the backend
//!
//! [`AdminSystem::with_provider`] accepts any
//! [`DataProvider`](data_provider::DataProvider). Tests pass a provider over
//! [`MockTransport`](data_provider::mock::MockTransport); a different backend
//! dialect would be a different provider, with no change to the clients.
//!
//! ## Observability & Tracing
//!
//! ```bash
//! RUST_LOG=info cargo run      # One line per response
//! RUST_LOG=debug cargo run     # Requests with full URLs and bodies
//! ```

pub mod admin_system;
pub mod tracing;

pub use self::admin_system::*;
pub use self::tracing::*;
