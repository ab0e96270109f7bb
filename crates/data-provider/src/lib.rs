//! # Data Provider
//!
//! This crate translates a small, fixed set of generic data operations into
//! HTTP requests against a REST backend, and normalizes what comes back into
//! the shapes an admin UI depends on.
//!
//! ## The Contract
//!
//! Views never build URLs. They call one of nine operations on a
//! [`DataProvider`] with a resource name (`"products"`, `"orders"`,
//! `"customers"`) and a parameter struct:
//!
//! | Operation | Parameters | Result |
//! |---|---|---|
//! | `get_list` | [`GetListParams`] | [`ListResult`] |
//! | `get_one` | [`GetOneParams`] | [`SingleResult`] |
//! | `get_many` | [`GetManyParams`] | [`ManyResult`] |
//! | `get_many_reference` | [`GetManyReferenceParams`] | [`ListResult`] |
//! | `create` | [`CreateParams`] | [`SingleResult`] |
//! | `update` | [`UpdateParams`] | [`SingleResult`] |
//! | `update_many` | [`UpdateManyParams`] | [`BulkResult`] |
//! | `delete` | [`DeleteParams`] | [`SingleResult`] |
//! | `delete_many` | [`DeleteManyParams`] | [`BulkResult`] |
//!
//! Every record handed back carries an `id`, because callers index all their
//! state by it.
//!
//! ## The Wire Dialect
//!
//! Collection requests encode paging, sorting and filtering as three JSON
//! query parameters:
//!
//! ```text
//! GET /api/products?filter={"in_stock":true}&range=[10,19]&sort=["price","DESC"]
//! ```
//!
//! (URL-encoded on the wire.) See [`query`] for the encoding and [`route`] for
//! the method and path of each operation, including the `POST
//! /{resource}/bulk-delete` exception used by `delete_many`.
//!
//! ## Architecture Overview
//!
//! 1. **Contract Layer** ([`DataProvider`]) - What the UI calls
//! 2. **Translation Layer** ([`RestDataProvider`]) - Encoding, routing, normalization
//! 3. **Transport Layer** ([`Transport`]) - One HTTP exchange, nothing more
//!
//! Configuration ([`ProviderConfig`]) and the transport are passed in at
//! construction. There is no global provider.
//!
//! ```rust,no_run
//! use data_provider::{
//!     DataProvider, GetManyReferenceParams, Identifier, Pagination, ProviderConfig,
//!     RestDataProvider, Sort,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = RestDataProvider::new(ProviderConfig::new("http://localhost:3000/api")?);
//!
//!     // Orders of customer 7, newest first.
//!     let orders = provider
//!         .get_many_reference(
//!             "orders",
//!             GetManyReferenceParams {
//!                 target: "customer_id".into(),
//!                 id: Identifier::from(7),
//!                 pagination: Pagination::new(1, 25),
//!                 sort: Sort::desc("order_date"),
//!                 filter: Default::default(),
//!             },
//!         )
//!         .await?;
//!     println!("{} orders", orders.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Every operation returns [`ProviderError`]: transport failure, non-2xx
//! status (with status and body), malformed response, or parameters that
//! could not be encoded. Nothing is retried or swallowed.
//!
//! ## Observability
//!
//! The provider reports each request, response and error to a
//! [`RequestObserver`]. The default [`TracingObserver`] logs through
//! `tracing`; see [`observer`].
//!
//! ## Testing
//!
//! [`mock::MockTransport`] replaces the network with a queue of canned
//! responses and records every request sent. See the [`mock`] module.

pub mod config;
pub mod error;
pub mod mock;
pub mod observer;
pub mod params;
pub mod provider;
pub mod query;
pub mod result;
pub mod route;
pub mod transport;

// Re-export core types for convenience
pub use config::{CreatePolicy, ProviderConfig};
pub use error::{ConfigError, OperationContext, ParamError, ProviderError, TransportError};
pub use observer::{NoopObserver, RequestObserver, TracingObserver};
pub use params::{
    CreateParams, DeleteManyParams, DeleteParams, Filter, GetListParams, GetManyParams,
    GetManyReferenceParams, GetOneParams, Identifier, Pagination, Record, Sort, SortOrder,
    UpdateManyParams, UpdateParams,
};
pub use provider::{DataProvider, RestDataProvider};
pub use result::{BulkResult, ListResult, ManyResult, SingleResult};
pub use route::{Method, Operation, Route, Target};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
