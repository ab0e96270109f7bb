//! # AdminClient Trait
//!
//! Provides a common interface for resource-specific clients, adding default
//! `get`, `list`, `delete` and `delete_many` methods built on top of a generic
//! [`ResourceClient`].
use crate::clients::error::ClientError;
use crate::clients::resource_client::{Page, ResourceClient};
use crate::resources::AdminResource;
use async_trait::async_trait;
use data_provider::{GetListParams, Identifier};

/// Trait for resource-specific clients to inherit the standard operations.
///
/// An implementor supplies the inner [`ResourceClient`] and an error mapping;
/// everything else comes for free:
///
/// ```rust,ignore
/// #[async_trait]
/// impl AdminClient<Customer> for CustomerClient {
///     type Error = CustomerError;
///
///     fn inner(&self) -> &ResourceClient<Customer> {
///         &self.inner
///     }
///
///     fn map_error(e: ClientError) -> Self::Error {
///         CustomerError::Client(e)
///     }
/// }
///
/// // get(), list(), delete() and delete_many() are provided automatically.
/// let customer = customers.get(CustomerId(7)).await?;
/// ```
#[async_trait]
pub trait AdminClient<R: AdminResource>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<R>;

    /// Map client errors to the specific resource error type.
    fn map_error(e: ClientError) -> Self::Error;

    /// Fetch a record by ID. A record the backend does not know is `None`.
    #[tracing::instrument(skip(self), fields(resource = %R::KIND))]
    async fn get(&self, id: R::Id) -> Result<Option<R>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().find(id).await.map_err(Self::map_error)
    }

    /// Fetch one page of the collection.
    #[tracing::instrument(skip(self), fields(resource = %R::KIND))]
    async fn list(&self, params: GetListParams) -> Result<Page<R>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(params).await.map_err(Self::map_error)
    }

    /// Delete a record by ID. `None` when the backend returned no record.
    #[tracing::instrument(skip(self), fields(resource = %R::KIND))]
    async fn delete(&self, id: R::Id) -> Result<Option<R>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Delete several records in one request.
    #[tracing::instrument(skip(self), fields(resource = %R::KIND))]
    async fn delete_many(&self, ids: &[R::Id]) -> Result<Vec<Identifier>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete_many(ids).await.map_err(Self::map_error)
    }
}
