//! # Customer Client
//!
//! Provides a high-level API for the `customers` collection.
use crate::clients::admin_client::AdminClient;
use crate::clients::error::ClientError;
use crate::clients::resource_client::ResourceClient;
use crate::model::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
use async_trait::async_trait;
use data_provider::{Filter, GetListParams, Pagination, Sort};
use serde_json::json;
use tracing::{debug, info, instrument};

#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("Invalid customer: {0}")]
    Validation(String),
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Client for the `customers` collection.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl CustomerClient {
    pub fn new(inner: ResourceClient<Customer>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn register(&self, params: CustomerCreate) -> Result<Customer, CustomerError> {
        debug!("Sending request");
        validate_name(&params.name)?;
        validate_email(&params.email)?;
        let customer = self.inner.create(params).await?;
        info!(customer_id = %customer.id, "Created");
        Ok(customer)
    }

    #[instrument(skip(self))]
    pub async fn update_customer(
        &self,
        id: CustomerId,
        patch: CustomerUpdate,
    ) -> Result<Customer, CustomerError> {
        debug!("Sending request");
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        if let Some(email) = &patch.email {
            validate_email(email)?;
        }
        Ok(self.inner.patch(id, &patch).await?)
    }

    /// The customer registered under `email`, if any.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, CustomerError> {
        let mut filter = Filter::new();
        filter.insert("email".to_string(), json!(email));
        let params = GetListParams {
            pagination: Pagination::new(1, 1),
            sort: Sort::default(),
            filter,
        };
        let page = self.inner.list(params).await?;
        Ok(page.items.into_iter().next())
    }

    pub async fn get_many(&self, ids: &[CustomerId]) -> Result<Vec<Customer>, CustomerError> {
        Ok(self.inner.get_many(ids).await?)
    }
}

#[async_trait]
impl AdminClient<Customer> for CustomerClient {
    type Error = CustomerError;

    fn inner(&self) -> &ResourceClient<Customer> {
        &self.inner
    }

    fn map_error(e: ClientError) -> Self::Error {
        CustomerError::Client(e)
    }
}

fn validate_name(name: &str) -> Result<(), CustomerError> {
    if name.trim().is_empty() {
        return Err(CustomerError::Validation("name is required".into()));
    }
    Ok(())
}

/// `local@domain.tld`, nothing stricter.
fn validate_email(email: &str) -> Result<(), CustomerError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    };
    if !valid {
        return Err(CustomerError::Validation(format!("invalid email {email:?}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_provider::mock::MockTransport;
    use data_provider::{Method, ProviderConfig, RestDataProvider};
    use std::sync::Arc;

    fn customer_client(mock: &MockTransport) -> CustomerClient {
        let provider = RestDataProvider::with_transport(ProviderConfig::default(), mock.clone());
        CustomerClient::new(ResourceClient::new(Arc::new(provider)))
    }

    #[test]
    fn test_email_validation() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("ada@mail.example.org").is_ok());
        assert!(validate_email("ada").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ada@example").is_err());
        assert!(validate_email("ada@@example.com").is_err());
    }

    #[tokio::test]
    async fn test_register_returns_typed_customer() {
        let mock = MockTransport::new();
        mock.expect(Method::Post, "/api/customers")
            .return_json(201, json!({"data": {"id": 3}}));

        let customer = customer_client(&mock)
            .register(CustomerCreate {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                address: None,
            })
            .await
            .unwrap();

        assert_eq!(customer.id, CustomerId(3));
        assert_eq!(customer.email, "ada@example.com");
        assert_eq!(customer.address, None);
        mock.verify();
    }

    #[tokio::test]
    async fn test_update_customer_sends_every_field() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/api/customers/3").return_json(
            200,
            json!({"data": {"id": 3, "name": "Ada", "email": "ada@example.com", "address": "1 Loop Rd"}}),
        );
        mock.expect(Method::Put, "/api/customers/3")
            .return_json(200, json!({"data": "Customer updated successfully"}));

        let customer = customer_client(&mock)
            .update_customer(
                CustomerId(3),
                CustomerUpdate {
                    email: Some("new@example.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(customer.email, "new@example.com");
        assert_eq!(customer.name, "Ada");
        assert_eq!(
            mock.last_request().unwrap().body,
            Some(json!({
                "id": 3,
                "name": "Ada",
                "email": "new@example.com",
                "address": "1 Loop Rd"
            }))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_invalid_email_update_sends_nothing() {
        let mock = MockTransport::new();
        let err = customer_client(&mock)
            .update_customer(
                CustomerId(3),
                CustomerUpdate {
                    email: Some("nope".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CustomerError::Validation(_)));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_email_takes_first_match() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/api/customers").return_json(
            200,
            json!({"data": [{"id": 4, "name": "Bob", "email": "bob@example.com"}], "total": 1}),
        );
        mock.expect(Method::Get, "/api/customers")
            .return_json(200, json!({"data": [], "total": 0}));

        let client = customer_client(&mock);
        let bob = client.find_by_email("bob@example.com").await.unwrap();
        assert_eq!(bob.map(|c| c.id), Some(CustomerId(4)));
        assert!(client.find_by_email("nobody@example.com").await.unwrap().is_none());

        let request = mock.last_request().unwrap();
        assert_eq!(request.query_param("range").as_deref(), Some("[0,0]"));
    }
}
