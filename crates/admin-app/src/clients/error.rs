//! # Client Errors
//!
//! [`ClientError`] is what the typed layer adds on top of
//! [`ProviderError`]: payloads that do not serialize to a record, and
//! records the backend returned that do not fit the model.

use crate::resources::ResourceKind;
use data_provider::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("could not encode {resource} payload: {source}")]
    Encode {
        resource: ResourceKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("{resource} payload is not a JSON object")]
    NotARecord { resource: ResourceKind },

    #[error("could not decode {resource} record: {source}")]
    Decode {
        resource: ResourceKind,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// HTTP status, when the backend rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Provider(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
