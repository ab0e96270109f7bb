//! # Provider Errors
//!
//! Every failure the adapter reports names the operation, the resource and
//! the ids involved ([`OperationContext`]), and falls in one of four kinds:
//!
//! - [`ProviderError::Transport`]: no response was received.
//! - [`ProviderError::HttpStatus`]: the backend answered with a non-2xx status.
//! - [`ProviderError::MalformedResponse`]: a 2xx answer missing `data`, `total`
//!   or `id`, or not JSON at all.
//! - [`ProviderError::InvalidParams`]: the request was never sent because its
//!   parameters cannot be encoded.
//!
//! None of these are retried or recovered from inside the adapter.

use crate::params::Identifier;
use crate::route::Operation;
use std::fmt::{self, Display};

/// Which call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationContext {
    pub operation: Operation,
    pub resource: String,
    pub ids: Vec<Identifier>,
}

impl OperationContext {
    pub fn new(operation: Operation, resource: impl Into<String>) -> Self {
        Self {
            operation,
            resource: resource.into(),
            ids: Vec::new(),
        }
    }

    pub fn with_ids(mut self, ids: impl IntoIterator<Item = Identifier>) -> Self {
        self.ids.extend(ids);
        self
    }
}

impl Display for OperationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operation, self.resource)?;
        if !self.ids.is_empty() {
            let ids: Vec<String> = self.ids.iter().map(ToString::to_string).collect();
            write!(f, " [{}]", ids.join(", "))?;
        }
        Ok(())
    }
}

/// Errors raised by a [`Transport`](crate::transport::Transport).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request could not be sent: {0}")]
    Send(String),
    #[error("response could not be read: {0}")]
    Receive(String),
}

/// Parameters rejected before a request is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    #[error("page must be at least 1")]
    ZeroPage,
    #[error("perPage must be at least 1")]
    ZeroPerPage,
    #[error("range for page {page} with perPage {per_page} overflows")]
    RangeOverflow { page: u64, per_page: u64 },
}

/// Errors returned by every data-provider operation.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{context}: {source}")]
    Transport {
        context: OperationContext,
        #[source]
        source: TransportError,
    },

    #[error("{context}: backend responded with status {status}")]
    HttpStatus {
        context: OperationContext,
        status: u16,
        body: String,
    },

    #[error("{context}: malformed response: {reason}")]
    MalformedResponse {
        context: OperationContext,
        reason: String,
    },

    #[error("{context}: invalid parameters: {source}")]
    InvalidParams {
        context: OperationContext,
        #[source]
        source: ParamError,
    },
}

impl ProviderError {
    pub fn context(&self) -> &OperationContext {
        match self {
            ProviderError::Transport { context, .. }
            | ProviderError::HttpStatus { context, .. }
            | ProviderError::MalformedResponse { context, .. }
            | ProviderError::InvalidParams { context, .. } => context,
        }
    }

    /// HTTP status of a [`ProviderError::HttpStatus`].
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body of a [`ProviderError::HttpStatus`].
    pub fn body(&self) -> Option<&str> {
        match self {
            ProviderError::HttpStatus { body, .. } => Some(body),
            _ => None,
        }
    }

    pub(crate) fn malformed(context: &OperationContext, reason: impl Into<String>) -> Self {
        ProviderError::MalformedResponse {
            context: context.clone(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while building a [`ProviderConfig`](crate::config::ProviderConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("base URL {0:?} must be an http(s) URL with a path")]
    UnsupportedBaseUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_operation_resource_and_ids() {
        let err = ProviderError::HttpStatus {
            context: OperationContext::new(Operation::DeleteMany, "orders")
                .with_ids([Identifier::from(1), Identifier::from(2)]),
            status: 500,
            body: "{\"error\":\"Database error\"}".into(),
        };
        assert_eq!(
            err.to_string(),
            "delete-many orders [1, 2]: backend responded with status 500"
        );
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.context().resource, "orders");
    }

    #[test]
    fn transport_error_keeps_source() {
        let err = ProviderError::Transport {
            context: OperationContext::new(Operation::List, "products"),
            source: TransportError::Send("connection refused".into()),
        };
        assert_eq!(
            err.to_string(),
            "list products: request could not be sent: connection refused"
        );
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.status(), None);
    }
}
