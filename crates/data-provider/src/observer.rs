//! # Request Observability
//!
//! The provider reports on every call through a [`RequestObserver`] at three
//! points: before the request is sent, when a response arrives (any status),
//! and when the call ends in an error. The observer only watches; it cannot
//! change the request or the outcome.
//!
//! [`TracingObserver`] is the default and emits structured `tracing` events:
//!
//! ```text
//! DEBUG Request operation="list" resource="products" method="GET" url="http://localhost:3000/api/products?filter=..."
//! INFO  Response operation="list" resource="products" status=200 elapsed_ms=12
//! WARN  Failed operation="delete-many" resource="orders" ids="[1, 2]" error=delete-many orders [1, 2]: backend responded with status 500
//! ```
//!
//! Pass a custom implementation to
//! [`RestDataProvider::with_observer`](crate::provider::RestDataProvider::with_observer)
//! to collect metrics or assertions instead.

use crate::error::{OperationContext, ProviderError};
use crate::transport::{HttpRequest, HttpResponse};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Hooks invoked by the provider. All methods default to doing nothing.
pub trait RequestObserver: Send + Sync {
    fn on_request(&self, _context: &OperationContext, _request: &HttpRequest) {}

    fn on_response(
        &self,
        _context: &OperationContext,
        _response: &HttpResponse,
        _elapsed: Duration,
    ) {
    }

    fn on_error(&self, _context: &OperationContext, _error: &ProviderError) {}
}

/// Emits one `tracing` event per hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_request(&self, context: &OperationContext, request: &HttpRequest) {
        debug!(
            operation = %context.operation,
            resource = %context.resource,
            method = %request.method,
            url = %request.url,
            body = ?request.body,
            "Request"
        );
    }

    fn on_response(&self, context: &OperationContext, response: &HttpResponse, elapsed: Duration) {
        info!(
            operation = %context.operation,
            resource = %context.resource,
            status = response.status,
            elapsed_ms = elapsed.as_millis() as u64,
            "Response"
        );
    }

    fn on_error(&self, context: &OperationContext, error: &ProviderError) {
        warn!(
            operation = %context.operation,
            resource = %context.resource,
            ids = ?context.ids,
            error = %error,
            "Failed"
        );
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RequestObserver for NoopObserver {}
