//! # Mock Transport & Testing Guide
//!
//! [`MockTransport`] stands in for the network in tests. Queue the responses
//! the backend should give, run the provider, then inspect the requests it
//! actually sent.
//!
//! ## When to use the mock vs a real server
//!
//! | Feature | MockTransport | Fake backend (axum) |
//! |---------|---------------|---------------------|
//! | **Speed** | Instant (in-memory) | Binds a local port |
//! | **Determinism** | 100% deterministic | Subject to scheduler |
//! | **Inspects** | Exact method, URL, body sent | Wire encoding end to end |
//! | **Error Injection** | Easy (`return_err`, any status) | Needs handler code |
//!
//! ## Example
//!
//! ```rust
//! use data_provider::mock::MockTransport;
//! use data_provider::{
//!     DataProvider, DeleteManyParams, Identifier, Method, ProviderConfig, RestDataProvider,
//! };
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect(Method::Post, "/api/orders/bulk-delete")
//!         .return_json(200, json!({}));
//!
//!     let provider = RestDataProvider::with_transport(ProviderConfig::default(), mock.clone());
//!     let ids = vec![Identifier::from(1), Identifier::from(2)];
//!     let result = provider
//!         .delete_many("orders", DeleteManyParams { ids: ids.clone() })
//!         .await
//!         .unwrap();
//!
//!     // No `data` in the answer: the requested ids come back.
//!     assert_eq!(result.data, ids);
//!     assert_eq!(mock.requests()[0].body, Some(json!([1, 2])));
//!     mock.verify();
//! }
//! ```
//!
//! ## Simulating failures
//!
//! ```rust
//! use data_provider::mock::MockTransport;
//! use data_provider::{
//!     DataProvider, GetOneParams, Identifier, Method, ProviderConfig, ProviderError,
//!     RestDataProvider, TransportError,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect(Method::Get, "/api/products/1")
//!         .return_err(TransportError::Send("connection refused".into()));
//!
//!     let provider = RestDataProvider::with_transport(ProviderConfig::default(), mock);
//!     let result = provider.get_one("products", GetOneParams { id: Identifier::from(1) }).await;
//!     assert!(matches!(result, Err(ProviderError::Transport { .. })));
//! }
//! ```

use crate::error::TransportError;
use crate::route::Method;
use crate::transport::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One queued exchange: the request expected and what to answer with.
struct Expectation {
    method: Method,
    path: String,
    response: Result<HttpResponse, TransportError>,
}

/// A [`Transport`] answering from a queue of expectations.
///
/// Clones share the queue and the request log, so a test can keep one handle
/// while the provider owns another. A request that does not match the next
/// expectation (or arrives when the queue is empty) panics.
#[derive(Clone, Default)]
pub struct MockTransport {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    /// Creates a mock transport with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a request with `method` to the URL path `path` (query ignored).
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("mock request log poisoned").clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests
            .lock()
            .expect("mock request log poisoned")
            .last()
            .cloned()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().expect("mock expectations poisoned");
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let expectation = self
            .expectations
            .lock()
            .expect("mock expectations poisoned")
            .pop_front();
        self.requests
            .lock()
            .expect("mock request log poisoned")
            .push(request.clone());

        match expectation {
            Some(exp) if exp.method == request.method && exp.path == request.url.path() => {
                exp.response
            }
            Some(exp) => panic!(
                "Unexpected request: expected {} {}, got {} {}",
                exp.method,
                exp.path,
                request.method,
                request.url.path()
            ),
            None => panic!(
                "Unexpected request: {} {} (no expectations left)",
                request.method, request.url
            ),
        }
    }
}

/// Builder for one expectation.
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    /// Answers with `status` and `body` serialized as JSON.
    pub fn return_json(self, status: u16, body: Value) {
        self.respond(Ok(HttpResponse::new(status, body.to_string())));
    }

    /// Answers with JSON and extra response headers.
    pub fn return_json_with_headers(self, status: u16, body: Value, headers: &[(&str, &str)]) {
        let response = headers.iter().fold(
            HttpResponse::new(status, body.to_string()),
            |response, (name, value)| response.with_header(name, *value),
        );
        self.respond(Ok(response));
    }

    /// Answers with a raw body (empty, HTML error pages, truncated JSON).
    pub fn return_body(self, status: u16, body: impl Into<String>) {
        self.respond(Ok(HttpResponse::new(status, body)));
    }

    /// Fails the exchange at the transport level.
    pub fn return_err(self, error: TransportError) {
        self.respond(Err(error));
    }

    fn respond(self, response: Result<HttpResponse, TransportError>) {
        let mut exps = self.expectations.lock().expect("mock expectations poisoned");
        exps.push_back(Expectation {
            method: self.method,
            path: self.path,
            response,
        });
    }
}
