//! # Routing Table
//!
//! Maps each [`Operation`] to the HTTP method and URL shape it uses against
//! the backend. This is the only place that decides where a request goes.
//!
//! | Operation | Method | Path |
//! |---|---|---|
//! | `list`, `get-many`, `get-many-reference` | `GET` | `/{resource}` |
//! | `get-one` | `GET` | `/{resource}/{id}` |
//! | `create` | `POST` | `/{resource}` |
//! | `update` | `PUT` | `/{resource}/{id}` |
//! | `update-many` | `PUT` | `/{resource}` |
//! | `delete` | `DELETE` | `/{resource}/{id}` |
//! | `delete-many` | `POST` | `/{resource}/bulk-delete` |
//!
//! `delete-many` is the one entry that departs from REST convention: many
//! clients and servers drop or reject a body on `DELETE`, so bulk deletion is
//! a `POST` to a dedicated [`Target::BulkDelete`] endpoint.

use crate::params::Identifier;
use reqwest::Url;
use std::fmt::{self, Display};

/// Path segment of the bulk-delete endpoint.
pub const BULK_DELETE_SEGMENT: &str = "bulk-delete";

/// The nine operations of the data-provider contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    GetOne,
    GetMany,
    GetManyReference,
    Create,
    Update,
    UpdateMany,
    Delete,
    DeleteMany,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::List,
        Operation::GetOne,
        Operation::GetMany,
        Operation::GetManyReference,
        Operation::Create,
        Operation::Update,
        Operation::UpdateMany,
        Operation::Delete,
        Operation::DeleteMany,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::GetOne => "get-one",
            Operation::GetMany => "get-many",
            Operation::GetManyReference => "get-many-reference",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::UpdateMany => "update-many",
            Operation::Delete => "delete",
            Operation::DeleteMany => "delete-many",
        }
    }

    /// The routing table.
    pub const fn route(&self) -> Route {
        match self {
            Operation::List | Operation::GetMany | Operation::GetManyReference => {
                Route::new(Method::Get, Target::Collection)
            }
            Operation::GetOne => Route::new(Method::Get, Target::Record),
            Operation::Create => Route::new(Method::Post, Target::Collection),
            Operation::Update => Route::new(Method::Put, Target::Record),
            Operation::UpdateMany => Route::new(Method::Put, Target::Collection),
            Operation::Delete => Route::new(Method::Delete, Target::Record),
            // Named exception: POST to a dedicated endpoint, never DELETE.
            Operation::DeleteMany => Route::new(Method::Post, Target::BulkDelete),
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP methods used by the wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Which URL under a resource an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// `/{resource}`
    Collection,
    /// `/{resource}/{id}`
    Record,
    /// `/{resource}/bulk-delete`
    BulkDelete,
}

/// One row of the routing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    pub target: Target,
}

impl Route {
    pub const fn new(method: Method, target: Target) -> Self {
        Self { method, target }
    }

    /// Builds the request URL under `base`.
    ///
    /// Path segments are percent-encoded, so resource names and string ids
    /// containing `/` or spaces stay a single segment. `id` is only used for
    /// [`Target::Record`]. A trailing slash on `base` is ignored.
    pub fn url(&self, base: &Url, resource: &str, id: Option<&Identifier>) -> Url {
        let mut url = base.clone();
        url.set_query(None);
        // Cannot-be-a-base URLs are rejected by `ProviderConfig`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(resource);
            match self.target {
                Target::Collection => {}
                Target::Record => {
                    if let Some(id) = id {
                        segments.push(&id.to_string());
                    }
                }
                Target::BulkDelete => {
                    segments.push(BULK_DELETE_SEGMENT);
                }
            }
        }
        url
    }
}
