//! Canonical result shapes returned to callers.
//!
//! Every record in these results carries an `id` field; the provider checks
//! (and where it can, repairs) this before handing a result out.

use crate::params::{Identifier, Record};
use serde::Serialize;

/// Result of `list` and `get-many-reference`.
///
/// `total` counts the whole matching set on the backend, not the page in
/// `data`. Callers must not derive one from the other.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListResult {
    pub data: Vec<Record>,
    pub total: u64,
}

/// Result of `get-one`, `create`, `update` and `delete`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleResult {
    pub data: Record,
}

/// Result of `get-many`. Order is whatever the backend returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManyResult {
    pub data: Vec<Record>,
}

/// Result of the bulk operations: the ids the backend reports as affected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkResult {
    pub data: Vec<Identifier>,
}
