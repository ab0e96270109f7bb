//! # Query-String Encoding
//!
//! Collection requests carry up to three independent parameters, each a JSON
//! document:
//!
//! - `sort`: `["field","ASC"]`
//! - `range`: `[start,end]`, zero-indexed and inclusive
//! - `filter`: `{"field":value,...}`
//!
//! They are appended in key order (`filter`, `range`, `sort`) and
//! URL-encoded by [`CollectionQuery::apply`].

use crate::error::ParamError;
use crate::params::{Filter, Identifier, Pagination, Sort};
use reqwest::Url;
use serde_json::{json, Value};

/// Converts a 1-indexed page window into `[start, end]`.
///
/// `page=2, per_page=10` gives `[10, 19]`.
pub fn encode_range(pagination: &Pagination) -> Result<[u64; 2], ParamError> {
    if pagination.page == 0 {
        return Err(ParamError::ZeroPage);
    }
    if pagination.per_page == 0 {
        return Err(ParamError::ZeroPerPage);
    }
    let overflow = || ParamError::RangeOverflow {
        page: pagination.page,
        per_page: pagination.per_page,
    };
    let start = (pagination.page - 1)
        .checked_mul(pagination.per_page)
        .ok_or_else(overflow)?;
    let end = pagination
        .page
        .checked_mul(pagination.per_page)
        .ok_or_else(overflow)?
        - 1;
    Ok([start, end])
}

pub fn encode_sort(sort: &Sort) -> String {
    json!([sort.field, sort.order.as_str()]).to_string()
}

pub fn encode_filter(filter: &Filter) -> String {
    Value::Object(filter.clone()).to_string()
}

/// Filter used by `get-many`: `{"id": [ids...]}`.
pub fn ids_filter(ids: &[Identifier]) -> Filter {
    let mut filter = Filter::new();
    filter.insert(
        "id".to_string(),
        Value::Array(ids.iter().map(Identifier::to_value).collect()),
    );
    filter
}

/// Adds `{target: id}` to a copy of `filter`.
///
/// Every other key is kept. If `filter` already constrains `target`, the
/// owning id replaces that constraint.
pub fn merge_reference_filter(filter: &Filter, target: &str, id: &Identifier) -> Filter {
    let mut merged = filter.clone();
    merged.insert(target.to_string(), id.to_value());
    merged
}

/// The encoded query parameters of one collection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionQuery {
    pairs: Vec<(&'static str, String)>,
}

impl CollectionQuery {
    /// `filter`, `range` and `sort`, as used by `list` and `get-many-reference`.
    pub fn paged(
        pagination: &Pagination,
        sort: &Sort,
        filter: &Filter,
    ) -> Result<Self, ParamError> {
        let [start, end] = encode_range(pagination)?;
        Ok(Self {
            pairs: vec![
                ("filter", encode_filter(filter)),
                ("range", json!([start, end]).to_string()),
                ("sort", encode_sort(sort)),
            ],
        })
    }

    /// Only a `filter`, as used by `get-many`.
    pub fn filtered(filter: &Filter) -> Self {
        Self {
            pairs: vec![("filter", encode_filter(filter))],
        }
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Appends the parameters to `url`, URL-encoding each value.
    pub fn apply(&self, url: &mut Url) {
        let mut query = url.query_pairs_mut();
        for (name, value) in &self.pairs {
            query.append_pair(name, value);
        }
    }
}
