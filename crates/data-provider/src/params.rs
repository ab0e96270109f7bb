//! # Operation Parameters
//!
//! Typed inputs for the nine data-provider operations, plus the shared value
//! types they are built from ([`Identifier`], [`Pagination`], [`Sort`]).
//!
//! Records and filters stay untyped (`serde_json::Map`): the adapter never
//! interprets field contents, it only moves them between caller and backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{self, Display};

/// A resource record: field name to scalar or nested value.
pub type Record = Map<String, Value>;

/// A backend-interpreted filter predicate: field name to match value.
pub type Filter = Map<String, Value>;

/// Opaque record identifier.
///
/// Backends hand out either integer or string ids. Both serialize as the bare
/// JSON value (`5` or `"sku-5"`), never wrapped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(i64),
    Text(String),
}

impl Identifier {
    /// Reads an identifier out of a JSON value.
    ///
    /// Returns `None` for anything that is not an integer or a string
    /// (floats, booleans, null, arrays, objects). Integer ids must fit in an
    /// `i64`: a larger one, such as `18446744073709551615`, is `None`, and a
    /// record carrying it counts as having no `id`. Backends issuing such ids
    /// should send them as strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Identifier::Number),
            Value::String(s) => Some(Identifier::Text(s.clone())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Identifier::Number(n) => Value::from(*n),
            Identifier::Text(s) => Value::from(s.as_str()),
        }
    }

    /// Extracts the `id` field of a record, if it holds a valid identifier.
    pub fn of_record(record: &Record) -> Option<Self> {
        record.get("id").and_then(Identifier::from_value)
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Number(n) => write!(f, "{n}"),
            Identifier::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Identifier {
    fn from(id: i64) -> Self {
        Identifier::Number(id)
    }
}

impl From<i32> for Identifier {
    fn from(id: i32) -> Self {
        Identifier::Number(id.into())
    }
}

impl From<u32> for Identifier {
    fn from(id: u32) -> Self {
        Identifier::Number(id.into())
    }
}

impl From<&str> for Identifier {
    fn from(id: &str) -> Self {
        Identifier::Text(id.to_string())
    }
}

impl From<String> for Identifier {
    fn from(id: String) -> Self {
        Identifier::Text(id)
    }
}

/// A 1-indexed page request.
///
/// Both fields must be at least 1; zero values are rejected when the range is
/// encoded (see [`crate::query::encode_range`]), before any request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
}

impl Pagination {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self { page, per_page }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
        }
    }
}

/// Sort direction, encoded on the wire as `"ASC"` / `"DESC"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field and direction to sort a collection by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Desc)
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::asc("id")
    }
}

// =============================================================================
// PER-OPERATION PARAMETERS
// =============================================================================

/// Parameters for `list`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetListParams {
    pub pagination: Pagination,
    pub sort: Sort,
    pub filter: Filter,
}

/// Parameters for `get-one`.
#[derive(Debug, Clone, PartialEq)]
pub struct GetOneParams {
    pub id: Identifier,
}

/// Parameters for `get-many`.
#[derive(Debug, Clone, PartialEq)]
pub struct GetManyParams {
    pub ids: Vec<Identifier>,
}

/// Parameters for `get-many-reference`: a list query narrowed to records whose
/// `target` field equals `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct GetManyReferenceParams {
    pub target: String,
    pub id: Identifier,
    pub pagination: Pagination,
    pub sort: Sort,
    pub filter: Filter,
}

/// Parameters for `create`. The record carries no id; the backend assigns one.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateParams {
    pub data: Record,
}

/// Parameters for `update`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateParams {
    pub id: Identifier,
    pub data: Record,
}

/// Parameters for `update-many`: the same field changes applied to every id.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateManyParams {
    pub ids: Vec<Identifier>,
    pub data: Record,
}

/// Parameters for `delete`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteParams {
    pub id: Identifier,
}

/// Parameters for `delete-many`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteManyParams {
    pub ids: Vec<Identifier>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identifier_serializes_as_bare_value() {
        assert_eq!(serde_json::to_value(Identifier::from(7)).unwrap(), json!(7));
        assert_eq!(
            serde_json::to_value(Identifier::from("sku-7")).unwrap(),
            json!("sku-7")
        );
    }

    #[test]
    fn identifier_from_value_rejects_non_ids() {
        assert_eq!(Identifier::from_value(&json!(3)), Some(Identifier::Number(3)));
        assert_eq!(
            Identifier::from_value(&json!("a")),
            Some(Identifier::Text("a".into()))
        );
        assert_eq!(Identifier::from_value(&json!(1.5)), None);
        assert_eq!(Identifier::from_value(&json!(null)), None);
        assert_eq!(Identifier::from_value(&json!({"id": 1})), None);
    }

    #[test]
    fn identifier_integers_are_limited_to_i64() {
        assert_eq!(
            Identifier::from_value(&json!(i64::MAX)),
            Some(Identifier::Number(i64::MAX))
        );
        assert_eq!(Identifier::from_value(&json!(-4)), Some(Identifier::Number(-4)));
        assert_eq!(Identifier::from_value(&json!(u64::MAX)), None);

        let mut record = Record::new();
        record.insert("id".to_string(), json!(u64::MAX));
        assert_eq!(Identifier::of_record(&record), None);
        record.insert("id".to_string(), json!(u64::MAX.to_string()));
        assert_eq!(
            Identifier::of_record(&record),
            Some(Identifier::Text("18446744073709551615".into()))
        );
    }

    #[test]
    fn sort_order_wire_names() {
        assert_eq!(serde_json::to_value(SortOrder::Asc).unwrap(), json!("ASC"));
        assert_eq!(serde_json::to_value(SortOrder::Desc).unwrap(), json!("DESC"));
    }

    #[test]
    fn list_defaults() {
        let params = GetListParams::default();
        assert_eq!(params.pagination, Pagination::new(1, 10));
        assert_eq!(params.sort, Sort::asc("id"));
        assert!(params.filter.is_empty());
    }
}
