//! # Data Provider
//!
//! [`DataProvider`] is the contract the UI layer programs against: nine
//! operations, each taking a resource name and a parameter struct.
//! [`RestDataProvider`] implements it over HTTP.
//!
//! ## Request flow
//!
//! 1. Parameters are encoded ([`crate::query`]) and routed ([`crate::route`]).
//! 2. The observer sees the request; the transport sends it, once.
//! 3. Non-2xx statuses become [`ProviderError::HttpStatus`].
//! 4. The JSON body is normalized into a [`crate::result`] shape.
//!
//! ## Normalization rules
//!
//! - Records returned in lists must carry an `id`; a single record missing
//!   one gets the id it was requested by.
//! - `list` requires a non-negative integer `total`.
//! - `create` answers with the submitted record plus the server id (see
//!   [`CreatePolicy`] for the alternative).
//! - `update` and `delete` accept a status message in place of the record
//!   and answer with the submitted record or `{id}` instead.
//! - `delete-many` answers with the requested ids unless the backend
//!   returns an array of ids.

use crate::config::{CreatePolicy, ProviderConfig};
use crate::error::{OperationContext, ProviderError};
use crate::observer::{RequestObserver, TracingObserver};
use crate::params::{
    CreateParams, DeleteManyParams, DeleteParams, Filter, GetListParams, GetManyParams,
    GetManyReferenceParams, GetOneParams, Identifier, Pagination, Record, Sort, UpdateManyParams,
    UpdateParams,
};
use crate::query::{ids_filter, merge_reference_filter, CollectionQuery};
use crate::result::{BulkResult, ListResult, ManyResult, SingleResult};
use crate::route::Operation;
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;

/// The generic data operations consumed by list/create/edit/show views.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// A page of `resource`, plus the size of the full matching set.
    async fn get_list(
        &self,
        resource: &str,
        params: GetListParams,
    ) -> Result<ListResult, ProviderError>;

    async fn get_one(
        &self,
        resource: &str,
        params: GetOneParams,
    ) -> Result<SingleResult, ProviderError>;

    /// The records whose ids are listed, in backend order.
    async fn get_many(
        &self,
        resource: &str,
        params: GetManyParams,
    ) -> Result<ManyResult, ProviderError>;

    /// A page of `resource` whose `params.target` field equals `params.id`.
    async fn get_many_reference(
        &self,
        resource: &str,
        params: GetManyReferenceParams,
    ) -> Result<ListResult, ProviderError>;

    async fn create(
        &self,
        resource: &str,
        params: CreateParams,
    ) -> Result<SingleResult, ProviderError>;

    async fn update(
        &self,
        resource: &str,
        params: UpdateParams,
    ) -> Result<SingleResult, ProviderError>;

    async fn update_many(
        &self,
        resource: &str,
        params: UpdateManyParams,
    ) -> Result<BulkResult, ProviderError>;

    async fn delete(
        &self,
        resource: &str,
        params: DeleteParams,
    ) -> Result<SingleResult, ProviderError>;

    async fn delete_many(
        &self,
        resource: &str,
        params: DeleteManyParams,
    ) -> Result<BulkResult, ProviderError>;
}

/// [`DataProvider`] speaking the `sort`/`range`/`filter` REST dialect.
///
/// Holds no state between calls. Concurrent calls share nothing but the
/// transport and each issues exactly one request.
///
/// ```rust,no_run
/// use data_provider::{DataProvider, GetListParams, ProviderConfig, RestDataProvider};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = RestDataProvider::new(ProviderConfig::from_env()?);
/// let page = provider.get_list("products", GetListParams::default()).await?;
/// println!("{} of {}", page.data.len(), page.total);
/// # Ok(())
/// # }
/// ```
pub struct RestDataProvider<T: Transport = ReqwestTransport> {
    config: ProviderConfig,
    transport: T,
    observer: Arc<dyn RequestObserver>,
}

impl RestDataProvider<ReqwestTransport> {
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> RestDataProvider<T> {
    pub fn with_transport(config: ProviderConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replaces the default [`TracingObserver`].
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn request(
        &self,
        operation: Operation,
        resource: &str,
        id: Option<&Identifier>,
    ) -> HttpRequest {
        let route = operation.route();
        HttpRequest::new(route.method, route.url(self.config.base_url(), resource, id))
    }

    /// Sends one request and rejects non-2xx answers.
    async fn execute(
        &self,
        context: &OperationContext,
        request: HttpRequest,
    ) -> Result<HttpResponse, ProviderError> {
        self.observer.on_request(context, &request);
        let started = Instant::now();
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|source| ProviderError::Transport {
                context: context.clone(),
                source,
            })?;
        self.observer.on_response(context, &response, started.elapsed());

        if !response.is_success() {
            return Err(ProviderError::HttpStatus {
                context: context.clone(),
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }

    fn report<R>(
        &self,
        context: &OperationContext,
        result: Result<R, ProviderError>,
    ) -> Result<R, ProviderError> {
        if let Err(error) = &result {
            self.observer.on_error(context, error);
        }
        result
    }

    /// Shared by `list` and `get-many-reference`.
    async fn fetch_page(
        &self,
        context: &OperationContext,
        pagination: &Pagination,
        sort: &Sort,
        filter: &Filter,
    ) -> Result<ListResult, ProviderError> {
        let query = CollectionQuery::paged(pagination, sort, filter).map_err(|source| {
            ProviderError::InvalidParams {
                context: context.clone(),
                source,
            }
        })?;
        let mut request = self.request(context.operation, &context.resource, None);
        query.apply(&mut request.url);

        let response = self.execute(context, request).await?;
        let json = parse_body(context, &response)?;
        let data = record_list(context, require_data(context, &json)?)?;
        let total = self.total(context, &json, &response)?;
        Ok(ListResult { data, total })
    }

    fn total(
        &self,
        context: &OperationContext,
        json: &Value,
        response: &HttpResponse,
    ) -> Result<u64, ProviderError> {
        match json.get("total") {
            Some(Value::Null) | None => {
                if self.config.total_from_content_range() {
                    if let Some(total) = response
                        .header("content-range")
                        .and_then(content_range_total)
                    {
                        return Ok(total);
                    }
                }
                Err(ProviderError::malformed(context, "missing `total`"))
            }
            Some(value) => value.as_u64().ok_or_else(|| {
                ProviderError::malformed(
                    context,
                    format!("`total` must be a non-negative integer, got {value}"),
                )
            }),
        }
    }

    async fn run_get_one(
        &self,
        context: &OperationContext,
        params: &GetOneParams,
    ) -> Result<SingleResult, ProviderError> {
        let request = self.request(Operation::GetOne, &context.resource, Some(&params.id));
        let response = self.execute(context, request).await?;
        let json = parse_body(context, &response)?;
        let data = single_record(context, require_data(context, &json)?, &params.id)?;
        Ok(SingleResult { data })
    }

    async fn run_get_many(
        &self,
        context: &OperationContext,
        params: &GetManyParams,
    ) -> Result<ManyResult, ProviderError> {
        let mut request = self.request(Operation::GetMany, &context.resource, None);
        CollectionQuery::filtered(&ids_filter(&params.ids)).apply(&mut request.url);
        let response = self.execute(context, request).await?;
        let json = parse_body(context, &response)?;
        let data = record_list(context, require_data(context, &json)?)?;
        Ok(ManyResult { data })
    }

    async fn run_create(
        &self,
        context: &OperationContext,
        params: CreateParams,
    ) -> Result<SingleResult, ProviderError> {
        let request = self
            .request(Operation::Create, &context.resource, None)
            .with_body(Value::Object(params.data.clone()));
        let response = self.execute(context, request).await?;
        let json = parse_body(context, &response)?;
        let server_id = created_id(&json)
            .ok_or_else(|| ProviderError::malformed(context, "missing server-assigned `id`"))?;

        let data = match self.config.create_policy() {
            CreatePolicy::EchoInput => {
                let mut record = params.data;
                record.insert("id".to_string(), server_id.to_value());
                record
            }
            CreatePolicy::TrustServer => {
                single_record(context, require_data(context, &json)?, &server_id)?
            }
        };
        Ok(SingleResult { data })
    }

    async fn run_update(
        &self,
        context: &OperationContext,
        params: UpdateParams,
    ) -> Result<SingleResult, ProviderError> {
        let request = self
            .request(Operation::Update, &context.resource, Some(&params.id))
            .with_body(Value::Object(params.data.clone()));
        let response = self.execute(context, request).await?;
        let json = parse_body(context, &response)?;

        let mut submitted = params.data;
        submitted.insert("id".to_string(), params.id.to_value());
        let data = record_or(context, require_data(context, &json)?, &params.id, submitted)?;
        Ok(SingleResult { data })
    }

    async fn run_update_many(
        &self,
        context: &OperationContext,
        params: UpdateManyParams,
    ) -> Result<BulkResult, ProviderError> {
        let request = self
            .request(Operation::UpdateMany, &context.resource, None)
            .with_body(json!({ "ids": params.ids, "data": params.data }));
        let response = self.execute(context, request).await?;
        let json = parse_body(context, &response)?;
        let data = bulk_ids(context, require_data(context, &json)?)?;
        Ok(BulkResult { data })
    }

    async fn run_delete(
        &self,
        context: &OperationContext,
        params: &DeleteParams,
    ) -> Result<SingleResult, ProviderError> {
        let request = self.request(Operation::Delete, &context.resource, Some(&params.id));
        let response = self.execute(context, request).await?;
        let json = parse_body(context, &response)?;

        let mut acknowledged = Record::new();
        acknowledged.insert("id".to_string(), params.id.to_value());
        let data = record_or(context, require_data(context, &json)?, &params.id, acknowledged)?;
        Ok(SingleResult { data })
    }

    async fn run_delete_many(
        &self,
        context: &OperationContext,
        params: DeleteManyParams,
    ) -> Result<BulkResult, ProviderError> {
        let body = Value::Array(params.ids.iter().map(Identifier::to_value).collect());
        let request = self
            .request(Operation::DeleteMany, &context.resource, None)
            .with_body(body);
        let response = self.execute(context, request).await?;
        let json = parse_body(context, &response)?;
        let data = match json.get("data") {
            Some(data @ Value::Array(_)) => bulk_ids(context, data)?,
            _ => params.ids,
        };
        Ok(BulkResult { data })
    }
}

#[async_trait]
impl<T: Transport> DataProvider for RestDataProvider<T> {
    async fn get_list(
        &self,
        resource: &str,
        params: GetListParams,
    ) -> Result<ListResult, ProviderError> {
        let context = OperationContext::new(Operation::List, resource);
        let result = self
            .fetch_page(&context, &params.pagination, &params.sort, &params.filter)
            .await;
        self.report(&context, result)
    }

    async fn get_one(
        &self,
        resource: &str,
        params: GetOneParams,
    ) -> Result<SingleResult, ProviderError> {
        let context =
            OperationContext::new(Operation::GetOne, resource).with_ids([params.id.clone()]);
        let result = self.run_get_one(&context, &params).await;
        self.report(&context, result)
    }

    async fn get_many(
        &self,
        resource: &str,
        params: GetManyParams,
    ) -> Result<ManyResult, ProviderError> {
        let context =
            OperationContext::new(Operation::GetMany, resource).with_ids(params.ids.clone());
        let result = self.run_get_many(&context, &params).await;
        self.report(&context, result)
    }

    async fn get_many_reference(
        &self,
        resource: &str,
        params: GetManyReferenceParams,
    ) -> Result<ListResult, ProviderError> {
        let context = OperationContext::new(Operation::GetManyReference, resource)
            .with_ids([params.id.clone()]);
        let filter = merge_reference_filter(&params.filter, &params.target, &params.id);
        let result = self
            .fetch_page(&context, &params.pagination, &params.sort, &filter)
            .await;
        self.report(&context, result)
    }

    async fn create(
        &self,
        resource: &str,
        params: CreateParams,
    ) -> Result<SingleResult, ProviderError> {
        let context = OperationContext::new(Operation::Create, resource);
        let result = self.run_create(&context, params).await;
        self.report(&context, result)
    }

    async fn update(
        &self,
        resource: &str,
        params: UpdateParams,
    ) -> Result<SingleResult, ProviderError> {
        let context =
            OperationContext::new(Operation::Update, resource).with_ids([params.id.clone()]);
        let result = self.run_update(&context, params).await;
        self.report(&context, result)
    }

    async fn update_many(
        &self,
        resource: &str,
        params: UpdateManyParams,
    ) -> Result<BulkResult, ProviderError> {
        let context =
            OperationContext::new(Operation::UpdateMany, resource).with_ids(params.ids.clone());
        let result = self.run_update_many(&context, params).await;
        self.report(&context, result)
    }

    async fn delete(
        &self,
        resource: &str,
        params: DeleteParams,
    ) -> Result<SingleResult, ProviderError> {
        let context =
            OperationContext::new(Operation::Delete, resource).with_ids([params.id.clone()]);
        let result = self.run_delete(&context, &params).await;
        self.report(&context, result)
    }

    async fn delete_many(
        &self,
        resource: &str,
        params: DeleteManyParams,
    ) -> Result<BulkResult, ProviderError> {
        let context =
            OperationContext::new(Operation::DeleteMany, resource).with_ids(params.ids.clone());
        let result = self.run_delete_many(&context, params).await;
        self.report(&context, result)
    }
}

// =============================================================================
// RESPONSE NORMALIZATION
// =============================================================================

/// Decodes a 2xx body. An empty body decodes to `null`.
fn parse_body(
    context: &OperationContext,
    response: &HttpResponse,
) -> Result<Value, ProviderError> {
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body)
        .map_err(|e| ProviderError::malformed(context, format!("body is not JSON: {e}")))
}

fn require_data<'a>(
    context: &OperationContext,
    json: &'a Value,
) -> Result<&'a Value, ProviderError> {
    match json.get("data") {
        None | Some(Value::Null) => Err(ProviderError::malformed(context, "missing `data`")),
        Some(data) => Ok(data),
    }
}

/// Every element must be a record with a usable `id`; there is nothing to
/// repair a missing one from.
fn record_list(context: &OperationContext, data: &Value) -> Result<Vec<Record>, ProviderError> {
    let items = data
        .as_array()
        .ok_or_else(|| ProviderError::malformed(context, "`data` is not an array"))?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(record) if Identifier::of_record(record).is_some() => Ok(record.clone()),
            Value::Object(_) => Err(ProviderError::malformed(
                context,
                format!("record {index} has no `id`"),
            )),
            _ => Err(ProviderError::malformed(
                context,
                format!("record {index} is not an object"),
            )),
        })
        .collect()
}

/// A record missing its `id` gets the id it was requested by.
fn single_record(
    context: &OperationContext,
    data: &Value,
    requested: &Identifier,
) -> Result<Record, ProviderError> {
    let mut record = data
        .as_object()
        .cloned()
        .ok_or_else(|| ProviderError::malformed(context, "`data` is not a record"))?;
    if matches!(record.get("id"), None | Some(Value::Null)) {
        record.insert("id".to_string(), requested.to_value());
    }
    Ok(record)
}

/// A status message in place of the record (`{"data": "Customer deleted"}`)
/// yields `fallback`, the record the caller already holds.
fn record_or(
    context: &OperationContext,
    data: &Value,
    requested: &Identifier,
    fallback: Record,
) -> Result<Record, ProviderError> {
    match data {
        Value::Object(_) => single_record(context, data, requested),
        _ => Ok(fallback),
    }
}

/// Bulk answers list either bare ids or records carrying one.
fn bulk_ids(context: &OperationContext, data: &Value) -> Result<Vec<Identifier>, ProviderError> {
    let items = data
        .as_array()
        .ok_or_else(|| ProviderError::malformed(context, "`data` is not an array of ids"))?;
    items
        .iter()
        .map(|item| {
            let id = match item {
                Value::Object(record) => Identifier::of_record(record),
                other => Identifier::from_value(other),
            };
            id.ok_or_else(|| ProviderError::malformed(context, format!("{item} is not an id")))
        })
        .collect()
}

/// Server id of a created record: top-level `id`, else `data.id`.
fn created_id(json: &Value) -> Option<Identifier> {
    json.get("id")
        .and_then(Identifier::from_value)
        .or_else(|| json.get("data")?.get("id").and_then(Identifier::from_value))
}

/// `products 0-9/42` gives 42; an unknown length (`*`) gives `None`.
fn content_range_total(header: &str) -> Option<u64> {
    header.rsplit_once('/')?.1.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> OperationContext {
        OperationContext::new(Operation::List, "products")
    }

    #[test]
    fn content_range_forms() {
        assert_eq!(content_range_total("products 0-9/42"), Some(42));
        assert_eq!(content_range_total("products */0"), Some(0));
        assert_eq!(content_range_total("items 0-9/*"), None);
        assert_eq!(content_range_total("garbage"), None);
    }

    #[test]
    fn created_id_prefers_top_level() {
        assert_eq!(created_id(&json!({"id": 5})), Some(Identifier::from(5)));
        assert_eq!(
            created_id(&json!({"data": {"id": "x"}})),
            Some(Identifier::from("x"))
        );
        assert_eq!(
            created_id(&json!({"id": 1, "data": {"id": 2}})),
            Some(Identifier::from(1))
        );
        assert_eq!(created_id(&json!({"data": "Product created successfully"})), None);
    }

    #[test]
    fn record_list_requires_ids() {
        let ok = record_list(&context(), &json!([{"id": 1}, {"id": "b", "x": 2}])).unwrap();
        assert_eq!(ok.len(), 2);
        assert!(record_list(&context(), &json!([{"name": "no id"}])).is_err());
        assert!(record_list(&context(), &json!([1, 2])).is_err());
        assert!(record_list(&context(), &json!({"id": 1})).is_err());
    }

    #[test]
    fn single_record_echoes_requested_id() {
        let record =
            single_record(&context(), &json!({"name": "Widget"}), &Identifier::from(9)).unwrap();
        assert_eq!(Value::Object(record), json!({"name": "Widget", "id": 9}));

        let record = single_record(&context(), &json!({"id": 3}), &Identifier::from(9)).unwrap();
        assert_eq!(record.get("id"), Some(&json!(3)));

        assert!(single_record(&context(), &json!("deleted"), &Identifier::from(9)).is_err());
    }

    #[test]
    fn status_message_falls_back_to_known_record() {
        let mut known = Record::new();
        known.insert("id".to_string(), json!(9));
        let record = record_or(&context(), &json!("deleted"), &Identifier::from(9), known.clone());
        assert_eq!(record.unwrap(), known);

        let record = record_or(&context(), &json!({"name": "x"}), &Identifier::from(9), known);
        assert_eq!(Value::Object(record.unwrap()), json!({"name": "x", "id": 9}));
    }

    #[test]
    fn bulk_ids_accepts_ids_and_records() {
        let ids = bulk_ids(&context(), &json!([1, "b", {"id": 3}])).unwrap();
        assert_eq!(
            ids,
            vec![Identifier::from(1), Identifier::from("b"), Identifier::from(3)]
        );
        assert!(bulk_ids(&context(), &json!([true])).is_err());
        assert!(bulk_ids(&context(), &json!("ok")).is_err());
    }

    #[test]
    fn empty_body_is_null() {
        let response = HttpResponse::new(204, "");
        assert_eq!(parse_body(&context(), &response).unwrap(), Value::Null);
        let response = HttpResponse::new(200, "<html>");
        assert!(matches!(
            parse_body(&context(), &response),
            Err(ProviderError::MalformedResponse { .. })
        ));
    }
}
