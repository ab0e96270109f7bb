//! # Generic Client
//!
//! [`ResourceClient<R>`] is the typed face of a [`DataProvider`]. It speaks
//! in models and payload structs, and converts to and from the untyped
//! [`Record`]s the provider moves around:
//!
//! ```text
//! ProductCreate ──serde──> Record ──provider──> Record ──serde──> Product
//! ```
//!
//! One method call is one provider call, except [`patch`](ResourceClient::patch),
//! which reads the current record first so that the backend always receives
//! a full record on update. The client is cheap to clone and can be shared
//! across tasks.

use crate::clients::error::ClientError;
use crate::resources::AdminResource;
use data_provider::{
    CreateParams, DataProvider, DeleteManyParams, DeleteParams, Filter, GetListParams,
    GetManyParams, GetManyReferenceParams, GetOneParams, Identifier, Pagination, Record, Sort,
    UpdateManyParams, UpdateParams,
};
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// One page of typed records plus the size of the full matching set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    pub items: Vec<R>,
    pub total: u64,
}

/// A type-safe client for one collection.
pub struct ResourceClient<R: AdminResource> {
    provider: Arc<dyn DataProvider>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: AdminResource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self::new(self.provider.clone())
    }
}

impl<R: AdminResource> ResourceClient<R> {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self {
            provider,
            _resource: PhantomData,
        }
    }

    fn resource(&self) -> &'static str {
        R::KIND.name()
    }

    pub async fn list(&self, params: GetListParams) -> Result<Page<R>, ClientError> {
        let result = self.provider.get_list(self.resource(), params).await?;
        Ok(Page {
            items: decode_all(result.data)?,
            total: result.total,
        })
    }

    pub async fn get(&self, id: R::Id) -> Result<R, ClientError> {
        let result = self
            .provider
            .get_one(self.resource(), GetOneParams { id: id.into() })
            .await?;
        decode(result.data)
    }

    /// Like [`get`](Self::get), but a 404 from the backend is `Ok(None)`.
    pub async fn find(&self, id: R::Id) -> Result<Option<R>, ClientError> {
        match self.get(id).await {
            Ok(record) => Ok(Some(record)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn get_many(&self, ids: &[R::Id]) -> Result<Vec<R>, ClientError> {
        let params = GetManyParams {
            ids: identifiers(ids),
        };
        let result = self.provider.get_many(self.resource(), params).await?;
        decode_all(result.data)
    }

    /// Records whose `target` field references `id`.
    pub async fn get_many_reference(
        &self,
        target: &str,
        id: impl Into<Identifier>,
        pagination: Pagination,
        sort: Sort,
        filter: Filter,
    ) -> Result<Page<R>, ClientError> {
        let params = GetManyReferenceParams {
            target: target.to_string(),
            id: id.into(),
            pagination,
            sort,
            filter,
        };
        let result = self
            .provider
            .get_many_reference(self.resource(), params)
            .await?;
        Ok(Page {
            items: decode_all(result.data)?,
            total: result.total,
        })
    }

    pub async fn create(&self, params: R::Create) -> Result<R, ClientError> {
        let data = encode::<R, _>(&params)?;
        let result = self
            .provider
            .create(self.resource(), CreateParams { data })
            .await?;
        decode(result.data)
    }

    /// Replaces the stored record with `record`. Every field is sent.
    pub async fn update(&self, record: &R) -> Result<R, ClientError> {
        let data = encode::<R, _>(record)?;
        self.put(record.id(), data).await
    }

    /// Fetches the current record, lays the set fields of `patch` over it and
    /// sends the result as a full update.
    pub async fn patch(&self, id: R::Id, patch: &R::Update) -> Result<R, ClientError> {
        let mut data = encode::<R, _>(&self.get(id).await?)?;
        data.extend(encode::<R, _>(patch)?);
        self.put(id, data).await
    }

    async fn put(&self, id: R::Id, data: Record) -> Result<R, ClientError> {
        let result = self
            .provider
            .update(self.resource(), UpdateParams { id: id.into(), data })
            .await?;
        decode(result.data)
    }

    /// Applies one patch to every listed record. Returns the ids the backend
    /// reports as updated.
    pub async fn update_many(
        &self,
        ids: &[R::Id],
        patch: &R::Update,
    ) -> Result<Vec<Identifier>, ClientError> {
        let params = UpdateManyParams {
            ids: identifiers(ids),
            data: encode::<R, _>(patch)?,
        };
        let result = self.provider.update_many(self.resource(), params).await?;
        Ok(result.data)
    }

    /// Returns the deleted record as the backend last saw it, or `None` when
    /// the backend only acknowledged the deletion.
    pub async fn delete(&self, id: R::Id) -> Result<Option<R>, ClientError> {
        let result = self
            .provider
            .delete(self.resource(), DeleteParams { id: id.into() })
            .await?;
        if result.data.keys().all(|key| key == "id") {
            return Ok(None);
        }
        decode(result.data).map(Some)
    }

    pub async fn delete_many(&self, ids: &[R::Id]) -> Result<Vec<Identifier>, ClientError> {
        let params = DeleteManyParams {
            ids: identifiers(ids),
        };
        let result = self.provider.delete_many(self.resource(), params).await?;
        Ok(result.data)
    }
}

fn identifiers<I: Copy + Into<Identifier>>(ids: &[I]) -> Vec<Identifier> {
    ids.iter().map(|&id| id.into()).collect()
}

fn encode<R: AdminResource, P: Serialize>(payload: &P) -> Result<Record, ClientError> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(_) => Err(ClientError::NotARecord { resource: R::KIND }),
        Err(source) => Err(ClientError::Encode {
            resource: R::KIND,
            source,
        }),
    }
}

fn decode<R: AdminResource>(record: Record) -> Result<R, ClientError> {
    serde_json::from_value(Value::Object(record)).map_err(|source| ClientError::Decode {
        resource: R::KIND,
        source,
    })
}

fn decode_all<R: AdminResource>(records: Vec<Record>) -> Result<Vec<R>, ClientError> {
    records.into_iter().map(decode::<R>).collect()
}
