//! Data provider trait and request/response types.
//!
//! This module defines the capability contract (`DataProvider`) a host admin
//! framework drives, along with the parameter and result types of each
//! operation.
//!
//! # Operations
//!
//! | Operation | Params | Result |
//! |-----------|--------|--------|
//! | `get_list` | [`GetListParams`] | [`ListResult`] |
//! | `get_one` | [`GetOneParams`] | [`RecordResult`] |
//! | `get_many` | [`GetManyParams`] | [`RecordsResult`] |
//! | `get_many_reference` | [`GetManyReferenceParams`] | [`ListResult`] |
//! | `update` | [`UpdateParams`] | [`RecordResult`] |
//! | `update_many` | [`UpdateManyParams`] | [`IdsResult`] |
//! | `create` | [`CreateParams`] | [`RecordResult`] |
//! | `delete` | [`DeleteParams`] | [`RecordResult`] |
//! | `delete_many` | [`DeleteManyParams`] | [`IdsResult`] |
//!
//! # Example
//!
//! ```rust,ignore
//! use microrest_core::{
//!     DataProvider, GetListParams, Pagination, ProviderError, RestProvider, Sort,
//! };
//!
//! async fn first_page(provider: &RestProvider) -> Result<(), ProviderError> {
//!     let params = GetListParams::new(Pagination::new(1, 25)?, Sort::desc("published_at")?);
//!     let page = provider.get_list("posts", params).await?;
//!
//!     let shown = page.data.as_array().map_or(0, Vec::len);
//!     println!("showing {shown} of {}", page.total);
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Filter, Pagination, Record, RecordId, Sort};
use crate::{ProviderError, ValidationError};

/// Boxed future returned by every provider operation.
pub type ProviderFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, ProviderError>> + Send + 'a>>;

/// Params for a paginated, sorted and filtered list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetListParams {
    pub pagination: Pagination,
    pub sort: Sort,
    #[serde(default)]
    pub filter: Filter,
}

impl GetListParams {
    pub fn new(pagination: Pagination, sort: Sort) -> Self {
        Self {
            pagination,
            sort,
            filter: Filter::new(),
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetOneParams {
    pub id: RecordId,
}

impl GetOneParams {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetManyParams {
    pub ids: Vec<RecordId>,
}

impl GetManyParams {
    pub fn new<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RecordId>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Params for the records of `resource` whose `target` field points at `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetManyReferenceParams {
    pub target: String,
    pub id: RecordId,
    pub pagination: Pagination,
    pub sort: Sort,
    #[serde(default)]
    pub filter: Filter,
}

impl GetManyReferenceParams {
    pub fn new(
        target: impl Into<String>,
        id: impl Into<RecordId>,
        pagination: Pagination,
        sort: Sort,
    ) -> Result<Self, ValidationError> {
        let target = target.into();
        if target.trim().is_empty() {
            return Err(ValidationError::EmptyTarget);
        }
        Ok(Self {
            target,
            id: id.into(),
            pagination,
            sort,
            filter: Filter::new(),
        })
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Caller filter with `target` set to the referenced id. The reference
    /// wins over a caller-supplied value for the same key.
    pub fn reference_filter(&self) -> Filter {
        let mut filter = self.filter.clone();
        filter.insert(self.target.clone(), self.id.to_value());
        filter
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateParams {
    pub id: RecordId,
    pub data: Record,
}

impl UpdateParams {
    pub fn new(id: impl Into<RecordId>, data: Record) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateManyParams {
    pub ids: Vec<RecordId>,
    pub data: Record,
}

impl UpdateManyParams {
    pub fn new<I, T>(ids: I, data: Record) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RecordId>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateParams {
    pub data: Record,
}

impl CreateParams {
    pub fn new(data: Record) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteParams {
    pub id: RecordId,
}

impl DeleteParams {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteManyParams {
    pub ids: Vec<RecordId>,
}

impl DeleteManyParams {
    pub fn new<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RecordId>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

// Response bodies are handed back untouched. A `204 No Content` reply reads as
// `Value::Null`.

/// One page of records plus the backend's total count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult {
    pub data: Value,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordResult {
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordsResult {
    pub data: Value,
}

/// Ids touched by a bulk operation, in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdsResult {
    pub data: Vec<RecordId>,
}

/// Capability contract expected by the host admin framework.
///
/// Every operation names the `resource` it targets and is independent of any
/// other call.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` as they may be shared across tasks.
pub trait DataProvider: Send + Sync {
    /// Fetches one page of `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::MissingContentRange`] when the response carries
    /// no `Content-Range` header.
    fn get_list<'a>(
        &'a self,
        resource: &'a str,
        params: GetListParams,
    ) -> ProviderFuture<'a, ListResult>;

    fn get_one<'a>(
        &'a self,
        resource: &'a str,
        params: GetOneParams,
    ) -> ProviderFuture<'a, RecordResult>;

    fn get_many<'a>(
        &'a self,
        resource: &'a str,
        params: GetManyParams,
    ) -> ProviderFuture<'a, RecordsResult>;

    /// Fetches one page of the records referencing another record.
    ///
    /// # Errors
    ///
    /// Same as [`get_list`](DataProvider::get_list).
    fn get_many_reference<'a>(
        &'a self,
        resource: &'a str,
        params: GetManyReferenceParams,
    ) -> ProviderFuture<'a, ListResult>;

    fn update<'a>(
        &'a self,
        resource: &'a str,
        params: UpdateParams,
    ) -> ProviderFuture<'a, RecordResult>;

    /// Applies the same update to every id concurrently.
    ///
    /// # Errors
    ///
    /// Fails with the first error any single update produces. Updates that
    /// already reached the backend are not rolled back.
    fn update_many<'a>(
        &'a self,
        resource: &'a str,
        params: UpdateManyParams,
    ) -> ProviderFuture<'a, IdsResult>;

    fn create<'a>(
        &'a self,
        resource: &'a str,
        params: CreateParams,
    ) -> ProviderFuture<'a, RecordResult>;

    fn delete<'a>(
        &'a self,
        resource: &'a str,
        params: DeleteParams,
    ) -> ProviderFuture<'a, RecordResult>;

    /// Deletes every id concurrently. Failure semantics match
    /// [`update_many`](DataProvider::update_many).
    fn delete_many<'a>(
        &'a self,
        resource: &'a str,
        params: DeleteManyParams,
    ) -> ProviderFuture<'a, IdsResult>;
}
