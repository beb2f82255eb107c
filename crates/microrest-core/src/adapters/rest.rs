use std::sync::Arc;

use futures_util::future::try_join_all;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ProviderConfig;
use crate::content_range::parse_total;
use crate::data_provider::{
    CreateParams, DataProvider, DeleteManyParams, DeleteParams, GetListParams, GetManyParams,
    GetManyReferenceParams, GetOneParams, IdsResult, ListResult, ProviderFuture, RecordResult,
    RecordsResult, UpdateManyParams, UpdateParams,
};
use crate::domain::{Filter, Pagination, RecordId, Sort};
use crate::http_client::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::query::{with_query, QueryParams};
use crate::ProviderError;

/// REST data provider for backends that serve each resource from its own
/// base URL.
///
/// Lists are requested as `GET <base>?filter=..&range=..&sort=..` and must
/// answer with a `Content-Range` header carrying the total. Single records
/// live at `<base>/<id>`.
#[derive(Clone)]
pub struct RestProvider {
    config: Arc<ProviderConfig>,
    http_client: Arc<dyn HttpClient>,
}

impl RestProvider {
    /// Provider backed by the default [`ReqwestHttpClient`].
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::default()))
    }

    pub fn with_http_client(config: ProviderConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config: Arc::new(config),
            http_client,
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn base_url(&self, resource: &str) -> Result<&str, ProviderError> {
        self.config
            .resources
            .base_url(resource)
            .ok_or_else(|| ProviderError::UnknownResource {
                resource: resource.to_owned(),
            })
    }

    fn record_url(&self, resource: &str, id: &RecordId) -> Result<String, ProviderError> {
        Ok(format!("{}/{id}", self.base_url(resource)?))
    }

    fn prepare(&self, mut request: HttpRequest) -> HttpRequest {
        for (name, value) in &self.config.headers {
            request = request.with_header(name.as_str(), value.as_str());
        }
        request.with_timeout_ms(self.config.timeout_ms)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ProviderError> {
        let request = self.prepare(request);
        debug!(method = %request.method, url = %request.url, "dispatching request");
        Ok(self.http_client.execute(request).await?)
    }

    async fn fetch_page(
        &self,
        resource: &str,
        pagination: Pagination,
        sort: &Sort,
        filter: &Filter,
    ) -> Result<ListResult, ProviderError> {
        let query = QueryParams::new()
            .with_sort(sort)?
            .with_range(pagination)?
            .with_filter(filter)?;
        let url = with_query(self.base_url(resource)?, &query);

        let response = self.send(HttpRequest::get(url)).await?;
        let header = response.header("content-range").ok_or_else(|| {
            ProviderError::MissingContentRange {
                resource: resource.to_owned(),
            }
        })?;
        let total = match parse_total(header) {
            Some(total) => total,
            None => {
                warn!(
                    resource,
                    content_range = header,
                    fallback = self.config.fallback_total,
                    "unparsable Content-Range total, using fallback"
                );
                self.config.fallback_total
            }
        };

        Ok(ListResult {
            data: response.json(),
            total,
        })
    }

    /// Issues one request per id concurrently and reads each response's `id`
    /// back in request order, falling back to the requested id.
    async fn fan_out(
        &self,
        resource: &str,
        ids: &[RecordId],
        build: impl Fn(String) -> HttpRequest,
    ) -> Result<IdsResult, ProviderError> {
        debug!(resource, count = ids.len(), "fanning out bulk request");

        let calls = ids
            .iter()
            .map(|id| {
                let url = self.record_url(resource, id);
                let request = url.map(&build);
                async move {
                    let response = self.send(request?).await?;
                    Ok::<_, ProviderError>(
                        RecordId::from_value(&response.json()["id"]).unwrap_or_else(|| id.clone()),
                    )
                }
            })
            .collect::<Vec<_>>();

        Ok(IdsResult {
            data: try_join_all(calls).await?,
        })
    }
}

impl DataProvider for RestProvider {
    fn get_list<'a>(
        &'a self,
        resource: &'a str,
        params: GetListParams,
    ) -> ProviderFuture<'a, ListResult> {
        Box::pin(async move {
            self.fetch_page(resource, params.pagination, &params.sort, &params.filter)
                .await
        })
    }

    fn get_one<'a>(
        &'a self,
        resource: &'a str,
        params: GetOneParams,
    ) -> ProviderFuture<'a, RecordResult> {
        Box::pin(async move {
            let url = self.record_url(resource, &params.id)?;
            let response = self.send(HttpRequest::get(url)).await?;
            Ok(RecordResult {
                data: response.json(),
            })
        })
    }

    fn get_many<'a>(
        &'a self,
        resource: &'a str,
        params: GetManyParams,
    ) -> ProviderFuture<'a, RecordsResult> {
        Box::pin(async move {
            let mut filter = Filter::new();
            filter.insert(String::from("id"), serde_json::to_value(&params.ids)?);
            let query = QueryParams::new().with_filter(&filter)?;
            let url = with_query(self.base_url(resource)?, &query);

            let response = self.send(HttpRequest::get(url)).await?;
            Ok(RecordsResult {
                data: response.json(),
            })
        })
    }

    fn get_many_reference<'a>(
        &'a self,
        resource: &'a str,
        params: GetManyReferenceParams,
    ) -> ProviderFuture<'a, ListResult> {
        Box::pin(async move {
            let filter = params.reference_filter();
            self.fetch_page(resource, params.pagination, &params.sort, &filter)
                .await
        })
    }

    fn update<'a>(
        &'a self,
        resource: &'a str,
        params: UpdateParams,
    ) -> ProviderFuture<'a, RecordResult> {
        Box::pin(async move {
            let url = self.record_url(resource, &params.id)?;
            let body = serde_json::to_string(&params.data)?;
            let response = self.send(HttpRequest::put(url).with_body(body)).await?;
            Ok(RecordResult {
                data: response.json(),
            })
        })
    }

    fn update_many<'a>(
        &'a self,
        resource: &'a str,
        params: UpdateManyParams,
    ) -> ProviderFuture<'a, IdsResult> {
        Box::pin(async move {
            let body = serde_json::to_string(&params.data)?;
            self.fan_out(resource, &params.ids, |url| {
                HttpRequest::put(url).with_body(body.clone())
            })
            .await
        })
    }

    fn create<'a>(
        &'a self,
        resource: &'a str,
        params: CreateParams,
    ) -> ProviderFuture<'a, RecordResult> {
        Box::pin(async move {
            let url = self.base_url(resource)?.to_owned();
            let body = serde_json::to_string(&params.data)?;
            let response = self.send(HttpRequest::post(url).with_body(body)).await?;

            let mut data = params.data;
            match response.json().get("id") {
                Some(id) if !id.is_null() => {
                    data.insert(String::from("id"), id.clone());
                }
                _ => debug!(resource, "create response carried no id"),
            }
            Ok(RecordResult {
                data: Value::Object(data),
            })
        })
    }

    fn delete<'a>(
        &'a self,
        resource: &'a str,
        params: DeleteParams,
    ) -> ProviderFuture<'a, RecordResult> {
        Box::pin(async move {
            let url = self.record_url(resource, &params.id)?;
            let response = self.send(HttpRequest::delete(url)).await?;
            Ok(RecordResult {
                data: response.json(),
            })
        })
    }

    fn delete_many<'a>(
        &'a self,
        resource: &'a str,
        params: DeleteManyParams,
    ) -> ProviderFuture<'a, IdsResult> {
        Box::pin(async move {
            self.fan_out(resource, &params.ids, |url| HttpRequest::delete(url))
                .await
        })
    }
}
