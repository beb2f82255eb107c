//! Shared test doubles for provider behavior tests.

#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use microrest_core::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ProviderConfig, Record, ResourceMap,
    RestProvider,
};
use serde_json::Value;
use tokio::sync::Barrier;

pub const POSTS_URL: &str = "http://posts.local/posts";
pub const COMMENTS_URL: &str = "http://comments.local/comments";
pub const USERS_URL: &str = "http://users.local/v1/users";

/// Scripted answer for one request.
pub struct Reply {
    result: Result<HttpResponse, HttpError>,
    delay: Duration,
    barrier: Option<Arc<Barrier>>,
}

impl Reply {
    pub fn ok(response: HttpResponse) -> Self {
        Self {
            result: Ok(response),
            delay: Duration::ZERO,
            barrier: None,
        }
    }

    pub fn json(body: Value) -> Self {
        Self::ok(HttpResponse::ok_json(body.to_string()))
    }

    pub fn err(error: HttpError) -> Self {
        Self {
            result: Err(error),
            delay: Duration::ZERO,
            barrier: None,
        }
    }

    /// Completes only after `delay` has elapsed.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Completes only once every party of `barrier` is in flight.
    pub fn in_step_with(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }
}

type Handler = dyn Fn(&HttpRequest) -> Reply + Send + Sync;

/// Transport double that records every request and answers from a script.
pub struct RecordingHttpClient {
    handler: Box<Handler>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingHttpClient {
    pub fn new(handler: impl Fn(&HttpRequest) -> Reply + Send + Sync + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn always(response: HttpResponse) -> Self {
        Self::new(move |_| Reply::ok(response.clone()))
    }

    pub fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }
}

impl HttpClient for RecordingHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let reply = (self.handler)(&request);
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);

        Box::pin(async move {
            if let Some(barrier) = reply.barrier {
                barrier.wait().await;
            }
            if !reply.delay.is_zero() {
                tokio::time::sleep(reply.delay).await;
            }
            reply.result
        })
    }
}

pub fn resources() -> ResourceMap {
    ResourceMap::new()
        .with_resource("posts", POSTS_URL)
        .with_resource("comments", COMMENTS_URL)
        .with_resource("users", USERS_URL)
}

pub fn provider(client: Arc<RecordingHttpClient>) -> RestProvider {
    RestProvider::with_http_client(ProviderConfig::new(resources()), client)
}

pub fn record(value: Value) -> Record {
    value
        .as_object()
        .cloned()
        .expect("record fixture must be a JSON object")
}

/// Splits a URL into its path part and decoded query pairs.
pub fn split_url(url: &str) -> (String, Vec<(String, String)>) {
    let Some((path, query)) = url.split_once('?') else {
        return (url.to_owned(), Vec::new());
    };
    let pairs = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| {
            let value = urlencoding::decode(value).expect("query value should be valid UTF-8");
            (key.to_owned(), value.into_owned())
        })
        .collect();
    (path.to_owned(), pairs)
}

/// JSON value of query parameter `key`.
pub fn query_json(url: &str, key: &str) -> Option<Value> {
    split_url(url)
        .1
        .into_iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| serde_json::from_str(&value).expect("query value should be JSON"))
}
