use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use microrest_core::{
    CreateParams, DataProvider, DeleteManyParams, DeleteParams, GetListParams, GetManyParams,
    GetManyReferenceParams, GetOneParams, HttpMethod, HttpRequest, HttpResponse, Pagination,
    RecordId, Sort, UpdateManyParams, UpdateParams,
};
use serde_json::{json, Value};

#[path = "../support/mod.rs"]
mod support;

use support::{provider, record, RecordingHttpClient, Reply, COMMENTS_URL, POSTS_URL};

/// In-memory backend answering every operation the way a conforming service would.
fn conforming_backend() -> Arc<RecordingHttpClient> {
    Arc::new(RecordingHttpClient::new(|request: &HttpRequest| {
        let path = request.url.split('?').next().unwrap_or_default();
        let tail = path.rsplit('/').next().unwrap_or_default();
        let id: Value = tail
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::from(tail));

        match request.method {
            HttpMethod::Get if request.url.contains('?') => Reply::ok(
                HttpResponse::ok_json(json!([{"id": 1}, {"id": 2}]).to_string())
                    .with_header("Content-Range", "items 0-1/2"),
            ),
            HttpMethod::Get => Reply::json(json!({"id": id, "title": "stored"})),
            HttpMethod::Post => Reply::json(json!({"id": 500})),
            HttpMethod::Put => Reply::json(json!({"id": id, "title": "updated"})),
            HttpMethod::Delete => Reply::json(json!({"id": id})),
        }
    }))
}

struct OperationCase {
    name: &'static str,
    method: HttpMethod,
    url_prefix: String,
    requests: usize,
}

fn run_case(
    provider: &dyn DataProvider,
    name: &str,
) -> Result<Value, microrest_core::ProviderError> {
    let page = || Pagination::new(1, 2).expect("valid pagination");
    let data = || record(json!({"title": "draft"}));

    let value = match name {
        "get_list" => serde_json::to_value(block_on(
            provider.get_list("posts", GetListParams::new(page(), Sort::default())),
        )?),
        "get_one" => serde_json::to_value(block_on(
            provider.get_one("posts", GetOneParams::new(1)),
        )?),
        "get_many" => serde_json::to_value(block_on(
            provider.get_many("posts", GetManyParams::new([1, 2])),
        )?),
        "get_many_reference" => serde_json::to_value(block_on(provider.get_many_reference(
            "comments",
            GetManyReferenceParams::new("post_id", 1, page(), Sort::default())
                .expect("valid params"),
        ))?),
        "update" => serde_json::to_value(block_on(
            provider.update("posts", UpdateParams::new(1, data())),
        )?),
        "update_many" => serde_json::to_value(block_on(
            provider.update_many("posts", UpdateManyParams::new([1, 2], data())),
        )?),
        "create" => serde_json::to_value(block_on(
            provider.create("posts", CreateParams::new(data())),
        )?),
        "delete" => serde_json::to_value(block_on(provider.delete("posts", DeleteParams::new(1)))?),
        "delete_many" => serde_json::to_value(block_on(
            provider.delete_many("posts", DeleteManyParams::new([1, 2])),
        )?),
        other => panic!("unknown operation '{other}'"),
    };

    Ok(value.expect("results serialize to JSON"))
}

fn operation_cases() -> Vec<OperationCase> {
    let case = |name, method, url_prefix: &str, requests| OperationCase {
        name,
        method,
        url_prefix: url_prefix.to_owned(),
        requests,
    };

    vec![
        case("get_list", HttpMethod::Get, POSTS_URL, 1),
        case("get_one", HttpMethod::Get, POSTS_URL, 1),
        case("get_many", HttpMethod::Get, POSTS_URL, 1),
        case("get_many_reference", HttpMethod::Get, COMMENTS_URL, 1),
        case("update", HttpMethod::Put, POSTS_URL, 1),
        case("update_many", HttpMethod::Put, POSTS_URL, 2),
        case("create", HttpMethod::Post, POSTS_URL, 1),
        case("delete", HttpMethod::Delete, POSTS_URL, 1),
        case("delete_many", HttpMethod::Delete, POSTS_URL, 2),
    ]
}

#[test]
fn every_operation_issues_expected_requests() {
    for case in operation_cases() {
        let client = conforming_backend();
        let provider = provider(client.clone());

        run_case(&provider, case.name)
            .unwrap_or_else(|error| panic!("operation '{}' failed: {error}", case.name));

        let requests = client.recorded_requests();
        assert_eq!(requests.len(), case.requests, "operation '{}': request count", case.name);
        for request in &requests {
            assert_eq!(request.method, case.method, "operation '{}': method", case.name);
            assert!(
                request.url.starts_with(&case.url_prefix),
                "operation '{}': url {} outside {}",
                case.name,
                request.url,
                case.url_prefix
            );
            assert_ne!(request.method.as_str(), "PATCH");
        }
    }
}

#[test]
fn every_operation_returns_documented_shape() {
    for case in operation_cases() {
        let provider = provider(conforming_backend());
        let result = run_case(&provider, case.name)
            .unwrap_or_else(|error| panic!("operation '{}' failed: {error}", case.name));

        let data = result
            .get("data")
            .unwrap_or_else(|| panic!("operation '{}': missing data", case.name));
        match case.name {
            "get_list" | "get_many_reference" => {
                assert!(data.is_array(), "operation '{}': data must be a list", case.name);
                assert_eq!(result["total"], json!(2), "operation '{}': total", case.name);
            }
            "get_many" => assert!(data.is_array()),
            "update_many" | "delete_many" => assert_eq!(data, &json!([1, 2])),
            _ => {
                assert!(data.is_object(), "operation '{}': data must be a record", case.name);
                assert!(data.get("id").is_some(), "operation '{}': record id", case.name);
            }
        }
    }
}

#[test]
fn create_reports_server_id_over_submitted_payload() {
    let provider = provider(conforming_backend());

    let result = run_case(&provider, "create").expect("create should succeed");

    assert_eq!(result["data"], json!({"id": 500, "title": "draft"}));
}

#[test]
fn bulk_results_keep_input_order() {
    let provider = provider(conforming_backend());
    let ids = vec![RecordId::from(9), RecordId::from("k"), RecordId::from(3)];

    let result = block_on(provider.delete_many("posts", DeleteManyParams::new(ids.clone())))
        .expect("delete_many should succeed");

    assert_eq!(result.data, ids);
}

fn block_on<F>(future: F) -> F::Output
where
    F: Future,
{
    let waker = noop_waker();
    let mut context = Context::from_waker(&waker);
    let mut future = std::pin::pin!(future);

    loop {
        match future.as_mut().poll(&mut context) {
            Poll::Ready(output) => return output,
            Poll::Pending => std::thread::yield_now(),
        }
    }
}

fn noop_waker() -> Waker {
    // SAFETY: The vtable functions never dereference the data pointer and are no-op operations.
    unsafe { Waker::from_raw(noop_raw_waker()) }
}

fn noop_raw_waker() -> RawWaker {
    RawWaker::new(std::ptr::null(), &NOOP_RAW_WAKER_VTABLE)
}

unsafe fn noop_raw_waker_clone(_: *const ()) -> RawWaker {
    noop_raw_waker()
}

unsafe fn noop_raw_waker_wake(_: *const ()) {}

unsafe fn noop_raw_waker_wake_by_ref(_: *const ()) {}

unsafe fn noop_raw_waker_drop(_: *const ()) {}

static NOOP_RAW_WAKER_VTABLE: RawWakerVTable = RawWakerVTable::new(
    noop_raw_waker_clone,
    noop_raw_waker_wake,
    noop_raw_waker_wake_by_ref,
    noop_raw_waker_drop,
);
