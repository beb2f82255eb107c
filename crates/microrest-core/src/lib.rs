//! # Microrest Core
//!
//! REST data provider for admin front-ends talking to micro-service backends,
//! where every resource is served from its own base URL.
//!
//! ## Overview
//!
//! - **Capability contract** ([`DataProvider`]) with nine CRUD operations
//! - **REST adapter** ([`RestProvider`]) mapping each operation onto HTTP
//! - **Injected transport** ([`HttpClient`]) with a reqwest-backed default
//! - **Query encoding** of `sort`, `range` and `filter` as JSON query values
//! - **Pagination totals** read from the `Content-Range` response header
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | The REST adapter |
//! | [`config`] | Resource map and request settings |
//! | [`content_range`] | `Content-Range` total parsing |
//! | [`data_provider`] | Provider trait and params/result types |
//! | [`domain`] | Pagination, sort, record and id types |
//! | [`error`] | Error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`query`] | Query-string encoding |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use microrest_core::{
//!     DataProvider, GetListParams, Pagination, ProviderConfig, ResourceMap, RestProvider, Sort,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resources = ResourceMap::new()
//!         .with_resource("posts", "https://posts.internal/posts")
//!         .with_resource("users", "https://users.internal/users");
//!     let provider = RestProvider::new(ProviderConfig::new(resources));
//!
//!     let params = GetListParams::new(Pagination::new(1, 25)?, Sort::desc("id")?);
//!     let page = provider.get_list("posts", params).await?;
//!     println!("{} posts in total", page.total);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Wire Conventions
//!
//! ```text
//! GET    <base>?filter={..}&range=[0,24]&sort=["id","DESC"]   -> Content-Range: posts 0-24/319
//! GET    <base>/<id>
//! GET    <base>?filter={"id":[1,2,3]}
//! POST   <base>          body = record
//! PUT    <base>/<id>     body = record
//! DELETE <base>/<id>
//! ```
//!
//! Bulk updates and deletes become one request per id, sent concurrently.
//!
//! ## Error Handling
//!
//! Every operation returns [`ProviderError`]:
//!
//! ```rust
//! use microrest_core::ProviderError;
//!
//! fn describe(error: &ProviderError) -> String {
//!     match error {
//!         ProviderError::MissingContentRange { resource } => {
//!             format!("backend for '{resource}' must expose Content-Range")
//!         }
//!         ProviderError::Transport(http) => match http.status() {
//!             Some(status) => format!("backend answered {status}"),
//!             None => String::from("backend unreachable"),
//!         },
//!         other => other.to_string(),
//!     }
//! }
//! ```

pub mod adapters;
pub mod config;
pub mod content_range;
pub mod data_provider;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod query;

// Adapter implementation
pub use adapters::RestProvider;

// Configuration
pub use config::{ProviderConfig, ResourceMap};

// Provider trait and types
pub use data_provider::{
    CreateParams, DataProvider, DeleteManyParams, DeleteParams, GetListParams, GetManyParams,
    GetManyReferenceParams, GetOneParams, IdsResult, ListResult, ProviderFuture, RecordResult,
    RecordsResult, UpdateManyParams, UpdateParams,
};

// Domain types
pub use domain::{Filter, Pagination, Record, RecordId, Sort, SortOrder};

// Error types
pub use error::{ConfigError, ProviderError, ValidationError};

// HTTP client types
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
};

// Query encoding
pub use query::QueryParams;
