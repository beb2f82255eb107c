use std::path::PathBuf;

use thiserror::Error;

use crate::http_client::HttpError;

/// Validation errors raised when building request values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("page must be at least 1")]
    InvalidPage,
    #[error("per_page must be at least 1")]
    InvalidPerPage,
    #[error("page {page} of size {per_page} lies beyond the addressable range")]
    PageOutOfRange { page: u64, per_page: u64 },
    #[error("sort field cannot be empty")]
    EmptySortField,
    #[error("invalid sort order '{value}', expected ASC or DESC")]
    InvalidSortOrder { value: String },
    #[error("reference target field cannot be empty")]
    EmptyTarget,
}

/// Errors raised while loading or validating a [`ProviderConfig`](crate::ProviderConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config must declare at least one resource")]
    NoResources,

    #[error("resource name cannot be empty")]
    EmptyResourceName,

    #[error("resource '{resource}' has an empty base URL")]
    EmptyBaseUrl { resource: String },

    #[error("timeout_ms must be greater than zero")]
    InvalidTimeout,
}

/// Error returned by every [`DataProvider`](crate::DataProvider) operation.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(
        "The Content-Range header is missing in the HTTP response for resource '{resource}'. \
         The REST data provider expects responses for lists of resources to contain this header \
         with the total number of results to build the pagination. If you are using CORS, did \
         you declare Content-Range in the Access-Control-Expose-Headers header?"
    )]
    MissingContentRange { resource: String },

    #[error("resource '{resource}' has no configured base URL")]
    UnknownResource { resource: String },

    #[error(transparent)]
    Transport(#[from] HttpError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProviderError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingContentRange { .. } => "provider.missing_content_range",
            Self::UnknownResource { .. } => "provider.unknown_resource",
            Self::Transport(_) => "provider.transport",
            Self::Validation(_) => "provider.invalid_request",
            Self::Serialization(_) => "provider.serialization",
        }
    }

    /// The underlying transport error, when the failure came from the wire.
    pub fn transport(&self) -> Option<&HttpError> {
        match self {
            Self::Transport(error) => Some(error),
            _ => None,
        }
    }
}
