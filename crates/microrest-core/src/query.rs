//! Query-string encoding for list-style requests.
//!
//! Each parameter value is JSON-encoded on its own, then percent-encoded.
//! Keys are emitted in alphabetical order (`filter`, `range`, `sort`).

use std::collections::BTreeMap;

use crate::domain::{Filter, Pagination, Sort};

/// Builder for the `filter`/`range`/`sort` query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<&'static str, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// `sort=["<field>","<ASC|DESC>"]`
    pub fn with_sort(mut self, sort: &Sort) -> Result<Self, serde_json::Error> {
        let value = serde_json::to_string(&[sort.field(), sort.order().as_str()])?;
        self.params.insert("sort", value);
        Ok(self)
    }

    /// `range=[<start>,<end>]`, zero-based and inclusive.
    pub fn with_range(mut self, pagination: Pagination) -> Result<Self, serde_json::Error> {
        let (start, end) = pagination.range();
        let value = serde_json::to_string(&[start, end])?;
        self.params.insert("range", value);
        Ok(self)
    }

    pub fn with_filter(mut self, filter: &Filter) -> Result<Self, serde_json::Error> {
        let value = serde_json::to_string(filter)?;
        self.params.insert("filter", value);
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn encode(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Appends an encoded query string to `base`, if there is one.
pub fn with_query(base: &str, query: &QueryParams) -> String {
    if query.is_empty() {
        base.to_owned()
    } else {
        format!("{base}?{}", query.encode())
    }
}
