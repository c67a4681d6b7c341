//! Request descriptors.
//!
//! An `ApiRequest` captures everything needed to send a call so the client
//! can rebuild and replay it once after a token renewal. The descriptor is
//! never mutated by the retry path; whether a request has been replayed is
//! tracked separately as an `Attempt`.

use reqwest::Method;
use serde_json::Value;

/// Whether a request has already been replayed after a token renewal.
/// At most one replay happens per original request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    First,
    Retried,
}

/// Description of an outbound call against the API base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the configured base URL.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Common query parameters for list endpoints. Filtering happens server-side;
/// additional resource-specific filters go through `filter`.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub filters: Vec<(String, String)>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn ordering(mut self, ordering: impl Into<String>) -> Self {
        self.ordering = Some(ordering.into());
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((key.into(), value.to_string()));
        self
    }

    pub(crate) fn apply(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(page) = self.page {
            request = request.query("page", page);
        }
        if let Some(page_size) = self.page_size {
            request = request.query("page_size", page_size);
        }
        if let Some(ref search) = self.search {
            request = request.query("search", search);
        }
        if let Some(ref ordering) = self.ordering {
            request = request.query("ordering", ordering);
        }
        for (key, value) in &self.filters {
            request = request.query(key.clone(), value);
        }
        request
    }
}
