use serde::Deserialize;

/// Paginated list envelope returned by every collection endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Total number of records across all pages.
    pub count: u64,
    /// URL of the next page, if any.
    pub next: Option<String>,
    /// URL of the previous page, if any.
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}
