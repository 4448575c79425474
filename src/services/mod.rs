use crate::{error::AppResult, models::Book};

pub mod http;
pub mod normalize;

pub use http::HttpBookService;
pub use normalize::{normalize_body, normalize_books};

/// Source of catalog and recommendation data
///
/// Implementations return `Err` only when the request itself failed (transport
/// error or non-success status). Payloads that cannot be decoded are normalized to
/// an empty list and logged, so callers never see a decode error from here.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BookService: Send + Sync {
    /// Fetch the full book catalog
    async fn fetch_catalog(&self) -> AppResult<Vec<Book>>;

    /// Fetch recommendations for the given liked titles
    async fn fetch_recommendations(&self, liked_titles: &[String]) -> AppResult<Vec<Book>>;

    /// Service name for logging and debugging
    fn name(&self) -> &'static str;
}
