/// HTTP-backed book service
///
/// Talks to the recommendation backend:
/// 1. Catalog: `GET /books`
/// 2. Recommendations: `POST /recommendations` with `{ "likedBooks": [...] }`
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{Book, RecommendationRequest},
    services::{normalize::normalize_body, BookService},
};
use reqwest::{Client as HttpClient, Response};

#[derive(Clone)]
pub struct HttpBookService {
    http_client: HttpClient,
    api_url: String,
}

impl HttpBookService {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(HttpClient::new(), api_url)
    }

    pub fn with_client(http_client: HttpClient, api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds a service from configuration, applying the request timeout
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(http_client, config.api_base_url.clone()))
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Reads a successful response body and normalizes it
    async fn read_books(response: Response) -> AppResult<Vec<Book>> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Book service returned error status");
            return Err(AppError::ExternalApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        Ok(normalize_body(&body))
    }
}

#[async_trait::async_trait]
impl BookService for HttpBookService {
    async fn fetch_catalog(&self) -> AppResult<Vec<Book>> {
        let url = format!("{}/books", self.api_url);
        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::error!(error = %e, url = %url, "Catalog request failed");
            e
        })?;

        let books = Self::read_books(response).await?;

        tracing::info!(
            books = books.len(),
            provider = self.name(),
            "Catalog fetched"
        );

        Ok(books)
    }

    async fn fetch_recommendations(&self, liked_titles: &[String]) -> AppResult<Vec<Book>> {
        tracing::info!(liked = liked_titles.len(), "Requesting recommendations");

        let url = format!("{}/recommendations", self.api_url);
        let request = RecommendationRequest {
            liked_books: liked_titles.to_vec(),
        };
        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, url = %url, "Recommendation request failed");
                e
            })?;

        let books = Self::read_books(response).await?;

        if books.is_empty() {
            tracing::warn!("Received empty recommendations list");
        }

        tracing::info!(
            recommendations = books.len(),
            provider = self.name(),
            "Recommendations fetched"
        );

        Ok(books)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
