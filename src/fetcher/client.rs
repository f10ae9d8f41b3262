use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

use super::{ApiResult, FetchError, ResultFetcher};
use crate::dataset::{DatasetResult, datasets_from_response};

/// Default address of the aggregation API
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the clustering aggregation API
pub struct ApiClient {
    http: Client,
    endpoint: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;
        let endpoint: String = endpoint.into();
        let endpoint = endpoint.trim_end_matches('/').to_string();

        Ok(Self {
            http,
            endpoint,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check if the API server is up
    pub async fn health_check(&self) -> Result<String, FetchError> {
        let response = self
            .http
            .get(format!("{}/health", self.endpoint))
            .send()
            .await?;

        let response = ensure_success(response).await?;
        Ok(response.text().await?)
    }

    /// Fetch the raw aggregation response for `k`
    pub async fn fetch_results(&self, k: u32) -> Result<Vec<ApiResult>, FetchError> {
        tracing::debug!(endpoint = %self.endpoint, k, "requesting aggregation");

        let response = self
            .http
            .get(format!("{}/aggregate", self.endpoint))
            .query(&[("k", k)])
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ResultFetcher for ApiClient {
    async fn aggregate(&self, k: u32) -> Result<Vec<DatasetResult>, FetchError> {
        let results = self.fetch_results(k).await?;
        Ok(datasets_from_response(results))
    }

    async fn generate(&self) -> Result<(), FetchError> {
        tracing::debug!(endpoint = %self.endpoint, "requesting new source data");

        let response = self
            .http
            .post(format!("{}/generate", self.endpoint))
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(FetchError::Status {
        status: status.as_u16(),
        body,
    })
}
