use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONNECTION};
use tracing::debug;

use super::Upstream;
use crate::discovery::RecordLocation;
use crate::error::{AppError, AppResult};

/// Resolved upstream instance. Immutable once built.
#[derive(Debug, Clone)]
pub struct ServiceEndpoint {
    base_url: String,
    client: reqwest::Client,
}

impl ServiceEndpoint {
    pub fn from_location(location: &RecordLocation, timeout: Duration) -> AppResult<Self> {
        Self::new(location.base_url(), timeout)
    }

    /// Every request opens a fresh connection: nothing is kept idle in the
    /// pool and the server is asked to close after responding.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|e| AppError::InvalidEndpoint(format!("{}: {}", base_url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONNECTION, HeaderValue::from_static("close"));

        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(AppError::HttpClient)?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Upstream for ServiceEndpoint {
    async fn get_json(&self, path: &str) -> AppResult<serde_json::Value> {
        let url = self.url(path);
        let upstream_err = |source| AppError::Upstream {
            path: path.to_string(),
            source,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(upstream_err)?;
        debug!(url = %url, status = response.status().as_u16(), "Upstream responded");

        response.json().await.map_err(upstream_err)
    }
}
