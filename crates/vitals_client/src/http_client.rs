//! HTTP implementation of [`VitalsSource`] over reqwest.

use crate::{Measurement, MetricKind, TrendSummary, VitalsError, VitalsSource};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

/// Client for the vitals API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestVitalsClient {
    base_url: String,
    user_id: String,
    api_key: SecretString,
    client: reqwest::Client,
}

impl ReqwestVitalsClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the vitals API
    /// * `user_id` - User whose measurements are fetched
    /// * `api_key` - API key for authentication
    pub fn new(base_url: &str, user_id: impl Into<String>, api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: user_id.into(),
            api_key,
            client,
        }
    }

    pub fn from_config(cfg: &crate::config::Config) -> Self {
        Self::new(&cfg.base_url, cfg.user_id.clone(), cfg.api_key.clone())
    }

    /// Build an authenticated GET request.
    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .bearer_auth(self.api_key.expose_secret())
    }

    /// Execute a request and expect a JSON response.
    async fn execute_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, VitalsError> {
        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(self.error_from_response(resp).await);
        }
        Ok(resp.json::<T>().await?)
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> VitalsError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();

        match status {
            404 => VitalsError::NotFound(body_snippet),
            401 | 403 => VitalsError::Auth(body_snippet),
            422 => VitalsError::InvalidInput(body_snippet),
            _ => VitalsError::from_status(status, body_snippet),
        }
    }
}

#[async_trait]
impl VitalsSource for ReqwestVitalsClient {
    async fn fetch_measurements(&self) -> Result<Vec<Measurement>, VitalsError> {
        let url = format!(
            "{}/api/v1/users/{}/measurements",
            self.base_url, self.user_id
        );
        tracing::debug!(user_id = %self.user_id, "fetching measurements");
        let measurements: Vec<Measurement> = self.execute_json(self.get_request(&url)).await?;
        tracing::debug!(count = measurements.len(), "fetched measurements");
        Ok(measurements)
    }

    async fn fetch_trend_summary(&self, kind: MetricKind) -> Result<TrendSummary, VitalsError> {
        let url = format!(
            "{}/api/v1/users/{}/trends/{}",
            self.base_url,
            self.user_id,
            kind.as_str()
        );
        tracing::debug!(user_id = %self.user_id, metric = %kind, "fetching trend summary");
        self.execute_json(self.get_request(&url)).await
    }
}
