//! HTTP transport behind the [`ApiClient`] trait.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::FetchError;

/// Raw HTTP response: status code plus body text. Interpreting the status is
/// left to the caller, since `/execute` reports errors in non-2xx bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport to the journal backend.
///
/// Paths are absolute (`/api/facts`, `/execute`); implementations resolve them
/// against their own base URL. `Err` means no response was received at all.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<HttpReply, FetchError>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<HttpReply, FetchError>;
}

/// [`ApiClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: reqwest::Url,
}

impl HttpApiClient {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let base_url = reqwest::Url::parse(&config.base_url)
            .map_err(|e| anyhow::anyhow!("invalid api.base_url {:?}: {e}", config.base_url))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<reqwest::Url, FetchError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| FetchError::Transport(format!("bad request path {path}: {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn reply(response: reqwest::Response) -> Result<HttpReply, FetchError> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpReply { status, body })
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<HttpReply, FetchError> {
        let url = self.url(path, query)?;
        tracing::debug!(url = %url, "GET");
        let response = self.http.get(url).send().await?;
        Self::reply(response).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<HttpReply, FetchError> {
        let url = self.url(path, &[])?;
        tracing::debug!(url = %url, "POST");
        let payload = serde_json::to_vec(body).map_err(|e| FetchError::Decode(e.to_string()))?;
        let response = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;
        Self::reply(response).await
    }
}
