//! HTTP transport for the BigGIM API.
//!
//! The trait is the seam everything above sits on: the real implementation
//! wraps a `reqwest::Client`, tests script responses in memory.

use async_trait::async_trait;
use reqwest::ClientBuilder;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{BigGimError, Result};

/// Request primitives against a single API deployment.
///
/// `endpoint` arguments are paths relative to the configured base URL;
/// `fetch_text` takes absolute URLs (result shards live on external
/// storage, not under the API base path).
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn get_json(&self, endpoint: &str, params: &[(String, String)]) -> Result<Value>;

    async fn post_form(&self, endpoint: &str, form: &[(String, String)]) -> Result<Value>;

    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// [`ApiTransport`] over a `reqwest::Client` with the configured
/// per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Turn a non-2xx response into [`BigGimError::Http`], logging the
    /// failing request and the error body the server sent.
    async fn check(url: &str, resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let text = resp.text().await.unwrap_or_default();
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::String(text));
        warn!(%url, status = status.as_u16(), %body, "request failed");
        Err(BigGimError::Http { status: status.as_u16(), body })
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn get_json(&self, endpoint: &str, params: &[(String, String)]) -> Result<Value> {
        let url = self.endpoint_url(endpoint);
        let resp = self.client.get(&url).query(params).send().await?;
        let resp = Self::check(&url, resp).await?;
        debug!(%url, "sent GET");
        Ok(resp.json().await?)
    }

    // No success-path event here; submissions are already logged by the
    // orchestrator once a request_id is known.
    async fn post_form(&self, endpoint: &str, form: &[(String, String)]) -> Result<Value> {
        let url = self.endpoint_url(endpoint);
        let resp = self.client.post(&url).form(form).send().await?;
        let resp = Self::check(&url, resp).await?;
        Ok(resp.json().await?)
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send().await?;
        let resp = Self::check(url, resp).await?;
        debug!(%url, "fetched shard");
        Ok(resp.text().await?)
    }
}
