//! HTTP JSON-RPC provider backed by `reqwest`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use chainweb3_core::error::TransportError;
use chainweb3_core::provider::{JsonRpc2, Provider, RequestFactory};
use chainweb3_core::request::{JsonRpcRequest, JsonRpcResponse};

/// Configuration for [`HttpProvider`].
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Whole-request timeout, connect included.
    pub request_timeout: Duration,
    /// Extra headers sent with every request (e.g. API keys).
    pub headers: Vec<(String, String)>,
}

impl Default for HttpProviderConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            headers: Vec::new(),
        }
    }
}

/// Sends each request as one HTTP POST to a JSON-RPC endpoint.
pub struct HttpProvider {
    url: String,
    http: reqwest::Client,
    rpc: Arc<JsonRpc2>,
    request_timeout: Duration,
}

impl HttpProvider {
    /// Create a provider for the given endpoint URL.
    pub fn new(url: impl Into<String>, config: HttpProviderConfig) -> Result<Self, TransportError> {
        let mut headers = reqwest::header::HeaderMap::new();
        for (name, value) in &config.headers {
            let name = reqwest::header::HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::Other(format!("invalid header name {name}: {e}")))?;
            let value = reqwest::header::HeaderValue::from_str(value)
                .map_err(|e| TransportError::Other(format!("invalid header value: {e}")))?;
            headers.insert(name, value);
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| TransportError::Http(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            http,
            rpc: Arc::new(JsonRpc2::new()),
            request_timeout: config.request_timeout,
        })
    }

    /// Create with default configuration.
    pub fn default_for(url: impl Into<String>) -> Result<Self, TransportError> {
        Self::new(url, HttpProviderConfig::default())
    }

    fn map_send_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                ms: self.request_timeout.as_millis() as u64,
            }
        } else {
            TransportError::Http(e.to_string())
        }
    }
}

#[async_trait]
impl Provider for HttpProvider {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        tracing::debug!(method = %req.method, id = %req.id, url = %self.url, "HTTP request");

        let resp = self
            .http
            .post(&self.url)
            .json(&req)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Http(format!("HTTP {status}: {body}")));
        }

        let body = resp.bytes().await.map_err(|e| self.map_send_error(e))?;
        Ok(serde_json::from_slice::<JsonRpcResponse>(&body)?)
    }

    fn rpc_method(&self) -> Arc<dyn RequestFactory> {
        self.rpc.clone()
    }

    fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for HttpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProvider").field("url", &self.url).finish()
    }
}
