//! The request manager: one provider, one request factory.

use std::sync::Arc;

use crate::error::TransportError;
use crate::provider::{Provider, RequestFactory};
use crate::request::{JsonRpcRequest, JsonRpcResponse};

/// Binds a [`Provider`] to the [`RequestFactory`] it advertises.
///
/// The manager builds requests and forwards them to the provider unchanged.
/// It does not retry, batch, or cache, and it never interprets transport
/// errors: whatever the provider returns is what the caller gets.
///
/// ```rust,no_run
/// # async fn demo(provider: std::sync::Arc<dyn chainweb3_core::Provider>) {
/// use chainweb3_core::RequestManager;
///
/// let manager = RequestManager::new(provider);
/// let req = manager.new_request("eth_blockNumber");
/// let number = manager.send(req).await.unwrap().into_result().unwrap();
/// # }
/// ```
#[derive(Clone)]
pub struct RequestManager {
    provider: Arc<dyn Provider>,
    rpc: Arc<dyn RequestFactory>,
}

impl RequestManager {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        let rpc = provider.rpc_method();
        Self { provider, rpc }
    }

    /// A request for `method` with no parameters bound yet.
    pub fn new_request(&self, method: &str) -> JsonRpcRequest {
        self.rpc.new_request(method)
    }

    /// Send `request` through the provider and return its response.
    pub async fn send(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        tracing::debug!(
            method = %request.method,
            id = %request.id,
            url = %self.provider.url(),
            "sending request"
        );
        let result = self.provider.send(request).await;
        if let Err(e) = &result {
            tracing::debug!(error = %e, url = %self.provider.url(), "provider failed");
        }
        result
    }

    /// The provider this manager forwards to.
    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }
}

impl std::fmt::Debug for RequestManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestManager")
            .field("provider", &self.provider.url())
            .finish()
    }
}
