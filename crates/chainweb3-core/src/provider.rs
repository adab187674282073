//! The `Provider` trait every transport implements, and the request
//! factories that give each provider its id scheme.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::{JsonRpcRequest, JsonRpcResponse};

/// Builds requests in a provider's wire dialect.
///
/// The factory owns the correlation id sequence, so two factories never
/// share or disturb each other's ids.
pub trait RequestFactory: Send + Sync {
    /// A request for `method` with no parameters bound.
    fn new_request(&self, method: &str) -> JsonRpcRequest;
}

/// Standard JSON-RPC 2.0 factory with a monotonic numeric id per instance.
#[derive(Debug)]
pub struct JsonRpc2 {
    next_id: AtomicU64,
}

impl JsonRpc2 {
    /// Ids start at 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first_id: u64) -> Self {
        Self {
            next_id: AtomicU64::new(first_id),
        }
    }
}

impl Default for JsonRpc2 {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestFactory for JsonRpc2 {
    fn new_request(&self, method: &str) -> JsonRpcRequest {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        JsonRpcRequest::new(id, method, Vec::new())
    }
}

/// The capability every transport implements: deliver one request and
/// return the node's response.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` for use across Tokio tasks.
///
/// # Object Safety
/// The trait is object-safe and is held as `Arc<dyn Provider>`.
#[async_trait]
pub trait Provider: Send + Sync + 'static {
    /// Send a single JSON-RPC request and return the response.
    ///
    /// A response carrying a JSON-RPC error object is still `Ok`; only
    /// failures to complete the round trip are `Err`.
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError>;

    /// The request factory matching this provider's wire dialect.
    fn rpc_method(&self) -> Arc<dyn RequestFactory>;

    /// Return the provider's identifier (URL, socket path or name).
    fn url(&self) -> &str;
}
