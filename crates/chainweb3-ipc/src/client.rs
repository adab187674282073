//! IPC provider: newline-delimited JSON-RPC over a Unix socket.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::sync::Mutex;

use chainweb3_core::error::TransportError;
use chainweb3_core::provider::{JsonRpc2, Provider, RequestFactory};
use chainweb3_core::request::{JsonRpcRequest, JsonRpcResponse};

/// Configuration for [`IpcProvider`].
#[derive(Debug, Clone)]
pub struct IpcProviderConfig {
    /// Bound on one write-then-read exchange, connect included.
    pub request_timeout: Duration,
}

impl Default for IpcProviderConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Talks to a node over its IPC socket (e.g. `geth.ipc`).
///
/// One connection is opened lazily and shared; requests take turns on it.
/// Any I/O failure or timeout discards the connection so the next request
/// starts on a fresh one.
pub struct IpcProvider {
    path: PathBuf,
    label: String,
    rpc: Arc<JsonRpc2>,
    conn: Mutex<Option<BufReader<UnixStream>>>,
    request_timeout: Duration,
}

impl IpcProvider {
    pub fn new(path: impl AsRef<Path>, config: IpcProviderConfig) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            label: path.display().to_string(),
            path,
            rpc: Arc::new(JsonRpc2::new()),
            conn: Mutex::new(None),
            request_timeout: config.request_timeout,
        }
    }

    /// Create with default configuration.
    pub fn default_for(path: impl AsRef<Path>) -> Self {
        Self::new(path, IpcProviderConfig::default())
    }

    async fn exchange(
        &self,
        conn: &mut Option<BufReader<UnixStream>>,
        req: &JsonRpcRequest,
    ) -> Result<JsonRpcResponse, TransportError> {
        let mut line = serde_json::to_string(req)?;
        line.push('\n');

        if conn.is_none() {
            tracing::debug!(path = %self.label, "opening IPC connection");
            let stream = UnixStream::connect(&self.path).await.map_err(ipc_error)?;
            *conn = Some(BufReader::new(stream));
        }
        let Some(stream) = conn.as_mut() else {
            return Err(TransportError::Closed);
        };

        stream.get_mut().write_all(line.as_bytes()).await.map_err(ipc_error)?;

        let mut buf = String::new();
        loop {
            buf.clear();
            let n = stream.read_line(&mut buf).await.map_err(ipc_error)?;
            if n == 0 {
                return Err(TransportError::Ipc("connection closed by peer".into()));
            }
            let text = buf.trim();
            if text.is_empty() {
                continue;
            }
            // Subscription notifications share the socket; skip anything
            // that is not the answer to this request.
            match serde_json::from_str::<JsonRpcResponse>(text) {
                Ok(resp) if resp.id == req.id => return Ok(resp),
                Ok(resp) => tracing::debug!(id = %resp.id, "IPC response for another request"),
                Err(_) if is_notification(text) => {
                    tracing::trace!("skipping IPC notification");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

fn ipc_error(e: std::io::Error) -> TransportError {
    TransportError::Ipc(e.to_string())
}

fn is_notification(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text)
        .map(|v| v.get("method").is_some() && v.get("id").is_none())
        .unwrap_or(false)
}

#[async_trait]
impl Provider for IpcProvider {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        tracing::debug!(method = %req.method, id = %req.id, path = %self.label, "IPC request");

        let mut conn = self.conn.lock().await;
        let outcome = tokio::time::timeout(self.request_timeout, self.exchange(&mut conn, &req)).await;
        let result = match outcome {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout {
                ms: self.request_timeout.as_millis() as u64,
            }),
        };

        if let Err(e) = &result {
            if conn.take().is_some() {
                tracing::warn!(error = %e, path = %self.label, "dropping IPC connection");
            }
        }
        result
    }

    fn rpc_method(&self) -> Arc<dyn RequestFactory> {
        self.rpc.clone()
    }

    fn url(&self) -> &str {
        &self.label
    }
}

impl std::fmt::Debug for IpcProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IpcProvider").field("path", &self.label).finish()
    }
}
