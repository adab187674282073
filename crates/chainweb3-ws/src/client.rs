//! WebSocket JSON-RPC provider with auto-reconnect.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio::time;
use tokio_tungstenite::tungstenite::Message;

use chainweb3_core::error::TransportError;
use chainweb3_core::provider::{JsonRpc2, Provider, RequestFactory};
use chainweb3_core::request::{JsonRpcRequest, JsonRpcResponse, RpcId};

type Reply = oneshot::Sender<Result<JsonRpcResponse, TransportError>>;

/// Configuration for the WebSocket provider.
#[derive(Debug, Clone)]
pub struct WsProviderConfig {
    /// Reconnect backoff starting duration.
    pub reconnect_initial: Duration,
    /// Maximum reconnect backoff.
    pub reconnect_max: Duration,
}

impl Default for WsProviderConfig {
    fn default() -> Self {
        Self {
            reconnect_initial: Duration::from_millis(500),
            reconnect_max: Duration::from_secs(60),
        }
    }
}

/// Command sent from callers to the background WS task.
enum WsCommand {
    Send { req: JsonRpcRequest, tx: Reply },
    Close,
}

/// WebSocket JSON-RPC provider.
///
/// A background task owns the connection, writes requests as text frames
/// and routes responses back to their callers by request id. Requests
/// issued while the task is waiting to reconnect fail immediately; requests
/// in flight when the socket drops fail with [`TransportError::WebSocket`].
pub struct WsProvider {
    url: String,
    cmd_tx: mpsc::UnboundedSender<WsCommand>,
    rpc: Arc<JsonRpc2>,
}

impl WsProvider {
    /// Start the background task for `url`. The first connection attempt
    /// happens in the background; requests sent before it completes are
    /// queued.
    pub async fn connect(
        url: impl Into<String>,
        config: WsProviderConfig,
    ) -> Result<Self, TransportError> {
        let url = url.into();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<WsCommand>();
        let url_clone = url.clone();

        tokio::spawn(async move {
            ws_task(url_clone, cmd_rx, config).await;
        });

        Ok(Self {
            url,
            cmd_tx,
            rpc: Arc::new(JsonRpc2::new()),
        })
    }
}

impl Drop for WsProvider {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(WsCommand::Close);
    }
}

#[async_trait]
impl Provider for WsProvider {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(WsCommand::Send { req, tx })
            .map_err(|_| TransportError::Closed)?;
        rx.await.map_err(|_| TransportError::Closed)?
    }

    fn rpc_method(&self) -> Arc<dyn RequestFactory> {
        self.rpc.clone()
    }

    fn url(&self) -> &str {
        &self.url
    }
}

/// Background task that owns the WebSocket connection.
async fn ws_task(url: String, mut cmd_rx: mpsc::UnboundedReceiver<WsCommand>, config: WsProviderConfig) {
    let mut pending: HashMap<RpcId, Reply> = HashMap::new();
    let mut backoff = config.reconnect_initial;

    loop {
        tracing::info!(url = %url, "connecting via WebSocket");

        match tokio_tungstenite::connect_async(url.as_str()).await {
            Err(e) => {
                tracing::warn!(error = %e, "WS connect failed, retrying in {backoff:?}");
            }
            Ok((ws_stream, _)) => {
                backoff = config.reconnect_initial;
                let (mut sink, mut stream) = ws_stream.split();

                loop {
                    tokio::select! {
                        cmd = cmd_rx.recv() => {
                            match cmd {
                                None | Some(WsCommand::Close) => {
                                    let _ = sink.close().await;
                                    fail_pending(&mut pending, "provider closed");
                                    return;
                                }
                                Some(WsCommand::Send { req, tx }) => {
                                    let msg = match serde_json::to_string(&req) {
                                        Ok(msg) => msg,
                                        Err(e) => {
                                            let _ = tx.send(Err(e.into()));
                                            continue;
                                        }
                                    };
                                    tracing::debug!(method = %req.method, id = %req.id, "WS request");
                                    if !track_pending(&mut pending, req.id, tx) {
                                        continue;
                                    }
                                    if let Err(e) = sink.send(Message::Text(msg.into())).await {
                                        tracing::warn!(error = %e, "WS send failed");
                                        break;
                                    }
                                }
                            }
                        }
                        msg = stream.next() => {
                            match msg {
                                None => break,
                                Some(Err(e)) => {
                                    tracing::warn!(error = %e, "WS receive error");
                                    break;
                                }
                                Some(Ok(Message::Text(text))) => {
                                    handle_message(text.as_str(), &mut pending);
                                }
                                Some(Ok(Message::Close(_))) => break,
                                _ => {}
                            }
                        }
                    }
                }

                fail_pending(&mut pending, "connection lost");
                tracing::warn!(url = %url, "WS disconnected, reconnecting in {backoff:?}");
            }
        }

        if !wait_for_reconnect(&mut cmd_rx, backoff).await {
            return;
        }
        backoff = (backoff * 2).min(config.reconnect_max);
    }
}

/// Sleep for `backoff`, rejecting requests that arrive meanwhile. Returns
/// `false` if the provider was closed.
async fn wait_for_reconnect(cmd_rx: &mut mpsc::UnboundedReceiver<WsCommand>, backoff: Duration) -> bool {
    let deadline = time::sleep(backoff);
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            _ = &mut deadline => return true,
            cmd = cmd_rx.recv() => match cmd {
                None | Some(WsCommand::Close) => return false,
                Some(WsCommand::Send { tx, .. }) => {
                    let _ = tx.send(Err(TransportError::WebSocket("not connected".into())));
                }
            }
        }
    }
}

/// Register `tx` as the reply slot for `id`. A second request with an id
/// that is still in flight is rejected and the first caller keeps its slot.
fn track_pending(pending: &mut HashMap<RpcId, Reply>, id: RpcId, tx: Reply) -> bool {
    match pending.entry(id) {
        Entry::Occupied(slot) => {
            tracing::warn!(id = %slot.key(), "WS request id already in flight");
            let _ = tx.send(Err(TransportError::Other(format!(
                "request id {} is already in flight",
                slot.key()
            ))));
            false
        }
        Entry::Vacant(slot) => {
            slot.insert(tx);
            true
        }
    }
}

fn fail_pending(pending: &mut HashMap<RpcId, Reply>, reason: &str) {
    for (_, tx) in pending.drain() {
        let _ = tx.send(Err(TransportError::WebSocket(reason.to_string())));
    }
}

fn handle_message(text: &str, pending: &mut HashMap<RpcId, Reply>) {
    match serde_json::from_str::<JsonRpcResponse>(text) {
        Ok(resp) => match pending.remove(&resp.id) {
            Some(tx) => {
                let _ = tx.send(Ok(resp));
            }
            None => tracing::debug!(id = %resp.id, "WS response for unknown request"),
        },
        Err(e) => tracing::debug!(error = %e, "ignoring non-response WS message"),
    }
}
