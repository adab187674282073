//! Request manager round trips against a scripted provider, decoding the
//! results into domain types.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use chainweb3_core::types::{decode_receipt, decode_transaction, DecodeMode, Quantity};
use chainweb3_core::{
    JsonRpc2, JsonRpcRequest, JsonRpcResponse, Provider, RequestFactory, RequestManager, RpcError,
    TransportError, Web3Error,
};

/// Answers by method name; unknown methods get a -32601 error object.
struct ScriptedProvider {
    rpc: Arc<JsonRpc2>,
    answers: HashMap<&'static str, Value>,
}

impl ScriptedProvider {
    fn new(answers: impl IntoIterator<Item = (&'static str, Value)>) -> Arc<Self> {
        Arc::new(Self {
            rpc: Arc::new(JsonRpc2::new()),
            answers: answers.into_iter().collect(),
        })
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        Ok(match self.answers.get(req.method.as_str()) {
            Some(result) => JsonRpcResponse::success(req.id, result.clone()),
            None => JsonRpcResponse::failure(
                req.id,
                RpcError {
                    code: -32601,
                    message: format!("the method {} does not exist/is not available", req.method),
                    data: None,
                },
            ),
        })
    }

    fn rpc_method(&self) -> Arc<dyn RequestFactory> {
        self.rpc.clone()
    }

    fn url(&self) -> &str {
        "mock://scripted"
    }
}

/// Always fails at the transport level.
struct DeadProvider;

#[async_trait]
impl Provider for DeadProvider {
    async fn send(&self, _req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        Err(TransportError::Timeout { ms: 30_000 })
    }

    fn rpc_method(&self) -> Arc<dyn RequestFactory> {
        Arc::new(JsonRpc2::new())
    }

    fn url(&self) -> &str {
        "mock://dead"
    }
}

async fn fetch(manager: &RequestManager, method: &str, params: Vec<Value>) -> Result<Value, Web3Error> {
    let req = manager.new_request(method).with_params(params);
    Ok(manager.send(req).await?.into_result()?)
}

#[tokio::test]
async fn transaction_round_trip() {
    let provider = ScriptedProvider::new([(
        "eth_getTransactionByHash",
        json!({
            "hash": "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b",
            "from": "0xa7d9ddbe1f17865597fbd27ec712455208b6b76d",
            "gas": "0x5208",
            "value": "0x0",
            "nonce": "0x2a"
        }),
    )]);
    let manager = RequestManager::new(provider);

    let result = fetch(
        &manager,
        "eth_getTransactionByHash",
        vec![json!("0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b")],
    )
    .await
    .unwrap();
    let tx = decode_transaction(&result, DecodeMode::Strict).unwrap();

    assert_eq!(tx.gas, Quantity::from(21_000u32));
    assert_eq!(tx.value, Quantity::from(0u32));
    assert_eq!(tx.nonce, Quantity::from(42u32));
    assert_eq!(
        tx.from.to_hex(),
        "0xa7d9ddbe1f17865597fbd27ec712455208b6b76d"
    );
}

#[tokio::test]
async fn rpc_errors_surface_as_rpc_variant() {
    let manager = RequestManager::new(ScriptedProvider::new([]));
    let err = fetch(&manager, "eth_mining", vec![]).await.unwrap_err();
    match err {
        Web3Error::Rpc(e) => assert_eq!(e.code, -32601),
        other => panic!("expected RPC error, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_errors_surface_verbatim() {
    let manager = RequestManager::new(Arc::new(DeadProvider));
    let err = fetch(&manager, "eth_blockNumber", vec![]).await.unwrap_err();
    assert!(matches!(
        err,
        Web3Error::Transport(TransportError::Timeout { ms: 30_000 })
    ));
}

#[tokio::test]
async fn decode_errors_convert_into_web3_error() {
    let provider = ScriptedProvider::new([(
        "eth_getTransactionReceipt",
        json!({ "status": "0x1", "gasUsed": "lots" }),
    )]);
    let manager = RequestManager::new(provider);

    let result = fetch(&manager, "eth_getTransactionReceipt", vec![]).await.unwrap();
    let err: Web3Error = decode_receipt(&result, DecodeMode::Strict).unwrap_err().into();
    assert!(matches!(err, Web3Error::Decode(ref e) if e.field() == Some("gasUsed")));

    let receipt = decode_receipt(&result, DecodeMode::Lenient).unwrap();
    assert_eq!(receipt.status, Quantity::from(1u32));
    assert_eq!(receipt.gas_used, Quantity::from(0u32));
}

#[tokio::test]
async fn separate_managers_keep_separate_ids() {
    let a = RequestManager::new(ScriptedProvider::new([]));
    let b = RequestManager::new(ScriptedProvider::new([]));
    a.new_request("eth_blockNumber");
    a.new_request("eth_blockNumber");
    assert_eq!(b.new_request("eth_blockNumber").id.as_number(), Some(1));
    assert_eq!(a.new_request("eth_blockNumber").id.as_number(), Some(3));
}

#[tokio::test]
async fn concurrent_sends_get_distinct_ids() {
    let manager = RequestManager::new(ScriptedProvider::new([("eth_chainId", json!("0x1"))]));
    let mut handles = Vec::new();
    for _ in 0..8 {
        let m = manager.clone();
        handles.push(tokio::spawn(async move {
            let resp = m.send(m.new_request("eth_chainId")).await.unwrap();
            resp.id.as_number().unwrap()
        }));
    }
    let mut ids = Vec::new();
    for h in handles {
        ids.push(h.await.unwrap());
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=8).collect::<Vec<_>>());
}
