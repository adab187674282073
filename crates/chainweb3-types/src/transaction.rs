//! Mined transactions and outbound transaction requests.

use serde::Serialize;

use crate::primitives::{Address, Data, Hash};
use crate::quantity::{serialize_opt_quantity, serialize_quantity, Quantity};

/// A decoded transaction as returned by `eth_getTransactionBy*`.
///
/// `to` is the zero address for contract creations. `r`, `s` and `v` are
/// kept as raw bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub block_hash: Hash,
    #[serde(serialize_with = "serialize_quantity")]
    pub block_number: Quantity,
    pub from: Address,
    #[serde(serialize_with = "serialize_quantity")]
    pub gas: Quantity,
    #[serde(serialize_with = "serialize_quantity")]
    pub gas_price: Quantity,
    pub hash: Hash,
    pub input: Data,
    #[serde(serialize_with = "serialize_quantity")]
    pub nonce: Quantity,
    pub r: Data,
    pub s: Data,
    pub to: Address,
    #[serde(serialize_with = "serialize_quantity")]
    pub transaction_index: Quantity,
    pub v: Data,
    #[serde(serialize_with = "serialize_quantity")]
    pub value: Quantity,
}

/// Parameters for `eth_sendTransaction`, `eth_call` and `eth_estimateGas`.
///
/// Built by the caller. Unset optional fields are omitted from the JSON so
/// the node applies its own defaults.
///
/// ```rust
/// use chainweb3_types::{Address, Data, Quantity, TransactionRequest};
///
/// let from: Address = "0xb60e8dd61c5d32be8058bb8eb970870f07233155".parse().unwrap();
/// let req = TransactionRequest::new(from)
///     .gas(Quantity::from(21_000u32))
///     .data(Data::new(vec![0xd4, 0x6e]));
///
/// assert!(req.to_json_string().contains("\"gas\":\"0x5208\""));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_quantity"
    )]
    pub gas: Option<Quantity>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_quantity"
    )]
    pub gas_price: Option<Quantity>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_quantity"
    )]
    pub value: Option<Quantity>,
    #[serde(skip_serializing_if = "Data::is_empty")]
    pub data: Data,
}

impl TransactionRequest {
    pub fn new(from: Address) -> Self {
        Self {
            from,
            ..Default::default()
        }
    }

    pub fn to(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }

    pub fn gas(mut self, gas: Quantity) -> Self {
        self.gas = Some(gas);
        self
    }

    pub fn gas_price(mut self, gas_price: Quantity) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    pub fn value(mut self, value: Quantity) -> Self {
        self.value = Some(value);
        self
    }

    pub fn data(mut self, data: Data) -> Self {
        self.data = data;
        self
    }

    /// The request as a JSON-RPC parameter.
    pub fn to_param(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// The request as compact JSON text, for logging and debugging.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
