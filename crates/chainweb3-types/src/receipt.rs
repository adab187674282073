//! Transaction receipts.

use serde::Serialize;

use crate::log::Log;
use crate::primitives::{Address, Data, Hash};
use crate::quantity::{serialize_quantity, Quantity};

/// A decoded transaction receipt.
///
/// `contract_address` is the zero address unless the transaction deployed
/// a contract. `status` is `1` for success and `0` for failure on
/// post-Byzantium chains; older receipts carry no status and decode as `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub block_hash: Hash,
    #[serde(serialize_with = "serialize_quantity")]
    pub block_number: Quantity,
    pub contract_address: Address,
    #[serde(serialize_with = "serialize_quantity")]
    pub cumulative_gas_used: Quantity,
    pub from: Address,
    #[serde(serialize_with = "serialize_quantity")]
    pub gas_used: Quantity,
    pub logs: Vec<Log>,
    pub logs_bloom: Data,
    #[serde(serialize_with = "serialize_quantity")]
    pub status: Quantity,
    pub to: Address,
    pub transaction_hash: Hash,
    #[serde(serialize_with = "serialize_quantity")]
    pub transaction_index: Quantity,
}
