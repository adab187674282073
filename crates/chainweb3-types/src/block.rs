//! Block header snapshot as returned by `eth_getBlockBy*`.

use serde::Serialize;

use crate::primitives::{Address, Data, Hash};
use crate::quantity::{serialize_quantity, Quantity};

/// A decoded block. Transactions are listed by hash only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(serialize_with = "serialize_quantity")]
    pub difficulty: Quantity,
    pub extra_data: Data,
    #[serde(serialize_with = "serialize_quantity")]
    pub gas_limit: Quantity,
    #[serde(serialize_with = "serialize_quantity")]
    pub gas_used: Quantity,
    pub hash: Hash,
    pub logs_bloom: Data,
    pub miner: Address,
    pub mix_hash: Hash,
    pub nonce: Data,
    #[serde(serialize_with = "serialize_quantity")]
    pub number: Quantity,
    pub parent_hash: Hash,
    pub receipts_root: Hash,
    pub sha3_uncles: Hash,
    #[serde(serialize_with = "serialize_quantity")]
    pub size: Quantity,
    pub state_root: Hash,
    #[serde(serialize_with = "serialize_quantity")]
    pub timestamp: Quantity,
    #[serde(serialize_with = "serialize_quantity")]
    pub total_difficulty: Quantity,
    pub transactions: Vec<Hash>,
    pub transactions_root: Hash,
    pub uncles: Vec<Hash>,
}
