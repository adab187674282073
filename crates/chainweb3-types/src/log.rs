//! Event log entries emitted by contracts.

use serde::Serialize;

use crate::primitives::{Address, Data, Hash};
use crate::quantity::{serialize_quantity, Quantity};

/// A decoded log entry.
///
/// `removed` is `true` when the block containing the log was later dropped
/// from the canonical chain by a reorganization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: Address,
    pub block_hash: Hash,
    #[serde(serialize_with = "serialize_quantity")]
    pub block_number: Quantity,
    pub data: Data,
    #[serde(serialize_with = "serialize_quantity")]
    pub log_index: Quantity,
    pub removed: bool,
    pub topics: Vec<Data>,
    pub transaction_hash: Hash,
    #[serde(serialize_with = "serialize_quantity")]
    pub transaction_index: Quantity,
}
