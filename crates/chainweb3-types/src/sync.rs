//! Result of `eth_syncing`.

use serde::Serialize;

use crate::quantity::{serialize_quantity, Quantity};

/// Node synchronisation progress. The block numbers are only meaningful
/// while `syncing` is `true`; otherwise they are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub syncing: bool,
    #[serde(serialize_with = "serialize_quantity")]
    pub starting_block: Quantity,
    #[serde(serialize_with = "serialize_quantity")]
    pub current_block: Quantity,
    #[serde(serialize_with = "serialize_quantity")]
    pub highest_block: Quantity,
}
