//! Wire records and their conversion into the domain model.
//!
//! The `Wire*` structs mirror the JSON objects a node returns. Every field
//! is optional and kept as a raw token, so deserialization only fails when
//! the payload is not an object of the expected shape. Conversion then maps
//! each token to its typed domain field:
//!
//! - absent or `null` fields become the zero value in every [`DecodeMode`];
//! - malformed fields become the zero value in [`DecodeMode::Lenient`] and
//!   a [`DecodeError::Field`] naming the wire field in
//!   [`DecodeMode::Strict`].
//!
//! Fields are decoded independently, so a bad `gasPrice` never affects
//! `nonce`. No semantic validation is done.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::block::Block;
use crate::error::{DecodeError, FieldError, HexError};
use crate::log::Log;
use crate::primitives::{strip_hex_prefix, Address, Data, Hash};
use crate::quantity::{parse_quantity, DecodeMode, Quantity};
use crate::receipt::TransactionReceipt;
use crate::sync::SyncStatus;
use crate::transaction::Transaction;

// ─── WireToken ────────────────────────────────────────────────────────────────

/// A scalar wire value kept verbatim: a hex string, a decimal string, or
/// the literal text of a bare JSON number.
///
/// Booleans, arrays and objects are captured as their JSON text so that
/// they fail at conversion time for that one field rather than failing the
/// whole record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireToken(pub String);

impl WireToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WireToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for WireToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // serde_json's `arbitrary_precision` keeps the literal text of bare
        // numbers, so integers wider than 64 bits arrive unrounded.
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => WireToken(s),
            other => WireToken(other.to_string()),
        })
    }
}

// ─── Wire records ─────────────────────────────────────────────────────────────

/// A block object. `transactions` holds hashes, or full transaction objects
/// when the block was requested hydrated; only the hashes are kept.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WireBlock {
    pub difficulty: Option<WireToken>,
    pub extra_data: Option<WireToken>,
    pub gas_limit: Option<WireToken>,
    pub gas_used: Option<WireToken>,
    pub hash: Option<WireToken>,
    pub logs_bloom: Option<WireToken>,
    pub miner: Option<WireToken>,
    pub mix_hash: Option<WireToken>,
    pub nonce: Option<WireToken>,
    pub number: Option<WireToken>,
    pub parent_hash: Option<WireToken>,
    pub receipts_root: Option<WireToken>,
    pub sha3_uncles: Option<WireToken>,
    pub size: Option<WireToken>,
    pub state_root: Option<WireToken>,
    pub timestamp: Option<WireToken>,
    pub total_difficulty: Option<WireToken>,
    pub transactions: Option<Vec<Value>>,
    pub transactions_root: Option<WireToken>,
    pub uncles: Option<Vec<WireToken>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WireTransaction {
    pub block_hash: Option<WireToken>,
    pub block_number: Option<WireToken>,
    pub from: Option<WireToken>,
    pub gas: Option<WireToken>,
    #[serde(alias = "gasprice")]
    pub gas_price: Option<WireToken>,
    pub hash: Option<WireToken>,
    pub input: Option<WireToken>,
    pub nonce: Option<WireToken>,
    pub r: Option<WireToken>,
    pub s: Option<WireToken>,
    pub to: Option<WireToken>,
    pub transaction_index: Option<WireToken>,
    pub v: Option<WireToken>,
    pub value: Option<WireToken>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WireTransactionReceipt {
    pub block_hash: Option<WireToken>,
    pub block_number: Option<WireToken>,
    pub contract_address: Option<WireToken>,
    pub cumulative_gas_used: Option<WireToken>,
    pub from: Option<WireToken>,
    pub gas_used: Option<WireToken>,
    pub logs: Option<Vec<WireLog>>,
    pub logs_bloom: Option<WireToken>,
    pub status: Option<WireToken>,
    pub to: Option<WireToken>,
    pub transaction_hash: Option<WireToken>,
    pub transaction_index: Option<WireToken>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WireLog {
    pub address: Option<WireToken>,
    pub block_hash: Option<WireToken>,
    pub block_number: Option<WireToken>,
    #[serde(alias = "TxData")]
    pub data: Option<WireToken>,
    pub log_index: Option<WireToken>,
    pub removed: Option<bool>,
    pub topics: Option<Vec<WireToken>>,
    pub transaction_hash: Option<WireToken>,
    pub transaction_index: Option<WireToken>,
}

/// The object form of an `eth_syncing` result.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WireSyncStatus {
    pub starting_block: Option<WireToken>,
    pub current_block: Option<WireToken>,
    pub highest_block: Option<WireToken>,
}

// ─── Field decoding ───────────────────────────────────────────────────────────

/// Applies the decode mode to one field at a time.
#[derive(Debug, Clone, Copy)]
struct FieldDecoder {
    mode: DecodeMode,
}

impl FieldDecoder {
    fn settle<T: Default>(
        &self,
        field: &'static str,
        result: Result<T, FieldError>,
    ) -> Result<T, DecodeError> {
        match (result, self.mode) {
            (Ok(v), _) => Ok(v),
            (Err(e), DecodeMode::Lenient) => {
                tracing::trace!(field, error = %e, "malformed wire field, using zero value");
                Ok(T::default())
            }
            (Err(source), DecodeMode::Strict) => Err(DecodeError::Field { field, source }),
        }
    }

    fn quantity(&self, field: &'static str, v: &Option<WireToken>) -> Result<Quantity, DecodeError> {
        let Some(tok) = v else { return Ok(Quantity::default()) };
        self.settle(field, parse_quantity(tok.as_str(), self.mode).map_err(FieldError::from))
    }

    fn hash(&self, field: &'static str, v: &Option<WireToken>) -> Result<Hash, DecodeError> {
        let Some(tok) = v else { return Ok(Hash::ZERO) };
        self.settle(field, Hash::from_hex(tok.as_str()).map_err(FieldError::from))
    }

    fn address(&self, field: &'static str, v: &Option<WireToken>) -> Result<Address, DecodeError> {
        let Some(tok) = v else { return Ok(Address::ZERO) };
        self.settle(field, Address::from_hex(tok.as_str()).map_err(FieldError::from))
    }

    fn data(&self, field: &'static str, v: &Option<WireToken>) -> Result<Data, DecodeError> {
        let Some(tok) = v else { return Ok(Data::empty()) };
        self.settle(field, Data::from_hex(tok.as_str()).map_err(FieldError::from))
    }

    /// `r`, `s` and `v` are sent as minimal quantities (`"0x1"`), so an odd
    /// nibble count gets one leading zero.
    fn signature(&self, field: &'static str, v: &Option<WireToken>) -> Result<Data, DecodeError> {
        let Some(tok) = v else { return Ok(Data::empty()) };
        let digits = strip_hex_prefix(tok.as_str());
        let result = if digits.len() % 2 == 1 {
            Data::from_hex(&format!("0{digits}"))
        } else {
            Data::from_hex(digits)
        };
        self.settle(field, result.map_err(FieldError::from))
    }

    fn hash_list(&self, field: &'static str, v: &Option<Vec<WireToken>>) -> Result<Vec<Hash>, DecodeError> {
        v.iter()
            .flatten()
            .map(|tok| self.settle(field, Hash::from_hex(tok.as_str()).map_err(FieldError::from)))
            .collect()
    }

    fn data_list(&self, field: &'static str, v: &Option<Vec<WireToken>>) -> Result<Vec<Data>, DecodeError> {
        v.iter()
            .flatten()
            .map(|tok| self.settle(field, Data::from_hex(tok.as_str()).map_err(FieldError::from)))
            .collect()
    }

    /// Block transaction lists hold hash strings, or objects carrying a
    /// `hash` member when hydrated.
    fn transaction_hashes(&self, v: &Option<Vec<Value>>) -> Result<Vec<Hash>, DecodeError> {
        const FIELD: &str = "transactions";
        v.iter()
            .flatten()
            .map(|item| {
                let text = match item {
                    Value::String(s) => Some(s.as_str()),
                    Value::Object(obj) => obj.get("hash").and_then(Value::as_str),
                    _ => None,
                };
                let result = match text {
                    Some(text) => Hash::from_hex(text),
                    None => Err(HexError::Malformed {
                        input: item.to_string(),
                        reason: "expected a hash or a transaction object".into(),
                    }),
                };
                self.settle(FIELD, result.map_err(FieldError::from))
            })
            .collect()
    }
}

// ─── Conversions ──────────────────────────────────────────────────────────────

impl WireBlock {
    pub fn to_block(&self, mode: DecodeMode) -> Result<Block, DecodeError> {
        let d = FieldDecoder { mode };
        Ok(Block {
            difficulty: d.quantity("difficulty", &self.difficulty)?,
            extra_data: d.data("extraData", &self.extra_data)?,
            gas_limit: d.quantity("gasLimit", &self.gas_limit)?,
            gas_used: d.quantity("gasUsed", &self.gas_used)?,
            hash: d.hash("hash", &self.hash)?,
            logs_bloom: d.data("logsBloom", &self.logs_bloom)?,
            miner: d.address("miner", &self.miner)?,
            mix_hash: d.hash("mixHash", &self.mix_hash)?,
            nonce: d.data("nonce", &self.nonce)?,
            number: d.quantity("number", &self.number)?,
            parent_hash: d.hash("parentHash", &self.parent_hash)?,
            receipts_root: d.hash("receiptsRoot", &self.receipts_root)?,
            sha3_uncles: d.hash("sha3Uncles", &self.sha3_uncles)?,
            size: d.quantity("size", &self.size)?,
            state_root: d.hash("stateRoot", &self.state_root)?,
            timestamp: d.quantity("timestamp", &self.timestamp)?,
            total_difficulty: d.quantity("totalDifficulty", &self.total_difficulty)?,
            transactions: d.transaction_hashes(&self.transactions)?,
            transactions_root: d.hash("transactionsRoot", &self.transactions_root)?,
            uncles: d.hash_list("uncles", &self.uncles)?,
        })
    }
}

impl WireTransaction {
    pub fn to_transaction(&self, mode: DecodeMode) -> Result<Transaction, DecodeError> {
        let d = FieldDecoder { mode };
        Ok(Transaction {
            block_hash: d.hash("blockHash", &self.block_hash)?,
            block_number: d.quantity("blockNumber", &self.block_number)?,
            from: d.address("from", &self.from)?,
            gas: d.quantity("gas", &self.gas)?,
            gas_price: d.quantity("gasPrice", &self.gas_price)?,
            hash: d.hash("hash", &self.hash)?,
            input: d.data("input", &self.input)?,
            nonce: d.quantity("nonce", &self.nonce)?,
            r: d.signature("r", &self.r)?,
            s: d.signature("s", &self.s)?,
            to: d.address("to", &self.to)?,
            transaction_index: d.quantity("transactionIndex", &self.transaction_index)?,
            v: d.signature("v", &self.v)?,
            value: d.quantity("value", &self.value)?,
        })
    }
}

impl WireTransactionReceipt {
    pub fn to_receipt(&self, mode: DecodeMode) -> Result<TransactionReceipt, DecodeError> {
        let d = FieldDecoder { mode };
        let logs = self
            .logs
            .iter()
            .flatten()
            .map(|l| l.to_log(mode))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TransactionReceipt {
            block_hash: d.hash("blockHash", &self.block_hash)?,
            block_number: d.quantity("blockNumber", &self.block_number)?,
            contract_address: d.address("contractAddress", &self.contract_address)?,
            cumulative_gas_used: d.quantity("cumulativeGasUsed", &self.cumulative_gas_used)?,
            from: d.address("from", &self.from)?,
            gas_used: d.quantity("gasUsed", &self.gas_used)?,
            logs,
            logs_bloom: d.data("logsBloom", &self.logs_bloom)?,
            status: d.quantity("status", &self.status)?,
            to: d.address("to", &self.to)?,
            transaction_hash: d.hash("transactionHash", &self.transaction_hash)?,
            transaction_index: d.quantity("transactionIndex", &self.transaction_index)?,
        })
    }
}

impl WireLog {
    pub fn to_log(&self, mode: DecodeMode) -> Result<Log, DecodeError> {
        let d = FieldDecoder { mode };
        Ok(Log {
            address: d.address("address", &self.address)?,
            block_hash: d.hash("blockHash", &self.block_hash)?,
            block_number: d.quantity("blockNumber", &self.block_number)?,
            data: d.data("data", &self.data)?,
            log_index: d.quantity("logIndex", &self.log_index)?,
            removed: self.removed.unwrap_or(false),
            topics: d.data_list("topics", &self.topics)?,
            transaction_hash: d.hash("transactionHash", &self.transaction_hash)?,
            transaction_index: d.quantity("transactionIndex", &self.transaction_index)?,
        })
    }
}

impl WireSyncStatus {
    /// Convert the object form; the presence of the object means syncing.
    pub fn to_sync_status(&self, mode: DecodeMode) -> Result<SyncStatus, DecodeError> {
        let d = FieldDecoder { mode };
        Ok(SyncStatus {
            syncing: true,
            starting_block: d.quantity("startingBlock", &self.starting_block)?,
            current_block: d.quantity("currentBlock", &self.current_block)?,
            highest_block: d.quantity("highestBlock", &self.highest_block)?,
        })
    }
}

// ─── Value entry points ───────────────────────────────────────────────────────

fn wire_record<'a, T: Deserialize<'a>>(value: &'a Value) -> Result<T, DecodeError> {
    if !value.is_object() {
        return Err(DecodeError::Shape(de::Error::custom(format!(
            "expected a JSON object, got {value}"
        ))));
    }
    Ok(T::deserialize(value)?)
}

/// Decode an `eth_getBlockBy*` result object.
pub fn decode_block(value: &Value, mode: DecodeMode) -> Result<Block, DecodeError> {
    wire_record::<WireBlock>(value)?.to_block(mode)
}

/// Decode an `eth_getTransactionBy*` result object.
pub fn decode_transaction(value: &Value, mode: DecodeMode) -> Result<Transaction, DecodeError> {
    wire_record::<WireTransaction>(value)?.to_transaction(mode)
}

/// Decode an `eth_getTransactionReceipt` result object.
pub fn decode_receipt(value: &Value, mode: DecodeMode) -> Result<TransactionReceipt, DecodeError> {
    wire_record::<WireTransactionReceipt>(value)?.to_receipt(mode)
}

/// Decode a single log object (from `eth_getLogs` or a receipt).
pub fn decode_log(value: &Value, mode: DecodeMode) -> Result<Log, DecodeError> {
    wire_record::<WireLog>(value)?.to_log(mode)
}

/// Decode an `eth_getLogs` result array.
pub fn decode_logs(value: &Value, mode: DecodeMode) -> Result<Vec<Log>, DecodeError> {
    let logs = Vec::<WireLog>::deserialize(value)?;
    logs.iter().map(|l| l.to_log(mode)).collect()
}

/// Decode an `eth_syncing` result: `false` or a progress object.
pub fn decode_sync_status(value: &Value, mode: DecodeMode) -> Result<SyncStatus, DecodeError> {
    match value {
        Value::Bool(false) | Value::Null => Ok(SyncStatus::default()),
        Value::Bool(true) => Ok(SyncStatus {
            syncing: true,
            ..Default::default()
        }),
        _ => wire_record::<WireSyncStatus>(value)?.to_sync_status(mode),
    }
}
