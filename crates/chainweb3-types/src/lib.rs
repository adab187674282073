//! chainweb3-types — value types and wire decoding for Ethereum JSON-RPC.
//!
//! # Overview
//!
//! - [`Hash`], [`Address`], [`Data`] — byte types with canonical `0x` hex
//! - [`Quantity`] — arbitrary-precision integers, parsed by [`parse_quantity`]
//! - [`Block`], [`Transaction`], [`TransactionReceipt`], [`Log`],
//!   [`SyncStatus`] — immutable snapshots decoded from node responses
//! - [`TransactionRequest`] — outbound transaction parameters
//! - [`wire`] — raw wire records and the conversions into the types above
//!
//! # Decoding
//!
//! ```rust
//! use chainweb3_types::{decode_transaction, DecodeMode, Quantity};
//!
//! let wire = serde_json::json!({ "gas": "0x5208", "nonce": "0x2a" });
//! let tx = decode_transaction(&wire, DecodeMode::Lenient).unwrap();
//! assert_eq!(tx.gas, Quantity::from(21_000u32));
//! assert_eq!(tx.nonce, Quantity::from(42u32));
//! ```

pub mod block;
pub mod error;
pub mod log;
pub mod primitives;
pub mod quantity;
pub mod receipt;
pub mod sync;
pub mod transaction;
pub mod wire;

pub use block::Block;
pub use error::{DecodeError, FieldError, HexError, NumericError};
pub use log::Log;
pub use primitives::{decode_hex, encode_hex, Address, Data, Hash, ADDRESS_LENGTH, HASH_LENGTH};
pub use quantity::{parse_quantity, to_quantity_hex, DecodeMode, Quantity};
pub use receipt::TransactionReceipt;
pub use sync::SyncStatus;
pub use transaction::{Transaction, TransactionRequest};
pub use wire::{
    decode_block, decode_log, decode_logs, decode_receipt, decode_sync_status,
    decode_transaction, WireBlock, WireLog, WireSyncStatus, WireToken, WireTransaction,
    WireTransactionReceipt,
};
