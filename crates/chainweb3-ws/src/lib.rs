//! chainweb3-ws — WebSocket JSON-RPC provider.
//!
//! # Features
//! - Request multiplexing over a single connection, matched by request id
//! - Auto-reconnect on disconnect (exponential backoff)
//! - In-flight requests fail with a transport error when the socket drops

pub mod client;

pub use client::{WsProvider, WsProviderConfig};
