//! chainweb3-ipc — JSON-RPC over a node's local Unix domain socket.
//!
//! Only available on Unix targets.

#[cfg(unix)]
pub mod client;

#[cfg(unix)]
pub use client::{IpcProvider, IpcProviderConfig};
