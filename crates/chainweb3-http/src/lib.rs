//! chainweb3-http — HTTP JSON-RPC provider.
//!
//! One POST per request; the request manager above it adds nothing, so the
//! provider's own timeout is the only bound on a round trip.

pub mod client;

pub use client::{HttpProvider, HttpProviderConfig};
