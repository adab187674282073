//! chainweb3-core — request plumbing for Ethereum JSON-RPC clients.
//!
//! # Overview
//!
//! - [`JsonRpcRequest`] / [`JsonRpcResponse`] / [`RpcError`] — wire types
//! - [`Provider`] — the async trait every transport implements
//! - [`RequestFactory`] / [`JsonRpc2`] — per-provider request construction
//! - [`RequestManager`] — binds one provider to its factory
//! - [`TransportError`] / [`Web3Error`] — structured errors
//!
//! Decoding of results into domain types lives in [`chainweb3_types`],
//! re-exported here as [`types`].

pub mod error;
pub mod manager;
pub mod provider;
pub mod request;

pub use chainweb3_types as types;

pub use error::{TransportError, Web3Error};
pub use manager::RequestManager;
pub use provider::{JsonRpc2, Provider, RequestFactory};
pub use request::{JsonRpcRequest, JsonRpcResponse, RpcError, RpcId, RpcParam};
