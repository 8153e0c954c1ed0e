//! RPC Client Facade (C2).
//!
//! Exposes the read-only [`EvmRpc`] trait that every other component
//! depends on, a concrete `alloy-provider`-backed implementation, a
//! per-chain client cache with single-winner lazy init, and an in-memory
//! mock used by the rest of the workspace's tests (no network in tests).

pub mod cache;
pub mod client;
pub mod facade;
pub mod mock;
pub mod resolver;
pub mod tls;

pub use cache::RpcClientCache;
pub use client::AlloyEvmClient;
pub use facade::{CallRequest, EvmRpc};
pub use resolver::{RegistryRpcResolver, RpcResolver};
pub use tls::TlsOptions;
