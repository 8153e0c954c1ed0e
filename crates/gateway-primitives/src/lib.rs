//! Shared data model and error taxonomy for the multi-chain EVM AI gateway.
//!
//! This crate has no knowledge of RPC transports, registries, or tool
//! dispatch — it only defines the ephemeral records and the closed error
//! taxonomy that every other component exchanges.

pub mod error;
pub mod types;

pub use error::GatewayError;
pub use types::*;

/// Convenience alias used throughout the workspace.
pub type GatewayResult<T> = Result<T, GatewayError>;
