//! RPC Client Facade.
//!
//! A small async trait abstracting a chain's read surface, in place of a
//! concrete `EventEmitter`-style wrapper tied to one client library. Every
//! method is read-only; the one write operation (raw transaction
//! submission) lives in the signer port instead.

use alloy_primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use gateway_primitives::{BlockSample, GatewayResult, Receipt, TxRecord};

/// Parameters for a read-only `eth_call` / `eth_estimateGas`.
#[derive(Debug, Clone, Default)]
pub struct CallRequest {
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub data: Bytes,
    pub value: Option<U256>,
}

/// A chain's read-only JSON-RPC surface.
///
/// Transient RPC errors (network, 5xx, timeout) are surfaced as
/// [`gateway_primitives::GatewayError::Upstream`] untransformed; the
/// facade performs no automatic retry — that is left to the transport.
#[async_trait]
pub trait EvmRpc: Send + Sync {
    /// `eth_blockNumber`.
    async fn block_number(&self) -> GatewayResult<u64>;

    /// The newest block, optionally with full transactions inlined.
    async fn latest_block(&self, full_txs: bool) -> GatewayResult<BlockSample>;

    /// A specific block by number, if it exists.
    async fn block_by_number(&self, number: u64, full_txs: bool) -> GatewayResult<Option<BlockSample>>;

    /// `eth_getTransactionByHash`.
    async fn get_tx(&self, hash: B256) -> GatewayResult<Option<TxRecord>>;

    /// `eth_getTransactionReceipt`.
    async fn get_receipt(&self, hash: B256) -> GatewayResult<Option<Receipt>>;

    /// `eth_getBalance` at the latest block.
    async fn get_balance(&self, address: Address) -> GatewayResult<U256>;

    /// `eth_getCode` at the latest block.
    async fn get_bytecode(&self, address: Address) -> GatewayResult<Bytes>;

    /// `eth_gasPrice`.
    async fn get_gas_price(&self) -> GatewayResult<u128>;

    /// `eth_estimateGas`.
    async fn estimate_gas(&self, call: CallRequest) -> GatewayResult<u64>;

    /// `eth_call` against the latest block.
    async fn call(&self, to: Address, data: Bytes) -> GatewayResult<Bytes>;
}
