//! In-memory [`EvmRpc`] fixture used by every other crate's tests so that
//! no test in the workspace touches the network.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use alloy_primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use gateway_primitives::{BlockSample, GatewayError, GatewayResult, NetworkDescriptor, Receipt, TxRecord};
use gateway_registry::ChainRegistry;

use crate::facade::{CallRequest, EvmRpc};
use crate::resolver::RpcResolver;

/// A canned chain: a fixed set of blocks (indexed by number), transactions
/// (indexed by hash), receipts, balances, and bytecode. Every method
/// returns exactly what was seeded, or a `NotFound`/`Upstream` error.
#[derive(Default)]
pub struct MockEvmRpc {
    blocks: RwLock<HashMap<u64, BlockSample>>,
    latest: RwLock<Option<u64>>,
    txs: RwLock<HashMap<B256, TxRecord>>,
    receipts: RwLock<HashMap<B256, Receipt>>,
    balances: RwLock<HashMap<Address, U256>>,
    bytecode: RwLock<HashMap<Address, Bytes>>,
    /// Canned `eth_call` responses keyed by `(contract, selector)`. A
    /// request for an unseeded `(contract, selector)` pair returns empty
    /// data, matching a real node's response to a call against a
    /// contract with no matching function (decoded as all-defaults by
    /// callers such as `read_fungible_metadata`).
    calls: RwLock<HashMap<(Address, [u8; 4]), Bytes>>,
    gas_price: RwLock<u128>,
    /// When set, every call fails with this message instead of serving
    /// fixtures — simulates an unreachable node.
    fail_with: RwLock<Option<String>>,
}

impl MockEvmRpc {
    pub fn new() -> Self {
        Self { gas_price: RwLock::new(20_000_000_000), ..Default::default() }
    }

    pub fn with_block(self, block: BlockSample) -> Self {
        let number = block.number;
        self.blocks.write().unwrap().insert(number, block);
        let mut latest = self.latest.write().unwrap();
        if latest.map(|n| number > n).unwrap_or(true) {
            *latest = Some(number);
        }
        drop(latest);
        self
    }

    pub fn with_tx(self, tx: TxRecord) -> Self {
        self.txs.write().unwrap().insert(tx.hash, tx);
        self
    }

    pub fn with_receipt(self, hash: B256, receipt: Receipt) -> Self {
        self.receipts.write().unwrap().insert(hash, receipt);
        self
    }

    pub fn with_balance(self, address: Address, balance: U256) -> Self {
        self.balances.write().unwrap().insert(address, balance);
        self
    }

    pub fn with_bytecode(self, address: Address, code: Bytes) -> Self {
        self.bytecode.write().unwrap().insert(address, code);
        self
    }

    /// Seed the response for `eth_call(contract, selector ++ args)`.
    pub fn with_call(self, contract: Address, selector: [u8; 4], response: Bytes) -> Self {
        self.calls.write().unwrap().insert((contract, selector), response);
        self
    }

    pub fn with_gas_price(self, price: u128) -> Self {
        *self.gas_price.write().unwrap() = price;
        self
    }

    /// Make every subsequent call fail, simulating an unreachable node.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        *self.fail_with.write().unwrap() = Some(message.into());
        self
    }

    fn check_failure(&self) -> GatewayResult<()> {
        if let Some(msg) = self.fail_with.read().unwrap().clone() {
            return Err(GatewayError::upstream(msg));
        }
        Ok(())
    }
}

#[async_trait]
impl EvmRpc for MockEvmRpc {
    async fn block_number(&self) -> GatewayResult<u64> {
        self.check_failure()?;
        self.latest
            .read()
            .unwrap()
            .ok_or_else(|| GatewayError::upstream("no blocks seeded"))
    }

    async fn latest_block(&self, full_txs: bool) -> GatewayResult<BlockSample> {
        self.check_failure()?;
        let number = self.block_number().await?;
        self.block_by_number(number, full_txs).await?.ok_or_else(|| GatewayError::upstream("latest block missing"))
    }

    async fn block_by_number(&self, number: u64, full_txs: bool) -> GatewayResult<Option<BlockSample>> {
        self.check_failure()?;
        let mut block = self.blocks.read().unwrap().get(&number).cloned();
        if !full_txs {
            if let Some(b) = block.as_mut() {
                b.txs = None;
            }
        }
        Ok(block)
    }

    async fn get_tx(&self, hash: B256) -> GatewayResult<Option<TxRecord>> {
        self.check_failure()?;
        Ok(self.txs.read().unwrap().get(&hash).cloned())
    }

    async fn get_receipt(&self, hash: B256) -> GatewayResult<Option<Receipt>> {
        self.check_failure()?;
        Ok(self.receipts.read().unwrap().get(&hash).cloned())
    }

    async fn get_balance(&self, address: Address) -> GatewayResult<U256> {
        self.check_failure()?;
        Ok(self.balances.read().unwrap().get(&address).copied().unwrap_or_default())
    }

    async fn get_bytecode(&self, address: Address) -> GatewayResult<Bytes> {
        self.check_failure()?;
        Ok(self.bytecode.read().unwrap().get(&address).cloned().unwrap_or_default())
    }

    async fn get_gas_price(&self) -> GatewayResult<u128> {
        self.check_failure()?;
        Ok(*self.gas_price.read().unwrap())
    }

    async fn estimate_gas(&self, _call: CallRequest) -> GatewayResult<u64> {
        self.check_failure()?;
        Ok(21_000)
    }

    async fn call(&self, to: Address, data: Bytes) -> GatewayResult<Bytes> {
        self.check_failure()?;
        if data.len() < 4 {
            return Ok(Bytes::new());
        }
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&data[..4]);
        Ok(self.calls.read().unwrap().get(&(to, selector)).cloned().unwrap_or_default())
    }
}

/// A test-only [`RpcResolver`] backed by a fixed `network name -> client`
/// table and the real `ChainRegistry` (for descriptors), so unit tests
/// across the workspace never open a socket.
#[derive(Default)]
pub struct StaticRpcResolver {
    registry: ChainRegistry,
    clients: HashMap<String, Arc<dyn EvmRpc>>,
}

impl StaticRpcResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(mut self, network: impl Into<String>, client: Arc<dyn EvmRpc>) -> Self {
        self.clients.insert(network.into(), client);
        self
    }
}

#[async_trait]
impl RpcResolver for StaticRpcResolver {
    async fn resolve(&self, network: &str) -> GatewayResult<(&'static NetworkDescriptor, Arc<dyn EvmRpc>)> {
        let descriptor = self.registry.resolve(network)?;
        let client = self
            .clients
            .get(&descriptor.short_name)
            .cloned()
            .ok_or_else(|| GatewayError::upstream(format!("no mock client registered for {network}")))?;
        Ok((descriptor, client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_primitives::BlockSample;

    #[tokio::test]
    async fn serves_seeded_block_as_latest() {
        let rpc = MockEvmRpc::new().with_block(BlockSample {
            number: 100,
            timestamp: 1_700_000_000,
            gas_used: 1_000,
            gas_limit: 30_000_000,
            base_fee_per_gas: Some(1_000_000_000),
            tx_count: 0,
            txs: None,
        });
        assert_eq!(rpc.block_number().await.unwrap(), 100);
        assert_eq!(rpc.latest_block(false).await.unwrap().number, 100);
    }

    #[tokio::test]
    async fn failure_mode_fails_every_call() {
        let rpc = MockEvmRpc::new().with_failure("node unreachable");
        assert!(rpc.block_number().await.is_err());
        assert!(rpc.get_gas_price().await.is_err());
    }
}
