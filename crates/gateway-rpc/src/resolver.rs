//! Resolves a network name to an [`EvmRpc`] handle. Downstream components
//! (C4–C7) depend on this trait rather than on `ChainRegistry` +
//! `RpcClientCache` directly, so their tests can swap in an in-memory
//! table of [`crate::mock::MockEvmRpc`] instances instead of dialing a
//! real RPC endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use gateway_primitives::{GatewayResult, NetworkDescriptor};
use gateway_registry::ChainRegistry;

use crate::cache::RpcClientCache;
use crate::facade::EvmRpc;

#[async_trait]
pub trait RpcResolver: Send + Sync {
    /// Resolve `network` (name or chain id) and return its (descriptor,
    /// client) pair.
    async fn resolve(&self, network: &str) -> GatewayResult<(&'static NetworkDescriptor, Arc<dyn EvmRpc>)>;
}

/// The production resolver: `ChainRegistry` for name resolution,
/// `RpcClientCache` for lazy, single-winner client construction.
pub struct RegistryRpcResolver {
    pub registry: ChainRegistry,
    pub cache: RpcClientCache,
}

impl RegistryRpcResolver {
    pub fn new(registry: ChainRegistry, cache: RpcClientCache) -> Self {
        Self { registry, cache }
    }
}

#[async_trait]
impl RpcResolver for RegistryRpcResolver {
    async fn resolve(&self, network: &str) -> GatewayResult<(&'static NetworkDescriptor, Arc<dyn EvmRpc>)> {
        let descriptor = self.registry.resolve(network)?;
        let client = self.cache.get_or_connect(descriptor).await?;
        Ok((descriptor, client))
    }
}
