//! Shared, process-lifetime context every handler closure captures by
//! `Arc` clone: the RPC resolver, the two static registries, and the two
//! pluggable providers (DeFi inventories, signer) that the core delegates
//! to rather than synthesizes.

use std::sync::Arc;

use gateway_registry::{ChainRegistry, DefiDataProvider, PlaceholderDefiProvider, PoolRegistry};
use gateway_rpc::RpcResolver;

use crate::signer::{SignerPort, UnconfiguredSigner};

pub struct GatewayContext {
    pub resolver: Arc<dyn RpcResolver>,
    pub registry: ChainRegistry,
    pub pools: PoolRegistry,
    pub defi: Arc<dyn DefiDataProvider>,
    pub signer: Arc<dyn SignerPort>,
    default_network: String,
}

impl GatewayContext {
    pub fn new(resolver: Arc<dyn RpcResolver>) -> Self {
        let registry = ChainRegistry::new();
        let default_network = registry.default_network().short_name.clone();
        Self {
            resolver,
            registry,
            pools: PoolRegistry::new(),
            defi: Arc::new(PlaceholderDefiProvider),
            signer: Arc::new(UnconfiguredSigner::unconfigured()),
            default_network,
        }
    }

    pub fn with_defi(mut self, defi: Arc<dyn DefiDataProvider>) -> Self {
        self.defi = defi;
        self
    }

    pub fn with_signer(mut self, signer: Arc<dyn SignerPort>) -> Self {
        self.signer = signer;
        self
    }

    /// Override the default network (`DEFAULT_CHAIN_ID`, §6.5), which
    /// otherwise falls back to the registry's primary sibling mainnet.
    pub fn with_default_network(mut self, network: String) -> Self {
        self.default_network = network;
        self
    }

    /// The network name a tool call should use: the caller's explicit
    /// `network` argument, or the configured default (`DEFAULT_CHAIN_ID`
    /// if set, else the registry's primary sibling, §6.5).
    pub fn network_or_default(&self, requested: Option<&str>) -> String {
        requested.map(str::to_string).unwrap_or_else(|| self.default_network.clone())
    }
}
