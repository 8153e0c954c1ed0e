//! Per-network client cache: lazily initialized, single winner on
//! concurrent first use, read-only thereafter (§5 Shared resources).

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use gateway_primitives::{GatewayError, GatewayResult, NetworkDescriptor};
use tokio::sync::OnceCell;

use crate::client::AlloyEvmClient;
use crate::facade::EvmRpc;
use crate::tls::TlsOptions;

/// Lazily builds and reuses one [`AlloyEvmClient`] per chain id. A single
/// `RwLock` acquisition gets-or-inserts the per-chain `OnceCell`; the
/// actual connection is awaited without holding the lock, so concurrent
/// first use of two different chains never blocks on each other, and
/// concurrent first use of the *same* chain produces exactly one client.
pub struct RpcClientCache {
    tls: TlsOptions,
    slots: RwLock<HashMap<u64, Arc<OnceCell<Arc<dyn EvmRpc>>>>>,
    overrides: RwLock<HashMap<u64, String>>,
    auth_overrides: RwLock<HashMap<u64, String>>,
}

impl RpcClientCache {
    pub fn new(tls: TlsOptions) -> Self {
        Self {
            tls,
            slots: RwLock::new(HashMap::new()),
            overrides: RwLock::new(HashMap::new()),
            auth_overrides: RwLock::new(HashMap::new()),
        }
    }

    /// Override the RPC URL used for a chain id (`<SIBLING>_NODE_URL`,
    /// §6.5), taking precedence over the registry's `defaultRpcUrl`. Must
    /// be called before the first `get_or_connect` for that chain id.
    pub fn set_url_override(&self, chain_id: u64, url: impl Into<String>) {
        self.overrides.write().expect("overrides lock poisoned").insert(chain_id, url.into());
    }

    /// Set the bearer token used to reach a guarded RPC endpoint
    /// (`<SIBLING>_JWT_TOKEN`, §6.5). Must be called before the first
    /// `get_or_connect` for that chain id.
    pub fn set_auth_override(&self, chain_id: u64, token: impl Into<String>) {
        self.auth_overrides.write().expect("auth overrides lock poisoned").insert(chain_id, token.into());
    }

    fn slot_for(&self, chain_id: u64) -> Arc<OnceCell<Arc<dyn EvmRpc>>> {
        if let Some(existing) = self.slots.read().expect("slots lock poisoned").get(&chain_id) {
            return Arc::clone(existing);
        }
        let mut slots = self.slots.write().expect("slots lock poisoned");
        Arc::clone(slots.entry(chain_id).or_insert_with(|| Arc::new(OnceCell::new())))
    }

    /// Get or lazily connect the client for `descriptor`.
    pub async fn get_or_connect(&self, descriptor: &NetworkDescriptor) -> GatewayResult<Arc<dyn EvmRpc>> {
        let slot = self.slot_for(descriptor.chain_id);
        slot.get_or_try_init(|| async {
            let url = self
                .overrides
                .read()
                .expect("overrides lock poisoned")
                .get(&descriptor.chain_id)
                .cloned()
                .unwrap_or_else(|| descriptor.default_rpc_url.clone());
            let token = self.auth_overrides.read().expect("auth overrides lock poisoned").get(&descriptor.chain_id).cloned();
            tracing::info!(network = %descriptor.short_name, %url, authenticated = token.is_some(), "connecting RPC client");
            let client = AlloyEvmClient::connect(descriptor.short_name.clone(), &url, &self.tls, token.as_deref())?;
            GatewayResult::<Arc<dyn EvmRpc>>::Ok(Arc::new(client))
        })
        .await
        .map(Arc::clone)
        .map_err(|e| GatewayError::upstream(format!("connecting to {}: {e}", descriptor.short_name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_registry::ChainRegistry;

    #[tokio::test]
    async fn connecting_to_an_invalid_url_is_an_upstream_error() {
        let cache = RpcClientCache::new(TlsOptions::none());
        let registry = ChainRegistry::new();
        let mut descriptor = registry.resolve("iota").unwrap().clone();
        descriptor.default_rpc_url = "not a url".into();
        let err = cache.get_or_connect(&descriptor).await.unwrap_err();
        assert!(matches!(err, GatewayError::Upstream(_)));
    }

    #[tokio::test]
    async fn url_override_takes_precedence() {
        let cache = RpcClientCache::new(TlsOptions::none());
        cache.set_url_override(8822, "not a url either");
        let registry = ChainRegistry::new();
        let descriptor = registry.resolve("iota").unwrap();
        let err = cache.get_or_connect(descriptor).await.unwrap_err();
        assert!(err.to_string().contains("iota"));
    }
}
