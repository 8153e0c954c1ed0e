//! DeFi inventories (liquidity pools, lending markets, staking pools) are
//! explicitly out of scope for synthesis here: this gateway returns
//! placeholder data for these rather than fabricating it, and only commits
//! to the interface they must satisfy. This module is that interface — a
//! pluggable data provider trait with a placeholder default.

use async_trait::async_trait;
use gateway_primitives::GatewayResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakingInfo {
    pub network: String,
    pub total_staked_wei: String,
    pub apr_pct: f64,
    pub validator_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LendingMarketInfo {
    pub network: String,
    pub asset_symbol: String,
    pub supply_apy_pct: f64,
    pub borrow_apy_pct: f64,
    pub total_supplied_wei: String,
}

/// Pluggable provider for DeFi inventories the core does not synthesize.
/// `gateway-registry`'s default implementation always returns
/// `GatewayError::Unsupported`; a real deployment may substitute a provider
/// backed by a subgraph or on-chain read.
#[async_trait]
pub trait DefiDataProvider: Send + Sync {
    async fn staking_info(&self, network: &str) -> GatewayResult<StakingInfo>;
    async fn lending_markets(&self, network: &str) -> GatewayResult<Vec<LendingMarketInfo>>;
}

/// Default provider: every call reports the feature as unsupported rather
/// than fabricating data.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderDefiProvider;

#[async_trait]
impl DefiDataProvider for PlaceholderDefiProvider {
    async fn staking_info(&self, network: &str) -> GatewayResult<StakingInfo> {
        Err(gateway_primitives::GatewayError::unsupported(format!(
            "staking info is a pluggable data provider, none configured for '{network}'"
        )))
    }

    async fn lending_markets(&self, network: &str) -> GatewayResult<Vec<LendingMarketInfo>> {
        Err(gateway_primitives::GatewayError::unsupported(format!(
            "lending markets are a pluggable data provider, none configured for '{network}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn placeholder_provider_is_unsupported_not_panic() {
        let p = PlaceholderDefiProvider;
        assert!(p.staking_info("iota").await.is_err());
        assert!(p.lending_markets("iota").await.is_err());
    }
}
