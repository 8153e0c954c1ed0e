//! Pool registry: static `symbol -> network -> pool` table backing the
//! arbitrage engine's cross-chain quoting.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use alloy_primitives::address;
use gateway_primitives::PoolRegistryEntry;

fn build_pools() -> BTreeMap<(&'static str, &'static str), PoolRegistryEntry> {
    let mut m = BTreeMap::new();
    m.insert(
        ("USDC", "iota"),
        PoolRegistryEntry {
            pair_address: address!("0x1111111111111111111111111111111111111a"),
            dex_name: "DeepCliff".into(),
            bridged_from_canonical: true,
        },
    );
    m.insert(
        ("USDC", "shimmer"),
        PoolRegistryEntry {
            pair_address: address!("0x2222222222222222222222222222222222222b"),
            dex_name: "SaucerFin".into(),
            bridged_from_canonical: true,
        },
    );
    m.insert(
        ("USDC", "ethereum"),
        PoolRegistryEntry {
            pair_address: address!("0x3333333333333333333333333333333333333c"),
            dex_name: "UniswapV2".into(),
            bridged_from_canonical: false,
        },
    );
    m.insert(
        ("USDC", "polygon"),
        PoolRegistryEntry {
            pair_address: address!("0x4444444444444444444444444444444444444d"),
            dex_name: "QuickSwap".into(),
            bridged_from_canonical: true,
        },
    );
    m.insert(
        ("WETH", "ethereum"),
        PoolRegistryEntry {
            pair_address: address!("0x5555555555555555555555555555555555555e"),
            dex_name: "UniswapV2".into(),
            bridged_from_canonical: false,
        },
    );
    m.insert(
        ("WETH", "arbitrum"),
        PoolRegistryEntry {
            pair_address: address!("0x6666666666666666666666666666666666666f"),
            dex_name: "CamelotDex".into(),
            bridged_from_canonical: true,
        },
    );
    m
}

static POOLS: OnceLock<BTreeMap<(&'static str, &'static str), PoolRegistryEntry>> = OnceLock::new();

fn pools() -> &'static BTreeMap<(&'static str, &'static str), PoolRegistryEntry> {
    POOLS.get_or_init(build_pools)
}

/// The static per-token pool registry. Absence of a `(symbol, network)`
/// entry means "not quotable on that network".
#[derive(Debug, Clone, Copy, Default)]
pub struct PoolRegistry;

impl PoolRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Look up the pool backing `symbol` on `network`, if quotable there.
    /// Matching on `symbol` is case-insensitive.
    pub fn get(&self, symbol: &str, network: &str) -> Option<&'static PoolRegistryEntry> {
        let symbol_upper = symbol.to_ascii_uppercase();
        pools()
            .iter()
            .find(|((s, n), _)| s.eq_ignore_ascii_case(&symbol_upper) && *n == network)
            .map(|(_, entry)| entry)
    }

    /// Every network a symbol is quotable on.
    pub fn networks_for(&self, symbol: &str) -> Vec<&'static str> {
        let symbol_upper = symbol.to_ascii_uppercase();
        pools()
            .keys()
            .filter(|(s, _)| s.eq_ignore_ascii_case(&symbol_upper))
            .map(|(_, n)| *n)
            .collect()
    }

    /// `symbol -> [networks]` summary for the `list_arbitrage_tokens` tool.
    pub fn summary(&self) -> BTreeMap<&'static str, Vec<&'static str>> {
        let mut out: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
        for (symbol, network) in pools().keys() {
            out.entry(symbol).or_default().push(network);
        }
        out
    }
}
