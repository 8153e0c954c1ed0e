//! Cross-chain opportunity enumeration (§4.7).

use futures::future::join_all;
use gateway_primitives::{ArbQuoteSide, ArbitragePair, GatewayResult, TokenQuote};
use gateway_registry::{ChainRegistry, PoolRegistry};
use gateway_rpc::RpcResolver;

use crate::quote::quote_network;

/// Default minimum profit threshold (percent) when the caller doesn't
/// supply one.
pub const DEFAULT_MIN_PROFIT_PCT: f64 = 1.0;

fn side_of(quote: &TokenQuote) -> ArbQuoteSide {
    ArbQuoteSide { network: quote.network.clone(), price: quote.price_in_base, dex: quote.dex.clone(), liquidity: quote.liquidity }
}

/// Quote `symbol` concurrently on every network in `networks` that
/// actually carries a pool for it (§4.7 "Engine filters `Ns`..."). Fewer
/// than two quotable networks yields an empty quote list, not an error.
pub async fn quote_all(
    resolver: &dyn RpcResolver,
    pools: &PoolRegistry,
    symbol: &str,
    networks: &[String],
) -> Vec<TokenQuote> {
    let quotable: Vec<&String> = networks.iter().filter(|n| pools.get(symbol, n).is_some()).collect();
    if quotable.len() < 2 {
        return Vec::new();
    }

    let futures = quotable.iter().map(|network| quote_network(resolver, pools, symbol, network));
    join_all(futures)
        .await
        .into_iter()
        .filter_map(|result| match result {
            Ok(q) => Some(q),
            Err(e) => {
                tracing::warn!(error = %e, "arbitrage quote degraded, network dropped");
                None
            }
        })
        .collect()
}

/// Enumerate every directed, profitable pair among `quotes` (§4.7
/// "for each ordered pair..."). Pairs whose two sides disagree on the
/// base token are skipped with a warning rather than silently assumed
/// equal (§4.7 explicitly flags the source's silent-assumption bug).
pub fn enumerate_opportunities(
    registry: &ChainRegistry,
    symbol: &str,
    quotes: &[TokenQuote],
    min_profit_pct: f64,
    now: i64,
) -> Vec<ArbitragePair> {
    let mut out = Vec::new();
    for buy in quotes {
        for sell in quotes {
            if buy.network == sell.network {
                continue;
            }
            if buy.base_symbol != sell.base_symbol {
                tracing::warn!(
                    buy_network = %buy.network,
                    sell_network = %sell.network,
                    buy_base = %buy.base_symbol,
                    sell_base = %sell.base_symbol,
                    "skipping arbitrage pair: base token mismatch"
                );
                continue;
            }
            if buy.price_in_base <= 0.0 {
                continue;
            }
            let profit_pct = (sell.price_in_base - buy.price_in_base) / buy.price_in_base * 100.0;
            if profit_pct < min_profit_pct {
                continue;
            }
            let bridging_required = !(registry.is_sibling(&buy.network) && registry.is_sibling(&sell.network));
            out.push(ArbitragePair {
                token: symbol.to_ascii_uppercase(),
                base_token: buy.base_symbol.clone(),
                buy: side_of(buy),
                sell: side_of(sell),
                profit_pct,
                bridging_required,
                taken_at: now,
            });
        }
    }
    out.sort_by(|a, b| b.profit_pct.partial_cmp(&a.profit_pct).unwrap());
    out
}

/// End-to-end entry point: quote `symbol` on every candidate network,
/// then enumerate profitable directed pairs.
pub async fn find_arbitrage_opportunities(
    resolver: &dyn RpcResolver,
    registry: &ChainRegistry,
    pools: &PoolRegistry,
    symbol: &str,
    networks: &[String],
    min_profit_pct: f64,
    now: i64,
) -> GatewayResult<Vec<ArbitragePair>> {
    let quotes = quote_all(resolver, pools, symbol, networks).await;
    if quotes.len() < 2 {
        return Ok(Vec::new());
    }
    Ok(enumerate_opportunities(registry, symbol, &quotes, min_profit_pct, now))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(network: &str, base: &str, price: f64, liquidity: f64) -> TokenQuote {
        TokenQuote {
            network: network.to_string(),
            symbol: "USDC".to_string(),
            base_symbol: base.to_string(),
            price_in_base: price,
            liquidity,
            dex: "TestDex".to_string(),
        }
    }

    #[test]
    fn profit_formula_and_ordering_match_spec() {
        let registry = ChainRegistry::new();
        let quotes = vec![quote("iota", "USD", 1.00, 1_000_000.0), quote("shimmer", "USD", 1.05, 500_000.0)];
        let opps = enumerate_opportunities(&registry, "usdc", &quotes, 1.0, 1_700_000_000);
        assert_eq!(opps.len(), 1);
        let o = &opps[0];
        assert_eq!(o.buy.network, "iota");
        assert_eq!(o.sell.network, "shimmer");
        assert!((o.profit_pct - 5.0).abs() < 1e-9);
        assert!(o.profit_pct >= 1.0);
    }

    #[test]
    fn bridging_required_reflects_sibling_membership() {
        let registry = ChainRegistry::new();
        let siblings = vec![quote("iota", "USD", 1.00, 1.0), quote("shimmer", "USD", 1.10, 1.0)];
        let opps = registry_opps(&registry, &siblings);
        assert!(!opps[0].bridging_required);

        let cross = vec![quote("iota", "USD", 1.00, 1.0), quote("ethereum", "USD", 1.10, 1.0)];
        let opps = registry_opps(&registry, &cross);
        assert!(opps[0].bridging_required);
    }

    fn registry_opps(registry: &ChainRegistry, quotes: &[TokenQuote]) -> Vec<ArbitragePair> {
        enumerate_opportunities(registry, "usdc", quotes, 1.0, 1_700_000_000)
    }

    #[test]
    fn below_threshold_pairs_are_not_emitted() {
        let registry = ChainRegistry::new();
        let quotes = vec![quote("iota", "USD", 1.00, 1.0), quote("shimmer", "USD", 1.005, 1.0)];
        assert!(enumerate_opportunities(&registry, "usdc", &quotes, 1.0, 1_700_000_000).is_empty());
    }

    #[test]
    fn mismatched_base_tokens_are_skipped() {
        let registry = ChainRegistry::new();
        let quotes = vec![quote("iota", "USD", 1.00, 1.0), quote("shimmer", "ETH", 1.10, 1.0)];
        assert!(enumerate_opportunities(&registry, "usdc", &quotes, 1.0, 1_700_000_000).is_empty());
    }

    #[tokio::test]
    async fn fewer_than_two_quotable_networks_returns_empty() {
        let pools = PoolRegistry::new();
        let resolver = gateway_rpc::mock::StaticRpcResolver::new();
        let result = quote_all(&resolver, &pools, "usdc", &["iota".to_string()]).await;
        assert!(result.is_empty());
    }
}
