//! Network metrics derivation (§4.4) and the entry point that resolves a
//! network name, samples it, and fetches its gas price/token info.

use gateway_primitives::{BlockSample, GatewayResult, NetworkMetrics, TokenDescriptor};
use gateway_rpc::RpcResolver;

use crate::gather::sample_recent_blocks;

/// Default sample size for `gather` when the caller doesn't override it.
pub const DEFAULT_SAMPLE_SIZE: usize = 20;

/// A block sample is "healthy" if its newest observed timestamp is within
/// this many seconds of "now".
pub const HEALTHY_STALENESS_SECS: i64 = 60;

/// Derive [`NetworkMetrics`] from an already-sorted (ascending by
/// timestamp) block sample, the current gas price, and the network's
/// token descriptor. `now` is injected so the function stays a pure,
/// deterministic function of its inputs (§8 "deterministic function of
/// the observed block sample").
pub fn derive_metrics(
    network: &str,
    blocks: &[BlockSample],
    gas_price_wei: u128,
    token_info: TokenDescriptor,
    now: i64,
) -> NetworkMetrics {
    let k = blocks.len();
    let block_height = blocks.iter().map(|b| b.number).max().unwrap_or(0);

    if k < 2 {
        return NetworkMetrics {
            network: network.to_string(),
            block_height,
            sample_size: k,
            avg_block_time_s: 0.0,
            avg_tx_per_block: 0.0,
            recent_tps: 0.0,
            avg_gas_used: 0.0,
            utilization_pct: 0.0,
            gas_price_wei,
            healthy: false,
            token_info,
        };
    }

    let mut diffs_sum = 0.0f64;
    for window in blocks.windows(2) {
        diffs_sum += (window[1].timestamp as f64) - (window[0].timestamp as f64);
    }
    let avg_block_time_s = diffs_sum / (k - 1) as f64;

    let total_tx: u64 = blocks.iter().map(|b| b.tx_count).sum();
    let avg_tx_per_block = total_tx as f64 / k as f64;

    let recent_tps = if avg_block_time_s > 0.0 { avg_tx_per_block / avg_block_time_s } else { 0.0 };

    let total_gas_used: u64 = blocks.iter().map(|b| b.gas_used).sum();
    let avg_gas_used = total_gas_used as f64 / k as f64;

    let newest = blocks.last().expect("k >= 2");
    let utilization_pct = if newest.gas_limit > 0 {
        (total_gas_used as f64) / (k as f64 * newest.gas_limit as f64) * 100.0
    } else {
        0.0
    };

    let healthy = (now - newest.timestamp as i64) < HEALTHY_STALENESS_SECS;

    NetworkMetrics {
        network: network.to_string(),
        block_height,
        sample_size: k,
        avg_block_time_s,
        avg_tx_per_block,
        recent_tps,
        avg_gas_used,
        utilization_pct,
        gas_price_wei,
        healthy,
        token_info,
    }
}

/// Resolve `network`, sample `sample_size` recent blocks, fetch the
/// current gas price, and derive metrics. `now` is the caller's wall
/// clock (injected, not read internally, for the same determinism reason
/// as [`derive_metrics`]).
pub async fn network_metrics(
    resolver: &dyn RpcResolver,
    network: &str,
    sample_size: usize,
    now: i64,
) -> GatewayResult<NetworkMetrics> {
    let (descriptor, rpc) = resolver.resolve(network).await?;
    let blocks = sample_recent_blocks(rpc.as_ref(), sample_size).await?;
    let gas_price = rpc.get_gas_price().await.unwrap_or(0);
    Ok(derive_metrics(&descriptor.short_name, &blocks, gas_price, descriptor.native_token.clone(), now))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(number: u64, timestamp: u64, gas_used: u64, gas_limit: u64, tx_count: u64) -> BlockSample {
        BlockSample { number, timestamp, gas_used, gas_limit, base_fee_per_gas: None, tx_count, txs: None }
    }

    fn token() -> TokenDescriptor {
        TokenDescriptor { name: "Test".into(), symbol: "TST".into(), decimals: 18 }
    }

    #[test]
    fn zero_or_one_block_yields_all_zero_unhealthy() {
        let m0 = derive_metrics("n", &[], 1, token(), 1_700_000_000);
        assert_eq!(m0.avg_block_time_s, 0.0);
        assert!(!m0.healthy);

        let one = vec![block(1, 1_700_000_000, 0, 30_000_000, 0)];
        let m1 = derive_metrics("n", &one, 1, token(), 1_700_000_000);
        assert_eq!(m1.recent_tps, 0.0);
        assert!(!m1.healthy);
    }

    #[test]
    fn gas_limit_zero_does_not_divide_by_zero() {
        let blocks = vec![block(1, 1_000, 0, 0, 1), block(2, 1_012, 0, 0, 1)];
        let m = derive_metrics("n", &blocks, 1, token(), 2_000);
        assert_eq!(m.utilization_pct, 0.0);
    }

    #[test]
    fn derives_expected_rates_from_a_two_block_sample() {
        let blocks = vec![
            block(100, 1_000_000_000, 15_000_000, 30_000_000, 100),
            block(101, 1_000_000_012, 21_000_000, 30_000_000, 140),
        ];
        let m = derive_metrics("n", &blocks, 22_500_000_000, token(), 1_000_000_012 + 5);
        assert_eq!(m.avg_block_time_s, 12.0);
        assert_eq!(m.avg_tx_per_block, 120.0);
        assert!((m.recent_tps - 10.0).abs() < 1e-9);
        assert!((m.utilization_pct - 60.0).abs() < 1e-9);
        assert!(m.healthy);
    }

    #[test]
    fn stale_block_is_unhealthy() {
        let blocks = vec![block(1, 1_000, 1, 1_000, 1), block(2, 1_012, 1, 1_000, 1)];
        let m = derive_metrics("n", &blocks, 1, token(), 1_012 + 61);
        assert!(!m.healthy);
    }

    #[test]
    fn metrics_are_deterministic_over_the_same_sample() {
        let blocks = vec![block(1, 1_000, 500, 1_000, 2), block(2, 1_012, 600, 1_000, 3)];
        let a = derive_metrics("n", &blocks, 5, token(), 2_000);
        let b = derive_metrics("n", &blocks, 5, token(), 2_000);
        assert_eq!(a.avg_block_time_s, b.avg_block_time_s);
        assert_eq!(a.recent_tps, b.recent_tps);
        assert_eq!(a.utilization_pct, b.utilization_pct);
    }
}
