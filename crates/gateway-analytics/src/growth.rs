//! Network growth estimate (§4.4): deltas between *now* and a block
//! `~periodDays` back, sampling at most 50 intermediate blocks.
//!
//! The "block ~periodDays back" estimate assumes a constant recent block
//! time derived from the current sample and projects backward — a
//! documented approximation, not a timestamp binary search (Open
//! Question, resolved in DESIGN.md).

use gateway_primitives::GatewayResult;
use gateway_rpc::RpcResolver;
use serde::{Deserialize, Serialize};

use crate::gather::sample_block_range;
use crate::metrics::{derive_metrics, network_metrics, DEFAULT_SAMPLE_SIZE};

/// Maximum number of intermediate blocks sampled around the historical
/// anchor block.
pub const MAX_GROWTH_SAMPLE: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthReport {
    pub network: String,
    pub period_days: f64,
    pub daily_block_count: f64,
    pub daily_tx_count: f64,
    pub avg_daily_tps: f64,
    pub block_time_improvement_pct: f64,
    pub tx_growth_rate_pct: f64,
}

pub async fn growth(
    resolver: &dyn RpcResolver,
    network: &str,
    period_days: f64,
    now: i64,
) -> GatewayResult<GrowthReport> {
    let current = network_metrics(resolver, network, DEFAULT_SAMPLE_SIZE, now).await?;

    // No usable recent sample: nothing to project from.
    if current.avg_block_time_s <= 0.0 {
        return Ok(GrowthReport {
            network: network.to_string(),
            period_days,
            daily_block_count: 0.0,
            daily_tx_count: 0.0,
            avg_daily_tps: 0.0,
            block_time_improvement_pct: 0.0,
            tx_growth_rate_pct: 0.0,
        });
    }

    let blocks_per_day_now = 86_400.0 / current.avg_block_time_s;
    let block_offset = (period_days * blocks_per_day_now).round() as u64;
    let anchor = current.block_height.saturating_sub(block_offset);

    let half_window = (MAX_GROWTH_SAMPLE as u64) / 2;
    let start = anchor.saturating_sub(half_window);
    let end = anchor.saturating_add(half_window).min(current.block_height);
    let numbers: Vec<u64> = (start..=end).collect();

    let (_, rpc) = resolver.resolve(network).await?;
    let past_blocks = sample_block_range(rpc.as_ref(), numbers).await?;
    let past = derive_metrics(network, &past_blocks, current.gas_price_wei, current.token_info.clone(), now);

    let daily_block_count = blocks_per_day_now;
    let daily_tx_count = current.avg_tx_per_block * daily_block_count;
    let avg_daily_tps = daily_tx_count / 86_400.0;

    let block_time_improvement_pct = if past.avg_block_time_s > 0.0 {
        (past.avg_block_time_s - current.avg_block_time_s) / past.avg_block_time_s * 100.0
    } else {
        0.0
    };
    let tx_growth_rate_pct = if past.avg_tx_per_block > 0.0 {
        (current.avg_tx_per_block - past.avg_tx_per_block) / past.avg_tx_per_block * 100.0
    } else {
        0.0
    };

    Ok(GrowthReport {
        network: network.to_string(),
        period_days,
        daily_block_count,
        daily_tx_count,
        avg_daily_tps,
        block_time_improvement_pct,
        tx_growth_rate_pct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_primitives::BlockSample;
    use gateway_rpc::mock::{MockEvmRpc, StaticRpcResolver};
    use std::sync::Arc;

    fn block(number: u64, timestamp: u64) -> BlockSample {
        BlockSample { number, timestamp, gas_used: 10_000_000, gas_limit: 30_000_000, base_fee_per_gas: None, tx_count: 50, txs: None }
    }

    #[tokio::test]
    async fn growth_degrades_to_zero_without_a_usable_sample() {
        let rpc = Arc::new(MockEvmRpc::new().with_block(block(1, 1_700_000_000)));
        let resolver = StaticRpcResolver::new().with_client("iota", rpc);
        let report = growth(&resolver, "iota", 7.0, 1_700_000_010).await.unwrap();
        assert_eq!(report.daily_block_count, 0.0);
    }

    #[tokio::test]
    async fn growth_reports_nonzero_rates_with_a_steady_chain() {
        let mut builder = MockEvmRpc::new();
        for i in 0..40u64 {
            builder = builder.with_block(block(100 + i, 1_700_000_000 + i * 12));
        }
        let rpc = Arc::new(builder);
        let resolver = StaticRpcResolver::new().with_client("iota", rpc);
        let report = growth(&resolver, "iota", 0.001, 1_700_000_000 + 39 * 12 + 1).await.unwrap();
        assert!(report.daily_block_count > 0.0);
        assert!(report.avg_daily_tps > 0.0);
    }
}
