//! Multi-network comparison (§4.4): one task per network, awaited
//! jointly, with four derived rankings. A network that errors enters the
//! rankings with zero values rather than being dropped.

use futures::future::join_all;
use gateway_primitives::NetworkMetrics;
use gateway_rpc::RpcResolver;
use serde::{Deserialize, Serialize};

use crate::metrics::network_metrics;

/// Reduced sample size used for the non-primary networks in a comparison,
/// trading precision for latency (§4.4).
pub const COMPARISON_SAMPLE_SIZE: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkComparison {
    pub metrics: Vec<NetworkMetrics>,
    pub ranked_by_tps_desc: Vec<String>,
    pub ranked_by_block_time_asc: Vec<String>,
    pub ranked_by_gas_price_asc: Vec<String>,
    pub ranked_by_utilization_desc: Vec<String>,
}

fn zeroed(network: &str) -> NetworkMetrics {
    NetworkMetrics {
        network: network.to_string(),
        block_height: 0,
        sample_size: 0,
        avg_block_time_s: 0.0,
        avg_tx_per_block: 0.0,
        recent_tps: 0.0,
        avg_gas_used: 0.0,
        utilization_pct: 0.0,
        gas_price_wei: 0,
        healthy: false,
        token_info: gateway_primitives::TokenDescriptor { name: "Unknown".into(), symbol: "?".into(), decimals: 18 },
    }
}

/// Run `gather` on `primary` plus every network in `others` in parallel,
/// then rank them four ways. Networks that fail to resolve or sample are
/// included with zeroed metrics rather than being excluded.
pub async fn compare(
    resolver: &dyn RpcResolver,
    primary: &str,
    others: &[String],
    now: i64,
) -> NetworkComparison {
    let mut names = vec![primary.to_string()];
    names.extend(others.iter().cloned());

    let futures = names.iter().enumerate().map(|(i, name)| {
        let sample_size = if i == 0 { crate::metrics::DEFAULT_SAMPLE_SIZE } else { COMPARISON_SAMPLE_SIZE };
        async move {
            match network_metrics(resolver, name, sample_size, now).await {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!(network = %name, error = %e, "comparison network degraded to zero");
                    zeroed(name)
                }
            }
        }
    });
    let metrics: Vec<NetworkMetrics> = join_all(futures).await;

    let rank = |mut idx: Vec<usize>, key: &dyn Fn(&NetworkMetrics) -> f64, ascending: bool| -> Vec<String> {
        idx.sort_by(|&a, &b| {
            let (va, vb) = (key(&metrics[a]), key(&metrics[b]));
            if ascending { va.partial_cmp(&vb).unwrap() } else { vb.partial_cmp(&va).unwrap() }
        });
        idx.into_iter().map(|i| metrics[i].network.clone()).collect()
    };
    let all_idx: Vec<usize> = (0..metrics.len()).collect();

    NetworkComparison {
        ranked_by_tps_desc: rank(all_idx.clone(), &|m| m.recent_tps, false),
        ranked_by_block_time_asc: rank(all_idx.clone(), &|m| m.avg_block_time_s, true),
        ranked_by_gas_price_asc: rank(all_idx.clone(), &|m| m.gas_price_wei as f64, true),
        ranked_by_utilization_desc: rank(all_idx, &|m| m.utilization_pct, false),
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_primitives::BlockSample;
    use gateway_rpc::mock::{MockEvmRpc, StaticRpcResolver};
    use std::sync::Arc;

    fn block(number: u64, timestamp: u64) -> BlockSample {
        BlockSample { number, timestamp, gas_used: 1_000, gas_limit: 30_000_000, base_fee_per_gas: None, tx_count: 1, txs: None }
    }

    #[tokio::test]
    async fn errored_networks_enter_rankings_with_zero_values() {
        let iota_rpc = Arc::new(
            MockEvmRpc::new().with_block(block(10, 1_700_000_000)).with_block(block(11, 1_700_000_012)),
        );
        let resolver = StaticRpcResolver::new().with_client("iota", iota_rpc);
        let comparison =
            compare(&resolver, "iota", &["shimmer".to_string()], 1_700_000_020).await;
        assert_eq!(comparison.metrics.len(), 2);
        assert!(comparison.ranked_by_tps_desc.contains(&"shimmer".to_string()));
        let shimmer = comparison.metrics.iter().find(|m| m.network == "shimmer").unwrap();
        assert_eq!(shimmer.recent_tps, 0.0);
    }
}
