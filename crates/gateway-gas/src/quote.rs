//! Gas & Cost Engine (C5) — tiered quote derivation (§4.5).
//!
//! Tier multipliers are fixed-point `(numerator, denominator)` pairs
//! applied to the `u128` wei price, avoiding floating point on
//! wei-denominated quantities (the teacher workspace's general stance on
//! consensus-adjacent arithmetic). Percent-like display values
//! (utilization, profit) stay `f64` elsewhere, matching the spec wording.

use gateway_primitives::{Congestion, GasQuote, GatewayResult};
use gateway_rpc::EvmRpc;

/// `(numerator, denominator)` multiplier applied to the standard gas
/// price to derive each tier.
const SLOW: (u128, u128) = (4, 5);
const STANDARD: (u128, u128) = (1, 1);
const FAST: (u128, u128) = (6, 5);
const INSTANT: (u128, u128) = (3, 2);

fn scale(price: u128, (num, den): (u128, u128)) -> u128 {
    price.saturating_mul(num) / den
}

/// Congestion tier from a single block's gas-used ratio (§4.5).
pub fn congestion_of(gas_used: u64, gas_limit: u64) -> Congestion {
    if gas_limit == 0 {
        return Congestion::Low;
    }
    let ratio = gas_used as f64 / gas_limit as f64;
    if ratio <= 0.4 {
        Congestion::Low
    } else if ratio <= 0.7 {
        Congestion::Medium
    } else {
        Congestion::High
    }
}

/// Fetch the current gas price and newest block, and derive a tiered
/// quote. `now` is the caller's wall clock, stamped into `takenAt`.
pub async fn quote(rpc: &dyn EvmRpc, now: i64) -> GatewayResult<GasQuote> {
    let price = rpc.get_gas_price().await?;
    let newest = rpc.latest_block(false).await?;

    let congestion = congestion_of(newest.gas_used, newest.gas_limit);
    let base = newest.base_fee_per_gas.map(u128::from).unwrap_or(0);

    Ok(GasQuote {
        base,
        slow: scale(price, SLOW),
        standard: scale(price, STANDARD),
        fast: scale(price, FAST),
        instant: scale(price, INSTANT),
        congestion,
        taken_at: now,
    })
}

/// A short human-readable recommendation driven by the congestion tier,
/// returned alongside the quote by the `get_*_gas_prices` tool.
pub fn recommendation(congestion: Congestion) -> &'static str {
    match congestion {
        Congestion::Low => "Network is quiet; the standard tier should confirm quickly.",
        Congestion::Medium => "Moderate congestion; consider the fast tier for timely confirmation.",
        Congestion::High => "Network is congested; use the instant tier if confirmation speed matters.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_primitives::BlockSample;
    use gateway_rpc::mock::MockEvmRpc;

    #[test]
    fn congestion_thresholds_match_spec_boundaries() {
        assert_eq!(congestion_of(40, 100), Congestion::Low);
        assert_eq!(congestion_of(41, 100), Congestion::Medium);
        assert_eq!(congestion_of(70, 100), Congestion::Medium);
        assert_eq!(congestion_of(71, 100), Congestion::High);
    }

    #[test]
    fn zero_gas_limit_does_not_panic() {
        assert_eq!(congestion_of(0, 0), Congestion::Low);
    }

    #[tokio::test]
    async fn derives_tiers_from_the_seed_scenario() {
        let rpc = MockEvmRpc::new()
            .with_gas_price(22_500_000_000)
            .with_block(BlockSample {
                number: 1,
                timestamp: 1_700_000_000,
                gas_used: 9_000_000,
                gas_limit: 30_000_000,
                base_fee_per_gas: Some(22_100_000_000),
                tx_count: 10,
                txs: None,
            });
        let q = quote(&rpc, 1_700_000_001).await.unwrap();
        assert_eq!(q.slow, 18_000_000_000);
        assert_eq!(q.standard, 22_500_000_000);
        assert_eq!(q.fast, 27_000_000_000);
        assert_eq!(q.instant, 33_750_000_000);
        assert_eq!(q.congestion, Congestion::Low);
        assert_eq!(q.base, 22_100_000_000);
    }
}
