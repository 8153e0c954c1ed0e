//! Transaction cost estimation (§4.5).

use alloy_primitives::U256;
use gateway_primitives::CostEstimate;

/// Gas speed tier a caller may pick instead of an explicit `gasPrice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    Slow,
    Standard,
    Fast,
    Instant,
}

impl Speed {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "slow" => Some(Speed::Slow),
            "standard" => Some(Speed::Standard),
            "fast" => Some(Speed::Fast),
            "instant" => Some(Speed::Instant),
            _ => None,
        }
    }

    pub fn pick(self, quote: &gateway_primitives::GasQuote) -> u128 {
        match self {
            Speed::Slow => quote.slow,
            Speed::Standard => quote.standard,
            Speed::Fast => quote.fast,
            Speed::Instant => quote.instant,
        }
    }
}

/// Format a wei quantity with `decimals` fractional digits, trimming
/// trailing zeros but always keeping at least one fractional digit so
/// `"0.000567 IOTA"`-style output never collapses to an integer.
pub fn format_wei(amount: U256, decimals: u8) -> String {
    let divisor = U256::from(10u128).pow(U256::from(decimals));
    let whole = amount / divisor;
    let frac = amount % divisor;
    if decimals == 0 {
        return whole.to_string();
    }
    let frac_str = format!("{:0width$}", frac, width = decimals as usize);
    let trimmed = frac_str.trim_end_matches('0');
    let frac_display = if trimmed.is_empty() { "0" } else { trimmed };
    format!("{whole}.{frac_display}")
}

/// `{ gasLimit, gasPrice, total = gasLimit * gasPrice, formatted, usd:
/// None }` — USD conversion is stubbed throughout the source (§4.5, §9).
pub fn estimate(gas_limit: u128, gas_price: u128, native_decimals: u8) -> CostEstimate {
    let total_wei = U256::from(gas_limit) * U256::from(gas_price);
    CostEstimate {
        gas_limit,
        gas_price,
        total_wei,
        total_formatted: format_wei(total_wei, native_decimals),
        usd_equivalent: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_the_seed_scenario_exactly() {
        // 21000 * 27 gwei = 5.67e14 wei = 0.000567 at 6 decimals.
        let est = estimate(21_000, 27_000_000_000, 6);
        assert_eq!(est.total_wei, U256::from(567_000_000_000_000u128));
        assert_eq!(est.total_formatted, "0.000567");
        assert!(est.usd_equivalent.is_none());
    }

    #[test]
    fn formats_a_whole_number_without_a_fractional_remainder() {
        assert_eq!(format_wei(U256::from(2_000_000u128), 6), "2.0");
    }

    #[test]
    fn speed_parse_rejects_unknown_strings() {
        assert!(Speed::parse("turbo").is_none());
        assert_eq!(Speed::parse("fast"), Some(Speed::Fast));
    }
}
