//! `get_cross_chain_token_price`, `find_arbitrage_opportunities`,
//! `list_arbitrage_tokens` (§4.7, §6.3).

use std::sync::Arc;

use chrono::Utc;
use gateway_arbitrage::{find_arbitrage_opportunities, quote_network, DEFAULT_MIN_PROFIT_PCT};
use gateway_primitives::GatewayResult;
use serde_json::{json, Value};

use super::args::{num_opt, str_array_opt, str_field};
use super::context::GatewayContext;

pub async fn cross_chain_token_price(ctx: Arc<GatewayContext>, args: Value) -> GatewayResult<Value> {
    let token = str_field(&args, "token")?;
    let network = str_field(&args, "network")?;
    let q = quote_network(ctx.resolver.as_ref(), &ctx.pools, token, network).await?;
    Ok(json!(q))
}

/// Truncate the full sorted list to its first three entries for the
/// human-readable preview; the JSON body alongside it always carries the
/// complete list (§4.8 "C7 always returns the full sorted list").
fn preview(opportunities: &[gateway_primitives::ArbitragePair]) -> String {
    if opportunities.is_empty() {
        return "No arbitrage opportunities found.".to_string();
    }
    opportunities
        .iter()
        .take(3)
        .map(|o| format!("{}: buy on {} @ {:.6}, sell on {} @ {:.6} ({:.2}% profit)", o.token, o.buy.network, o.buy.price, o.sell.network, o.sell.price, o.profit_pct))
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn find_opportunities(ctx: Arc<GatewayContext>, args: Value) -> GatewayResult<Value> {
    let token = str_field(&args, "token")?;
    let requested = str_array_opt(&args, "networks");
    let networks: Vec<String> =
        if requested.is_empty() { ctx.pools.networks_for(token).into_iter().map(str::to_string).collect() } else { requested };
    let min_profit_pct = num_opt(&args, "minProfitPercent").unwrap_or(DEFAULT_MIN_PROFIT_PCT);

    let opportunities = find_arbitrage_opportunities(
        ctx.resolver.as_ref(),
        &ctx.registry,
        &ctx.pools,
        token,
        &networks,
        min_profit_pct,
        Utc::now().timestamp(),
    )
    .await?;

    Ok(json!({
        "preview": preview(&opportunities),
        "opportunities": opportunities,
    }))
}

pub async fn list_tokens(ctx: Arc<GatewayContext>, _args: Value) -> GatewayResult<Value> {
    Ok(json!(ctx.pools.summary()))
}
