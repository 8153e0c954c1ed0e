//! `get_*_gas_prices`, `estimate_*_transaction_cost` (§4.5, §6.3).

use std::sync::Arc;

use chrono::Utc;
use gateway_gas::{estimate, quote, recommendation, Speed};
use gateway_primitives::GatewayResult;
use serde_json::{json, Value};

use super::args::{str_opt, u128_field, u128_opt};
use super::context::GatewayContext;

pub async fn gas_prices(ctx: Arc<GatewayContext>, args: Value) -> GatewayResult<Value> {
    let network = ctx.network_or_default(str_opt(&args, "network"));
    let (descriptor, rpc) = ctx.resolver.resolve(&network).await?;
    let q = quote(rpc.as_ref(), Utc::now().timestamp()).await?;
    Ok(json!({
        "network": descriptor.short_name,
        "quote": q,
        "recommendation": recommendation(q.congestion),
    }))
}

pub async fn estimate_transaction_cost(ctx: Arc<GatewayContext>, args: Value) -> GatewayResult<Value> {
    let gas_limit = u128_field(&args, "gasLimit")?;
    let network = ctx.network_or_default(str_opt(&args, "network"));
    let (descriptor, rpc) = ctx.resolver.resolve(&network).await?;

    let gas_price = match u128_opt(&args, "gasPrice")? {
        Some(explicit) => explicit,
        None => {
            let q = quote(rpc.as_ref(), Utc::now().timestamp()).await?;
            let speed = str_opt(&args, "speed").and_then(Speed::parse).unwrap_or(Speed::Standard);
            speed.pick(&q)
        }
    };

    let cost = estimate(gas_limit, gas_price, descriptor.native_token.decimals);
    Ok(json!({ "network": descriptor.short_name, "estimate": cost }))
}
