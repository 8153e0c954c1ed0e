//! Resource-template handlers (§6.4): each takes the bound path variables
//! from a matched [`crate::resources::UriTemplate`] instead of a tool's
//! JSON arguments. A missing `network` binding (the unparameterized
//! aliases) defaults to the primary sibling network.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use gateway_gas::format_wei;
use gateway_historian::{age_bucket, aggregate, classify, confirmations, gas_efficiency, scan_recent};
use gateway_primitives::{GatewayError, GatewayResult};
use serde_json::{json, Value};

use super::context::GatewayContext;
use super::network::finality_of;

fn network_of(ctx: &GatewayContext, bindings: &HashMap<String, String>) -> String {
    ctx.network_or_default(bindings.get("network").map(String::as_str))
}

pub async fn info(ctx: Arc<GatewayContext>, bindings: HashMap<String, String>) -> GatewayResult<Value> {
    let network = network_of(&ctx, &bindings);
    let (descriptor, rpc) = ctx.resolver.resolve(&network).await?;
    let latest_block = rpc.block_number().await?;
    Ok(json!({
        "network": descriptor.short_name,
        "chainId": descriptor.chain_id,
        "displayName": descriptor.display_name,
        "nativeToken": descriptor.native_token,
        "latestBlock": latest_block,
    }))
}

pub async fn status(ctx: Arc<GatewayContext>, bindings: HashMap<String, String>) -> GatewayResult<Value> {
    let network = network_of(&ctx, &bindings);
    let (descriptor, rpc) = ctx.resolver.resolve(&network).await?;
    let block = rpc.latest_block(false).await?;
    let now = Utc::now().timestamp();
    let block_delay = now - block.timestamp as i64;
    Ok(json!({
        "network": descriptor.short_name,
        "status": if block_delay < 60 { "healthy" } else { "degraded" },
        "latestBlock": block.number.to_string(),
        "blockTimestamp": block.timestamp,
        "blockDelay": age_bucket(block_delay),
        "finality": finality_of(block_delay),
    }))
}

pub async fn block_latest(ctx: Arc<GatewayContext>, bindings: HashMap<String, String>) -> GatewayResult<Value> {
    let network = network_of(&ctx, &bindings);
    let (descriptor, rpc) = ctx.resolver.resolve(&network).await?;
    let block = rpc.latest_block(false).await?;
    Ok(json!({ "network": descriptor.short_name, "block": block }))
}

pub async fn address_balance(ctx: Arc<GatewayContext>, bindings: HashMap<String, String>) -> GatewayResult<Value> {
    let network = network_of(&ctx, &bindings);
    let raw_address = bindings.get("address").ok_or_else(|| GatewayError::validation("missing 'address' path variable"))?;
    let address = raw_address.parse().map_err(|_| GatewayError::validation(format!("'{raw_address}' is not a valid address")))?;
    let (descriptor, rpc) = ctx.resolver.resolve(&network).await?;
    let balance = rpc.get_balance(address).await?;
    Ok(json!({
        "network": descriptor.short_name,
        "address": raw_address,
        "balanceWei": balance.to_string(),
        "balanceFormatted": format_wei(balance, descriptor.native_token.decimals),
    }))
}

pub async fn address_metrics(ctx: Arc<GatewayContext>, bindings: HashMap<String, String>) -> GatewayResult<Value> {
    let network = network_of(&ctx, &bindings);
    let raw_address = bindings.get("address").ok_or_else(|| GatewayError::validation("missing 'address' path variable"))?;
    let address = raw_address.parse().map_err(|_| GatewayError::validation(format!("'{raw_address}' is not a valid address")))?;
    let (descriptor, rpc) = ctx.resolver.resolve(&network).await?;
    let (txs, window) = scan_recent(rpc.as_ref()).await?;
    let metrics = aggregate(address, &txs, window, Utc::now().timestamp());
    Ok(json!({ "network": descriptor.short_name, "metrics": metrics }))
}

pub async fn tx_lookup(ctx: Arc<GatewayContext>, bindings: HashMap<String, String>) -> GatewayResult<Value> {
    let network = network_of(&ctx, &bindings);
    let raw_hash = bindings.get("txHash").ok_or_else(|| GatewayError::validation("missing 'txHash' path variable"))?;
    let hash = raw_hash.parse().map_err(|_| GatewayError::validation(format!("'{raw_hash}' is not a valid transaction hash")))?;
    let (descriptor, rpc) = ctx.resolver.resolve(&network).await?;

    let tx = rpc.get_tx(hash).await?.ok_or_else(|| GatewayError::not_found(format!("no such transaction '{raw_hash}'")))?;
    let label = classify(&tx);

    let receipt = rpc.get_receipt(hash).await?;
    let (status, gas_eff, confirms) = match &receipt {
        Some(r) => {
            let latest = rpc.block_number().await.unwrap_or(r.block_number);
            (Some(r.status), Some(gas_efficiency(r, tx.gas)), Some(confirmations(latest, r.block_number)))
        }
        None => (None, None, None),
    };

    Ok(json!({
        "network": descriptor.short_name,
        "tx": tx,
        "label": label.as_str(),
        "receipt": receipt,
        "status": status,
        "gasEfficiency": gas_eff,
        "confirmations": confirms,
    }))
}
