//! `analyze_*_smart_contract` (§4.3, §6.3).

use std::sync::Arc;

use gateway_contracts::analyze_contract;
use gateway_primitives::{GatewayError, GatewayResult};
use serde_json::{json, Value};

use super::args::{address_field, str_opt};
use super::context::GatewayContext;

pub async fn analyze_smart_contract(ctx: Arc<GatewayContext>, args: Value) -> GatewayResult<Value> {
    let address = address_field(&args, "contractAddress")?;
    let abi = args
        .get("abi")
        .filter(|v| v.is_array())
        .ok_or_else(|| GatewayError::validation("missing required field 'abi'"))?;
    let network = ctx.network_or_default(str_opt(&args, "network"));
    let (descriptor, rpc) = ctx.resolver.resolve(&network).await?;
    let analysis = analyze_contract(rpc.as_ref(), address, abi).await?;
    Ok(json!({ "network": descriptor.short_name, "analysis": analysis }))
}
