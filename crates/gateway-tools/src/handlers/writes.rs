//! `transfer_iota`, `deploy_iota_smart_contract` (delegated to
//! [`crate::signer::SignerPort`]), and `get_iota_staking_info` (delegated
//! to `DefiDataProvider`) — all three are registrable tools whose actual
//! implementation this core does not carry (§1, §4.8 [ADD]).

use std::sync::Arc;

use gateway_primitives::GatewayResult;
use serde_json::{json, Value};

use super::args::{address_field, bytes_opt, str_opt, u256_field};
use super::context::GatewayContext;

pub async fn transfer(ctx: Arc<GatewayContext>, args: Value) -> GatewayResult<Value> {
    let to = address_field(&args, "to")?;
    let amount = u256_field(&args, "amount")?;
    let network = ctx.network_or_default(str_opt(&args, "network"));
    let hash = ctx.signer.transfer(&network, to, amount).await?;
    Ok(json!({ "network": network, "txHash": hash.to_string() }))
}

pub async fn deploy_smart_contract(ctx: Arc<GatewayContext>, args: Value) -> GatewayResult<Value> {
    let bytecode = bytes_opt(&args, "bytecode")?;
    let constructor_args = bytes_opt(&args, "constructorArgs")?;
    let network = ctx.network_or_default(str_opt(&args, "network"));
    let address = ctx.signer.deploy_contract(&network, bytecode, constructor_args).await?;
    Ok(json!({ "network": network, "contractAddress": address.to_string() }))
}

pub async fn staking_info(ctx: Arc<GatewayContext>, args: Value) -> GatewayResult<Value> {
    let network = ctx.network_or_default(str_opt(&args, "network"));
    let info = ctx.defi.staking_info(&network).await?;
    Ok(json!(info))
}
