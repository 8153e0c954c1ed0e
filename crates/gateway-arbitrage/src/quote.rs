//! Per-network pool-reserve quoting (§4.7 steps 1-5).

use alloy_primitives::U256;
use gateway_contracts::{decode_address, decode_uint256_at, read_fungible_metadata};
use gateway_primitives::{GatewayError, GatewayResult, TokenQuote};
use gateway_registry::PoolRegistry;
use gateway_rpc::RpcResolver;

/// Humanize a `U256` amount at `decimals` as an `f64`. Lossy by
/// construction (pool reserves comfortably fit `u128`); arbitrage pricing
/// is a detection signal, not a settlement amount (§1 "detection only").
fn humanize(amount: U256, decimals: u8) -> f64 {
    amount.saturating_to::<u128>() as f64 / 10f64.powi(decimals as i32)
}

/// Read `getReserves`/`token0`/`token1` from a constant-product pair and
/// derive a [`TokenQuote`] for `symbol` against whichever side of the
/// pair isn't the target (§4.7 steps 1-5).
pub async fn quote_network(
    resolver: &dyn RpcResolver,
    pools: &PoolRegistry,
    symbol: &str,
    network: &str,
) -> GatewayResult<TokenQuote> {
    use gateway_contracts::selectors::PAIR_VIEWS;

    let entry = pools
        .get(symbol, network)
        .ok_or_else(|| GatewayError::not_found(format!("no pool for {symbol} on {network}")))?;

    let (_, rpc) = resolver.resolve(network).await?;

    let reserves_data = rpc.call(entry.pair_address, alloy_primitives::Bytes::from(PAIR_VIEWS.get_reserves.to_vec())).await?;
    let reserve0 = decode_uint256_at(&reserves_data, 0)
        .ok_or_else(|| GatewayError::upstream("malformed getReserves response"))?;
    let reserve1 = decode_uint256_at(&reserves_data, 1)
        .ok_or_else(|| GatewayError::upstream("malformed getReserves response"))?;

    let token0_data = rpc.call(entry.pair_address, alloy_primitives::Bytes::from(PAIR_VIEWS.token0.to_vec())).await?;
    let token1_data = rpc.call(entry.pair_address, alloy_primitives::Bytes::from(PAIR_VIEWS.token1.to_vec())).await?;
    let token0 = decode_address(&token0_data).ok_or_else(|| GatewayError::upstream("malformed token0 response"))?;
    let token1 = decode_address(&token1_data).ok_or_else(|| GatewayError::upstream("malformed token1 response"))?;

    let (meta0, meta1) = futures::future::try_join(
        read_fungible_metadata(rpc.as_ref(), token0),
        read_fungible_metadata(rpc.as_ref(), token1),
    )
    .await?;

    let (target_reserve, target_decimals, base_reserve, base_decimals, base_symbol) =
        if meta0.symbol.eq_ignore_ascii_case(symbol) {
            (reserve0, meta0.decimals, reserve1, meta1.decimals, meta1.symbol.clone())
        } else if meta1.symbol.eq_ignore_ascii_case(symbol) {
            (reserve1, meta1.decimals, reserve0, meta0.decimals, meta0.symbol.clone())
        } else {
            return Err(GatewayError::not_found(format!(
                "pool at {network} for {symbol} does not contain that symbol"
            )));
        };

    if target_reserve.is_zero() {
        return Err(GatewayError::logic(format!("zero target reserve for {symbol} on {network}")));
    }

    let price_in_base = humanize(base_reserve, base_decimals) / humanize(target_reserve, target_decimals);
    let liquidity = humanize(target_reserve, target_decimals);

    Ok(TokenQuote {
        network: network.to_string(),
        symbol: symbol.to_ascii_uppercase(),
        base_symbol,
        price_in_base,
        liquidity,
        dex: entry.dex_name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, Address, Bytes};
    use gateway_rpc::mock::{MockEvmRpc, StaticRpcResolver};
    use std::sync::Arc;

    fn encode_reserves(reserve0: u128, reserve1: u128) -> Bytes {
        let mut data = vec![0u8; 96];
        data[16..32].copy_from_slice(&reserve0.to_be_bytes());
        data[48..64].copy_from_slice(&reserve1.to_be_bytes());
        Bytes::from(data)
    }

    fn encode_address(addr: Address) -> Bytes {
        let mut data = vec![0u8; 32];
        data[12..].copy_from_slice(addr.as_slice());
        Bytes::from(data)
    }

    #[tokio::test]
    async fn derives_price_and_liquidity_from_reserves() {
        use gateway_contracts::selectors::{ERC20_VIEWS, PAIR_VIEWS};

        let pair = address!("0x3333333333333333333333333333333333333c");
        let token0 = address!("0x0000000000000000000000000000000000aaaa");
        let token1 = address!("0x0000000000000000000000000000000000bbbb");

        let rpc = Arc::new(
            MockEvmRpc::new()
                .with_call(pair, PAIR_VIEWS.get_reserves, encode_reserves(1_000_000_000000, 500_000_000000_000000000000))
                .with_call(pair, PAIR_VIEWS.token0, encode_address(token0))
                .with_call(pair, PAIR_VIEWS.token1, encode_address(token1))
                .with_call(token0, ERC20_VIEWS.symbol, string_return("USDC"))
                .with_call(token0, ERC20_VIEWS.decimals, uint_return(6))
                .with_call(token1, ERC20_VIEWS.symbol, string_return("WETH"))
                .with_call(token1, ERC20_VIEWS.decimals, uint_return(18)),
        );
        let resolver = StaticRpcResolver::new().with_client("ethereum", rpc);
        let pools = PoolRegistry::new();

        let quote = quote_network(&resolver, &pools, "usdc", "ethereum").await.unwrap();
        assert_eq!(quote.symbol, "USDC");
        assert_eq!(quote.base_symbol, "WETH");
        assert!(quote.price_in_base > 0.0);
        assert!(quote.liquidity > 0.0);
    }

    fn string_return(s: &str) -> Bytes {
        let mut data = vec![0u8; 64];
        data[31] = 32;
        let len = s.len();
        data[63] = len as u8;
        data.extend_from_slice(s.as_bytes());
        while data.len() % 32 != 0 {
            data.push(0);
        }
        Bytes::from(data)
    }

    fn uint_return(v: u64) -> Bytes {
        let mut data = vec![0u8; 32];
        data[24..].copy_from_slice(&v.to_be_bytes());
        Bytes::from(data)
    }
}
