//! Token & Contract Reader (C3) — standard fungible metadata.
//!
//! Reads `name`, `symbol`, `decimals`, `totalSupply` via the standard view
//! selectors. Any single field that fails to decode defaults rather than
//! failing the whole read (§4.3): `name`/`symbol` to `"Unknown"`,
//! `decimals` to `18`, `totalSupply` to `0`.

use alloy_primitives::{Address, Bytes, U256};
use gateway_primitives::{GatewayResult, TokenDescriptor};
use gateway_rpc::EvmRpc;

use crate::selectors::ERC20_VIEWS;

/// Fungible-token metadata as read from chain, with per-field fallback
/// already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FungibleMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: U256,
}

impl Default for FungibleMetadata {
    fn default() -> Self {
        Self { name: "Unknown".into(), symbol: "Unknown".into(), decimals: 18, total_supply: U256::ZERO }
    }
}

fn encode_address_arg(selector: [u8; 4], address: Address) -> Bytes {
    let mut data = Vec::with_capacity(36);
    data.extend_from_slice(&selector);
    data.extend_from_slice(&[0u8; 12]);
    data.extend_from_slice(address.as_slice());
    Bytes::from(data)
}

/// Decode the left-most 32-byte ABI word in `data` as a `uint256`. Public
/// because the pair-reserve reads in `gateway-arbitrage` need the same
/// primitive decode.
pub fn decode_uint256(data: &[u8]) -> Option<U256> {
    if data.len() < 32 {
        return None;
    }
    Some(U256::from_be_slice(&data[data.len() - 32..]))
}

/// Decode the `index`-th 32-byte ABI word (0-based) in a multi-value
/// return, as a `uint256`.
pub fn decode_uint256_at(data: &[u8], index: usize) -> Option<U256> {
    let start = index * 32;
    decode_uint256(data.get(start..start + 32)?)
}

fn decode_uint8(data: &[u8]) -> Option<u8> {
    decode_uint256(data).map(|v| v.to::<u8>())
}

/// Decode a single ABI-encoded `address` return (right-aligned in its
/// 32-byte word).
pub fn decode_address(data: &[u8]) -> Option<Address> {
    if data.len() < 32 {
        return None;
    }
    Some(Address::from_slice(&data[data.len() - 20..]))
}

/// Decode a dynamic ABI `string` return, falling back to a `bytes32`
/// interpretation for the handful of legacy tokens (e.g. the canonical
/// MKR contract) that return a fixed-size `bytes32` instead.
fn decode_string_or_bytes32(data: &[u8]) -> Option<String> {
    if data.len() >= 64 {
        let offset = decode_uint256(&data[..32])?.to::<u64>() as usize;
        if offset + 32 <= data.len() {
            let len = decode_uint256(&data[offset..offset + 32])?.to::<u64>() as usize;
            let start = offset + 32;
            if start + len <= data.len() {
                if let Ok(s) = String::from_utf8(data[start..start + len].to_vec()) {
                    return Some(s);
                }
            }
        }
    }
    if data.len() >= 32 {
        let trimmed: Vec<u8> = data[..32].iter().copied().take_while(|&b| b != 0).collect();
        if let Ok(s) = String::from_utf8(trimmed) {
            if !s.is_empty() {
                return Some(s);
            }
        }
    }
    None
}

/// Read ERC-fungible metadata at `address`. Individual field failures
/// default per §4.3; only a transport-level failure of every call
/// propagates as an error (no contract, dead RPC, etc. are still readable
/// per-field — `call` against a nonexistent contract returns empty data,
/// which this decodes as all-defaults rather than surfacing an error).
pub async fn read_fungible_metadata(rpc: &dyn EvmRpc, address: Address) -> GatewayResult<FungibleMetadata> {
    let name = match rpc.call(address, Bytes::from(ERC20_VIEWS.name.to_vec())).await {
        Ok(data) => decode_string_or_bytes32(&data).unwrap_or_else(|| "Unknown".into()),
        Err(_) => "Unknown".into(),
    };
    let symbol = match rpc.call(address, Bytes::from(ERC20_VIEWS.symbol.to_vec())).await {
        Ok(data) => decode_string_or_bytes32(&data).unwrap_or_else(|| "Unknown".into()),
        Err(_) => "Unknown".into(),
    };
    let decimals = match rpc.call(address, Bytes::from(ERC20_VIEWS.decimals.to_vec())).await {
        Ok(data) => decode_uint8(&data).unwrap_or(18),
        Err(_) => 18,
    };
    let total_supply = match rpc.call(address, Bytes::from(ERC20_VIEWS.total_supply.to_vec())).await {
        Ok(data) => decode_uint256(&data).unwrap_or(U256::ZERO),
        Err(_) => U256::ZERO,
    };
    Ok(FungibleMetadata { name, symbol, decimals, total_supply })
}

/// `balanceOf(address)` against an arbitrary ERC20 contract (distinct from
/// the native-balance RPC facade call).
pub async fn read_token_balance(rpc: &dyn EvmRpc, token: Address, holder: Address) -> GatewayResult<U256> {
    let data = encode_address_arg(ERC20_VIEWS.balance_of, holder);
    let result = rpc.call(token, data).await?;
    Ok(decode_uint256(&result).unwrap_or(U256::ZERO))
}

/// Read fungible metadata for the sibling family's native wrapper
/// contract, falling back to the registry-declared native token if the
/// wrapper call reverts (§4.3) — the only way sibling balance/metadata
/// queries stay meaningful when the wrapper is unreachable.
pub async fn read_wrapper_or_native(
    rpc: &dyn EvmRpc,
    wrapper_address: Address,
    native: &TokenDescriptor,
) -> FungibleMetadata {
    match rpc.call(wrapper_address, Bytes::from(ERC20_VIEWS.symbol.to_vec())).await {
        Ok(_) => read_fungible_metadata(rpc, wrapper_address).await.unwrap_or_else(|_| native_as_metadata(native)),
        Err(_) => native_as_metadata(native),
    }
}

fn native_as_metadata(native: &TokenDescriptor) -> FungibleMetadata {
    FungibleMetadata {
        name: native.name.clone(),
        symbol: native.symbol.clone(),
        decimals: native.decimals,
        total_supply: U256::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use gateway_rpc::mock::MockEvmRpc;

    #[tokio::test]
    async fn defaults_every_field_for_a_contract_with_no_code() {
        let rpc = MockEvmRpc::new();
        let meta = read_fungible_metadata(&rpc, address!("0x0000000000000000000000000000000000000001"))
            .await
            .unwrap();
        assert_eq!(meta, FungibleMetadata::default());
    }

    #[tokio::test]
    async fn wrapper_falls_back_to_native_when_call_reverts() {
        let rpc = MockEvmRpc::new().with_failure("reverted");
        let native = TokenDescriptor { name: "IOTA".into(), symbol: "IOTA".into(), decimals: 6 };
        let meta = read_wrapper_or_native(
            &rpc,
            address!("0x0000000000000000000000000000000000000002"),
            &native,
        )
        .await;
        assert_eq!(meta.symbol, "IOTA");
        assert_eq!(meta.decimals, 6);
    }
}
