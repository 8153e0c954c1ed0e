//! Signer delegation (§1 "actual contract deployment / signing... a thin
//! wrapper over a signer library" — out of scope for this crate's
//! implementation, but its call shape must exist so `transfer_iota` and
//! `deploy_iota_smart_contract` are always registrable, §4.8 [ADD]).

use alloy_primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use gateway_primitives::{GatewayError, GatewayResult};

/// A signed-write delegate. The core ships [`SignerPort::unconfigured`],
/// which answers every call with [`GatewayError::Unsupported`] until the
/// binary wires a real signer in.
#[async_trait]
pub trait SignerPort: Send + Sync {
    async fn transfer(&self, network: &str, to: Address, amount: U256) -> GatewayResult<B256>;

    async fn deploy_contract(&self, network: &str, bytecode: Bytes, constructor_args: Bytes) -> GatewayResult<Address>;
}

/// The default, always-registrable signer: every operation is
/// unsupported until a real implementation replaces it in the binary.
pub struct UnconfiguredSigner;

impl UnconfiguredSigner {
    pub fn unconfigured() -> Self {
        Self
    }
}

#[async_trait]
impl SignerPort for UnconfiguredSigner {
    async fn transfer(&self, _network: &str, _to: Address, _amount: U256) -> GatewayResult<B256> {
        Err(GatewayError::unsupported("signer is not configured for this gateway instance"))
    }

    async fn deploy_contract(&self, _network: &str, _bytecode: Bytes, _constructor_args: Bytes) -> GatewayResult<Address> {
        Err(GatewayError::unsupported("signer is not configured for this gateway instance"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[tokio::test]
    async fn unconfigured_signer_refuses_every_write() {
        let signer = UnconfiguredSigner::unconfigured();
        let err = signer
            .transfer("iota", address!("0x0000000000000000000000000000000000000001"), U256::from(1u64))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Unsupported(_)));
    }
}
