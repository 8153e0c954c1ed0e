//! Chain Registry.
//!
//! Built once from a static table; resolving a network is infallible in the
//! sense that it never panics — an unknown name/id is a typed
//! [`GatewayError::NotFound`], not a process abort. Extending the table
//! requires a code change, not a runtime registration call.

use std::sync::OnceLock;

use gateway_primitives::{GatewayError, GatewayResult, NetworkDescriptor, SiblingVariant, TokenDescriptor};

/// Short names of the closed sibling-family set.
pub const SIBLING_SHORT_NAMES: &[&str] = &["iota", "iota-testnet", "shimmer"];

/// Chain ids of the closed sibling-family set.
pub const SIBLING_CHAIN_IDS: &[u64] = &[8822, 1075, 148];

fn build_networks() -> Vec<NetworkDescriptor> {
    vec![
        NetworkDescriptor {
            short_name: "iota".into(),
            chain_id: 8822,
            display_name: "IOTA EVM".into(),
            native_token: TokenDescriptor { name: "IOTA".into(), symbol: "IOTA".into(), decimals: 6 },
            default_rpc_url: "https://json-rpc.evm.iotaledger.net".into(),
            explorer_url: "https://explorer.evm.iota.org".into(),
            is_sibling_family: true,
            sibling_variant: SiblingVariant::Mainnet,
        },
        NetworkDescriptor {
            short_name: "iota-testnet".into(),
            chain_id: 1075,
            display_name: "IOTA EVM Testnet".into(),
            native_token: TokenDescriptor { name: "IOTA".into(), symbol: "IOTA".into(), decimals: 6 },
            default_rpc_url: "https://json-rpc.evm.testnet.iotaledger.net".into(),
            explorer_url: "https://explorer.evm.testnet.iota.org".into(),
            is_sibling_family: true,
            sibling_variant: SiblingVariant::Testnet,
        },
        NetworkDescriptor {
            short_name: "shimmer".into(),
            chain_id: 148,
            display_name: "Shimmer EVM".into(),
            native_token: TokenDescriptor { name: "Shimmer".into(), symbol: "SMR".into(), decimals: 6 },
            default_rpc_url: "https://json-rpc.evm.shimmer.network".into(),
            explorer_url: "https://explorer.evm.shimmer.network".into(),
            is_sibling_family: true,
            sibling_variant: SiblingVariant::AltMainnet,
        },
        NetworkDescriptor {
            short_name: "ethereum".into(),
            chain_id: 1,
            display_name: "Ethereum Mainnet".into(),
            native_token: TokenDescriptor { name: "Ether".into(), symbol: "ETH".into(), decimals: 18 },
            default_rpc_url: "https://eth.llamarpc.com".into(),
            explorer_url: "https://etherscan.io".into(),
            is_sibling_family: false,
            sibling_variant: SiblingVariant::None,
        },
        NetworkDescriptor {
            short_name: "polygon".into(),
            chain_id: 137,
            display_name: "Polygon".into(),
            native_token: TokenDescriptor { name: "POL".into(), symbol: "POL".into(), decimals: 18 },
            default_rpc_url: "https://polygon-rpc.com".into(),
            explorer_url: "https://polygonscan.com".into(),
            is_sibling_family: false,
            sibling_variant: SiblingVariant::None,
        },
        NetworkDescriptor {
            short_name: "arbitrum".into(),
            chain_id: 42161,
            display_name: "Arbitrum One".into(),
            native_token: TokenDescriptor { name: "Ether".into(), symbol: "ETH".into(), decimals: 18 },
            default_rpc_url: "https://arb1.arbitrum.io/rpc".into(),
            explorer_url: "https://arbiscan.io".into(),
            is_sibling_family: false,
            sibling_variant: SiblingVariant::None,
        },
    ]
}

static NETWORKS: OnceLock<Vec<NetworkDescriptor>> = OnceLock::new();

fn networks() -> &'static [NetworkDescriptor] {
    NETWORKS.get_or_init(build_networks)
}

/// The multi-chain network registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainRegistry;

impl ChainRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Resolve by short name (case-insensitive) or numeric chain id.
    pub fn resolve(&self, needle: &str) -> GatewayResult<&'static NetworkDescriptor> {
        if let Ok(id) = needle.trim().parse::<u64>() {
            return self.resolve_chain_id(id);
        }
        let lower = needle.trim().to_ascii_lowercase();
        networks()
            .iter()
            .find(|n| n.short_name == lower)
            .ok_or_else(|| GatewayError::validation(format!("unknown network '{needle}'")))
    }

    pub fn resolve_chain_id(&self, chain_id: u64) -> GatewayResult<&'static NetworkDescriptor> {
        networks()
            .iter()
            .find(|n| n.chain_id == chain_id)
            .ok_or_else(|| GatewayError::validation(format!("unknown chain id '{chain_id}'")))
    }

    /// All registered networks.
    pub fn list(&self) -> &'static [NetworkDescriptor] {
        networks()
    }

    /// The default network used when a tool's `network` argument is
    /// omitted and `DEFAULT_CHAIN_ID` is not set: the primary sibling
    /// mainnet.
    pub fn default_network(&self) -> &'static NetworkDescriptor {
        &networks()[0]
    }

    /// Total, closed-set membership test. Never errors — an unresolvable
    /// needle is simply not a sibling.
    pub fn is_sibling(&self, needle: &str) -> bool {
        if let Ok(id) = needle.trim().parse::<u64>() {
            return SIBLING_CHAIN_IDS.contains(&id);
        }
        SIBLING_SHORT_NAMES.contains(&needle.trim().to_ascii_lowercase().as_str())
    }

    /// Same test directly on a chain id, used once a descriptor is already
    /// in hand (avoids re-parsing).
    pub fn is_sibling_id(&self, chain_id: u64) -> bool {
        SIBLING_CHAIN_IDS.contains(&chain_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_by_name_case_insensitive() {
        let reg = ChainRegistry::new();
        assert_eq!(reg.resolve("IOTA").unwrap().chain_id, 8822);
        assert_eq!(reg.resolve("Shimmer").unwrap().short_name, "shimmer");
    }

    #[test]
    fn resolves_by_chain_id() {
        let reg = ChainRegistry::new();
        assert_eq!(reg.resolve("137").unwrap().short_name, "polygon");
        assert_eq!(reg.resolve_chain_id(1).unwrap().short_name, "ethereum");
    }

    #[test]
    fn unknown_network_is_validation_error() {
        let reg = ChainRegistry::new();
        let err = reg.resolve("doesnotexist").unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
    }

    #[test]
    fn sibling_classification_is_total_and_closed() {
        let reg = ChainRegistry::new();
        assert!(reg.is_sibling("iota"));
        assert!(reg.is_sibling("IOTA-TESTNET"));
        assert!(reg.is_sibling("shimmer"));
        assert!(reg.is_sibling("8822"));
        assert!(!reg.is_sibling("ethereum"));
        assert!(!reg.is_sibling("1"));
        assert!(!reg.is_sibling("nonexistent-chain"));
    }

    #[test]
    fn every_registry_descriptor_is_consistent() {
        let reg = ChainRegistry::new();
        for n in reg.list() {
            assert_eq!(n.is_sibling_family, reg.is_sibling_id(n.chain_id));
        }
    }
}
