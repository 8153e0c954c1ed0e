//! Selector table for the recognized interface standards.
//!
//! Every selector is the first four bytes of `keccak256` of the
//! canonical signature string, computed once behind a `LazyLock` rather
//! than hand-transcribed — the transcription itself is the bug class this
//! avoids.

use std::sync::LazyLock;

use alloy_primitives::keccak256;

/// A standard this gateway can detect a contract as implementing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum StandardId {
    Erc20,
    Erc721,
    Erc1155,
    Erc4626,
    Eip2612,
    Ownable,
    Pausable,
}

impl StandardId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StandardId::Erc20 => "ERC20",
            StandardId::Erc721 => "ERC721",
            StandardId::Erc1155 => "ERC1155",
            StandardId::Erc4626 => "ERC4626",
            StandardId::Eip2612 => "EIP2612",
            StandardId::Ownable => "Ownable",
            StandardId::Pausable => "Pausable",
        }
    }

    pub fn all() -> &'static [StandardId] {
        &[
            StandardId::Erc20,
            StandardId::Erc721,
            StandardId::Erc1155,
            StandardId::Erc4626,
            StandardId::Eip2612,
            StandardId::Ownable,
            StandardId::Pausable,
        ]
    }

    /// Canonical function signatures a contract's ABI must cover, all of
    /// them, to be recognized as implementing this standard.
    pub fn required_signatures(&self) -> &'static [&'static str] {
        match self {
            StandardId::Erc20 => &[
                "name()",
                "symbol()",
                "decimals()",
                "totalSupply()",
                "balanceOf(address)",
                "transfer(address,uint256)",
                "transferFrom(address,address,uint256)",
                "approve(address,uint256)",
                "allowance(address,address)",
            ],
            StandardId::Erc721 => &[
                "balanceOf(address)",
                "ownerOf(uint256)",
                "transferFrom(address,address,uint256)",
                "approve(address,uint256)",
                "setApprovalForAll(address,bool)",
                "getApproved(uint256)",
                "isApprovedForAll(address,address)",
            ],
            StandardId::Erc1155 => &[
                "balanceOf(address,uint256)",
                "balanceOfBatch(address[],uint256[])",
                "setApprovalForAll(address,bool)",
                "isApprovedForAll(address,address)",
                "safeTransferFrom(address,address,uint256,uint256,bytes)",
                "safeBatchTransferFrom(address,address,uint256[],uint256[],bytes)",
            ],
            StandardId::Erc4626 => &[
                "asset()",
                "totalAssets()",
                "convertToShares(uint256)",
                "convertToAssets(uint256)",
                "deposit(uint256,address)",
                "mint(uint256,address)",
                "withdraw(uint256,address,address)",
                "redeem(uint256,address,address)",
            ],
            StandardId::Eip2612 => &[
                "permit(address,address,uint256,uint256,uint8,bytes32,bytes32)",
                "nonces(address)",
                "DOMAIN_SEPARATOR()",
            ],
            StandardId::Ownable => &["owner()", "transferOwnership(address)", "renounceOwnership()"],
            StandardId::Pausable => &["paused()", "pause()", "unpause()"],
        }
    }
}

/// `keccak256(signature)[..4]`.
pub fn selector_of(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Well-known selectors used by the transaction classifier (§4.6), kept
/// alongside the interface table so the classifier and the interface
/// detector never drift out of sync.
pub struct WellKnownSelectors {
    pub erc20_transfer: [u8; 4],
    pub erc20_approve: [u8; 4],
    pub erc721_transfer_from: [u8; 4],
    pub erc1155_safe_transfer_from: [u8; 4],
}

pub static WELL_KNOWN: LazyLock<WellKnownSelectors> = LazyLock::new(|| WellKnownSelectors {
    erc20_transfer: selector_of("transfer(address,uint256)"),
    erc20_approve: selector_of("approve(address,uint256)"),
    erc721_transfer_from: selector_of("transferFrom(address,address,uint256)"),
    erc1155_safe_transfer_from: selector_of("safeTransferFrom(address,address,uint256,uint256,bytes)"),
});

/// ERC20 view-function selectors used by the token reader.
pub struct Erc20ViewSelectors {
    pub name: [u8; 4],
    pub symbol: [u8; 4],
    pub decimals: [u8; 4],
    pub total_supply: [u8; 4],
    pub balance_of: [u8; 4],
}

pub static ERC20_VIEWS: LazyLock<Erc20ViewSelectors> = LazyLock::new(|| Erc20ViewSelectors {
    name: selector_of("name()"),
    symbol: selector_of("symbol()"),
    decimals: selector_of("decimals()"),
    total_supply: selector_of("totalSupply()"),
    balance_of: selector_of("balanceOf(address)"),
});

/// The pair-contract selectors the arbitrage engine reads.
pub struct PairViewSelectors {
    pub get_reserves: [u8; 4],
    pub token0: [u8; 4],
    pub token1: [u8; 4],
}

pub static PAIR_VIEWS: LazyLock<PairViewSelectors> = LazyLock::new(|| PairViewSelectors {
    get_reserves: selector_of("getReserves()"),
    token0: selector_of("token0()"),
    token1: selector_of("token1()"),
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_the_well_known_erc20_transfer_selector() {
        // 0xa9059cbb is the widely cited transfer(address,uint256) selector.
        assert_eq!(WELL_KNOWN.erc20_transfer, [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn matches_the_well_known_erc20_approve_selector() {
        assert_eq!(WELL_KNOWN.erc20_approve, [0x09, 0x5e, 0xa7, 0xb3]);
    }

    #[test]
    fn matches_the_well_known_erc721_transfer_from_selector() {
        assert_eq!(WELL_KNOWN.erc721_transfer_from, [0x23, 0xb8, 0x72, 0xdd]);
    }

    #[test]
    fn every_standard_has_a_nonempty_signature_set() {
        for standard in StandardId::all() {
            assert!(!standard.required_signatures().is_empty());
        }
    }
}
