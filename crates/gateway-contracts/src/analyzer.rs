//! Interface detection and bytecode-heuristic security flags (§4.3).

use std::collections::BTreeSet;

use alloy_primitives::{Address, Bytes};
use gateway_primitives::GatewayResult;
use gateway_rpc::EvmRpc;
use serde::{Deserialize, Serialize};

use crate::abi::{parse_abi, AbiItem, AbiItemType};
use crate::selectors::{selector_of, StandardId};

/// Bytecode-substring-derived security signals. A heuristic, not a
/// disassembler: presence of an opcode byte or a suggestively-named
/// function is a *signal*, not proof.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityFlags {
    pub external_calls: bool,
    pub self_destruct: bool,
    pub raw_send_transfer: bool,
    pub delegatecall: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractAnalysis {
    pub is_contract: bool,
    pub implements: Vec<StandardId>,
    pub functions: Vec<String>,
    pub events: Vec<String>,
    pub security: SecurityFlags,
}

/// EVM opcode bytes the security heuristic searches the raw bytecode for.
mod opcode {
    pub const CALL: u8 = 0xf1;
    pub const CALLCODE: u8 = 0xf2;
    pub const DELEGATECALL: u8 = 0xf4;
    pub const STATICCALL: u8 = 0xfa;
    pub const SELFDESTRUCT: u8 = 0xff;
}

fn bytecode_contains(bytecode: &[u8], opcode: u8) -> bool {
    bytecode.contains(&opcode)
}

fn derive_security_flags(bytecode: &[u8], abi: &[AbiItem]) -> SecurityFlags {
    let external_calls = [opcode::CALL, opcode::CALLCODE, opcode::STATICCALL]
        .iter()
        .any(|op| bytecode_contains(bytecode, *op));
    let delegatecall = bytecode_contains(bytecode, opcode::DELEGATECALL);
    let name_mentions = |needle: &str| {
        abi.iter().any(|item| item.name.to_ascii_lowercase().contains(needle))
    };
    let self_destruct = bytecode_contains(bytecode, opcode::SELFDESTRUCT)
        || name_mentions("selfdestruct")
        || name_mentions("destroy");
    // A raw `.send`/`.transfer`-style value push is a CALL opcode issued
    // by a function whose ABI name itself suggests a bare value transfer,
    // as opposed to the standard ERC20 `transfer` path (already covered
    // by `implements(ERC20)`).
    let raw_send_transfer = bytecode_contains(bytecode, opcode::CALL)
        && (name_mentions("send") || name_mentions("withdraw"));
    SecurityFlags { external_calls, self_destruct, raw_send_transfer, delegatecall }
}

fn implemented_standards(abi: &[AbiItem]) -> Vec<StandardId> {
    let declared: BTreeSet<[u8; 4]> = abi
        .iter()
        .filter(|item| matches!(item.item_type, AbiItemType::Function))
        .map(|item| selector_of(&item.signature()))
        .collect();

    StandardId::all()
        .iter()
        .copied()
        .filter(|standard| {
            standard.required_signatures().iter().all(|sig| declared.contains(&selector_of(sig)))
        })
        .collect()
}

/// Analyze a contract: is it deployed, which recognized standards does
/// its declared ABI satisfy, and what do its bytecode/ABI suggest about
/// security-relevant behavior. An address with no bytecode yields an
/// all-empty/false analysis rather than an error (§8 boundary case).
pub async fn analyze_contract(
    rpc: &dyn EvmRpc,
    address: Address,
    abi: &serde_json::Value,
) -> GatewayResult<ContractAnalysis> {
    let bytecode: Bytes = rpc.get_bytecode(address).await?;
    let is_contract = !bytecode.is_empty();

    if !is_contract {
        return Ok(ContractAnalysis {
            is_contract: false,
            implements: Vec::new(),
            functions: Vec::new(),
            events: Vec::new(),
            security: SecurityFlags::default(),
        });
    }

    let items = parse_abi(abi);
    let functions = items
        .iter()
        .filter(|i| matches!(i.item_type, AbiItemType::Function))
        .map(|i| i.name.clone())
        .collect();
    let events = items
        .iter()
        .filter(|i| matches!(i.item_type, AbiItemType::Event))
        .map(|i| i.name.clone())
        .collect();
    let implements = implemented_standards(&items);
    let security = derive_security_flags(&bytecode, &items);

    Ok(ContractAnalysis { is_contract: true, implements, functions, events, security })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, Bytes};
    use gateway_rpc::mock::MockEvmRpc;

    fn erc20_abi() -> serde_json::Value {
        serde_json::json!([
            {"type": "function", "name": "name", "inputs": []},
            {"type": "function", "name": "symbol", "inputs": []},
            {"type": "function", "name": "decimals", "inputs": []},
            {"type": "function", "name": "totalSupply", "inputs": []},
            {"type": "function", "name": "balanceOf", "inputs": [{"type": "address"}]},
            {"type": "function", "name": "transfer", "inputs": [{"type": "address"}, {"type": "uint256"}]},
            {"type": "function", "name": "transferFrom", "inputs": [{"type": "address"}, {"type": "address"}, {"type": "uint256"}]},
            {"type": "function", "name": "approve", "inputs": [{"type": "address"}, {"type": "uint256"}]},
            {"type": "function", "name": "allowance", "inputs": [{"type": "address"}, {"type": "address"}]},
            {"type": "event", "name": "Transfer", "inputs": []},
        ])
    }

    #[tokio::test]
    async fn zero_bytecode_address_is_not_a_contract() {
        let rpc = MockEvmRpc::new();
        let analysis =
            analyze_contract(&rpc, address!("0x0000000000000000000000000000000000000003"), &erc20_abi())
                .await
                .unwrap();
        assert!(!analysis.is_contract);
        assert!(analysis.implements.is_empty());
    }

    #[tokio::test]
    async fn full_erc20_abi_is_detected() {
        let addr = address!("0x0000000000000000000000000000000000000004");
        let rpc = MockEvmRpc::new().with_bytecode(addr, Bytes::from(vec![0x60, 0x80, 0x60, 0x40]));
        let analysis = analyze_contract(&rpc, addr, &erc20_abi()).await.unwrap();
        assert!(analysis.is_contract);
        assert!(analysis.implements.contains(&StandardId::Erc20));
        assert!(!analysis.implements.contains(&StandardId::Erc721));
    }

    #[tokio::test]
    async fn selfdestruct_opcode_sets_the_flag() {
        let addr = address!("0x0000000000000000000000000000000000000005");
        let rpc = MockEvmRpc::new().with_bytecode(addr, Bytes::from(vec![0x60, 0x00, 0xff]));
        let analysis = analyze_contract(&rpc, addr, &serde_json::json!([])).await.unwrap();
        assert!(analysis.security.self_destruct);
    }
}
