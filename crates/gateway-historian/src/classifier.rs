//! Transaction classification and per-tx derived metrics (§4.6).

use gateway_contracts::selectors::WELL_KNOWN;
use gateway_primitives::{GasEfficiency, Receipt, TxLabel, TxRecord};

/// Classify a transaction by its selector / shape. Exhaustive: every
/// transaction receives exactly one label (§8).
pub fn classify(tx: &TxRecord) -> TxLabel {
    if tx.input.is_empty() {
        return TxLabel::NativeTransfer;
    }
    if let Some(selector) = tx.selector() {
        if selector == WELL_KNOWN.erc20_transfer {
            return TxLabel::Erc20Transfer;
        }
        if selector == WELL_KNOWN.erc20_approve {
            return TxLabel::TokenApproval;
        }
        if selector == WELL_KNOWN.erc721_transfer_from {
            return TxLabel::Erc721Transfer;
        }
        if selector == WELL_KNOWN.erc1155_safe_transfer_from {
            return TxLabel::Erc1155Transfer;
        }
    }
    if tx.to.is_none() {
        return TxLabel::ContractDeployment;
    }
    TxLabel::ContractInteraction
}

/// Gas efficiency bucket for a mined transaction's receipt.
pub fn gas_efficiency(receipt: &Receipt, gas_limit: u64) -> GasEfficiency {
    if gas_limit == 0 {
        return GasEfficiency::Poor;
    }
    GasEfficiency::from_ratio(receipt.gas_used as f64 / gas_limit as f64)
}

/// Human-readable age bucket: seconds / minutes / hours / days.
pub fn age_bucket(elapsed_secs: i64) -> String {
    let elapsed = elapsed_secs.max(0);
    if elapsed < 60 {
        format!("{elapsed} seconds ago")
    } else if elapsed < 3_600 {
        format!("{} minutes ago", elapsed / 60)
    } else if elapsed < 86_400 {
        format!("{} hours ago", elapsed / 3_600)
    } else {
        format!("{} days ago", elapsed / 86_400)
    }
}

/// Confirmations = latest block number − receipt block number.
pub fn confirmations(latest_block: u64, receipt_block: u64) -> u64 {
    latest_block.saturating_sub(receipt_block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, Bytes, U256};
    use gateway_primitives::{GasPrice, TxStatus};

    fn base_tx() -> TxRecord {
        TxRecord {
            hash: Default::default(),
            from: address!("0x0000000000000000000000000000000000000001"),
            to: Some(address!("0x0000000000000000000000000000000000000002")),
            value: U256::ZERO,
            gas: 21_000,
            gas_price: GasPrice::Legacy { gas_price: 1 },
            input: Bytes::new(),
            nonce: 0,
            block_number: None,
            block_timestamp: None,
            status: None,
        }
    }

    #[test]
    fn empty_input_with_value_is_native_transfer() {
        let mut tx = base_tx();
        tx.value = U256::from(1_000u64);
        assert_eq!(classify(&tx), TxLabel::NativeTransfer);
    }

    #[test]
    fn erc20_transfer_selector_is_recognized() {
        let mut tx = base_tx();
        tx.input = Bytes::from(vec![0xa9, 0x05, 0x9c, 0xbb, 0, 0, 0]);
        assert_eq!(classify(&tx), TxLabel::Erc20Transfer);
    }

    #[test]
    fn nonempty_input_with_nil_to_is_a_deployment() {
        let mut tx = base_tx();
        tx.to = None;
        tx.input = Bytes::from(vec![0x60, 0x80, 0x60, 0x40, 0x52]);
        assert_eq!(classify(&tx), TxLabel::ContractDeployment);
    }

    #[test]
    fn unrecognized_selector_with_a_target_is_contract_interaction() {
        let mut tx = base_tx();
        tx.input = Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(classify(&tx), TxLabel::ContractInteraction);
    }

    #[test]
    fn age_bucket_boundaries() {
        assert_eq!(age_bucket(12), "12 seconds ago");
        assert_eq!(age_bucket(120), "2 minutes ago");
        assert_eq!(age_bucket(7_200), "2 hours ago");
        assert_eq!(age_bucket(172_800), "2 days ago");
    }

    #[test]
    fn gas_efficiency_buckets() {
        let receipt = |gas_used: u128| Receipt {
            gas_used,
            block_number: 1,
            status: TxStatus::Success,
            logs: vec![],
            contract_address: None,
        };
        assert_eq!(gas_efficiency(&receipt(59), 100), GasEfficiency::Excellent);
        assert_eq!(gas_efficiency(&receipt(79), 100), GasEfficiency::Good);
        assert_eq!(gas_efficiency(&receipt(94), 100), GasEfficiency::Fair);
        assert_eq!(gas_efficiency(&receipt(95), 100), GasEfficiency::Poor);
    }
}
