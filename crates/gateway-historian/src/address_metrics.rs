//! Per-address aggregate derived from the bounded scan window (§4.6).
//!
//! Because the scan window is a lower bound, the emitted record always
//! carries the window's provenance (§4.6 "MUST carry the sampled-window
//! metadata") so callers cannot mistake it for a lifetime figure.

use alloy_primitives::{Address, U256};
use gateway_primitives::{AddressMetrics, ScanWindow, TxRecord};

/// Aggregate `txs` (already scoped to a [`ScanWindow`]) for `address`.
/// Zero matching transactions yields zero counts and `None` timestamps
/// (§8 boundary case), not an error.
pub fn aggregate(address: Address, txs: &[TxRecord], window: ScanWindow, now: i64) -> AddressMetrics {
    let mut sent = 0u64;
    let mut received = 0u64;
    let mut total_sent = U256::ZERO;
    let mut total_received = U256::ZERO;
    let mut first_seen: Option<i64> = None;
    let mut last_seen: Option<i64> = None;
    let mut touched = std::collections::HashSet::new();

    for tx in txs {
        let is_sender = tx.from == address;
        let is_receiver = tx.to == Some(address);
        if !is_sender && !is_receiver {
            continue;
        }
        touched.insert(tx.hash);
        if is_sender {
            sent += 1;
            total_sent += tx.value;
        }
        if is_receiver {
            received += 1;
            total_received += tx.value;
        }
        if let Some(ts) = tx.block_timestamp {
            let ts = ts as i64;
            first_seen = Some(first_seen.map_or(ts, |f| f.min(ts)));
            last_seen = Some(last_seen.map_or(ts, |l| l.max(ts)));
        }
    }

    let account_age_s = first_seen.map(|f| (now - f).max(0));

    AddressMetrics {
        address,
        tx_count: touched.len() as u64,
        sent,
        received,
        total_sent,
        total_received,
        first_seen,
        last_seen,
        account_age_s,
        window,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, Bytes, B256};
    use gateway_primitives::GasPrice;

    fn window() -> ScanWindow {
        ScanWindow { from_block: 1, to_block: 50, blocks_scanned: 50, txs_inspected: 2, cap: 10 }
    }

    fn tx(hash: u8, from: Address, to: Option<Address>, value: u64, ts: u64) -> TxRecord {
        TxRecord {
            hash: B256::repeat_byte(hash),
            from,
            to,
            value: U256::from(value),
            gas: 21_000,
            gas_price: GasPrice::Legacy { gas_price: 1 },
            input: Bytes::new(),
            nonce: 0,
            block_number: Some(1),
            block_timestamp: Some(ts),
            status: None,
        }
    }

    #[test]
    fn zero_matching_txs_yields_zero_counts_and_nil_timestamps() {
        let addr = address!("0x0000000000000000000000000000000000000009");
        let other_a = address!("0x0000000000000000000000000000000000000001");
        let other_b = address!("0x0000000000000000000000000000000000000002");
        let txs = vec![tx(1, other_a, Some(other_b), 100, 1_700_000_000)];
        let m = aggregate(addr, &txs, window(), 1_700_000_100);
        assert_eq!(m.tx_count, 0);
        assert_eq!(m.sent, 0);
        assert_eq!(m.received, 0);
        assert!(m.first_seen.is_none());
        assert!(m.account_age_s.is_none());
    }

    #[test]
    fn sums_sent_and_received_separately() {
        let addr = address!("0x0000000000000000000000000000000000000009");
        let other = address!("0x0000000000000000000000000000000000000001");
        let txs = vec![
            tx(1, addr, Some(other), 100, 1_700_000_000),
            tx(2, other, Some(addr), 50, 1_700_000_010),
        ];
        let m = aggregate(addr, &txs, window(), 1_700_000_100);
        assert_eq!(m.tx_count, 2);
        assert_eq!(m.sent, 1);
        assert_eq!(m.received, 1);
        assert_eq!(m.total_sent, U256::from(100u64));
        assert_eq!(m.total_received, U256::from(50u64));
        assert_eq!(m.first_seen, Some(1_700_000_000));
        assert_eq!(m.last_seen, Some(1_700_000_010));
        assert_eq!(m.account_age_s, Some(100));
    }

    #[test]
    fn self_transfer_counts_once_for_tx_count() {
        let addr = address!("0x0000000000000000000000000000000000000009");
        let txs = vec![tx(1, addr, Some(addr), 10, 1_700_000_000)];
        let m = aggregate(addr, &txs, window(), 1_700_000_000);
        assert_eq!(m.tx_count, 1);
        assert_eq!(m.sent, 1);
        assert_eq!(m.received, 1);
    }
}
