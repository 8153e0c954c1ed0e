//! Bounded backward block-window scan (§4.6). Lacking an indexer, this is
//! a *scanner lower bound*, never a full history: up to 50 most recent
//! blocks, fetched in batches of 5 with full transactions, at most 10
//! transactions inspected per block.

use futures::stream::{self, StreamExt};
use gateway_primitives::{GatewayResult, ScanWindow, TxRecord, TxRef};
use gateway_rpc::EvmRpc;

pub const MAX_BLOCKS: u64 = 50;
pub const BATCH_CONCURRENCY: usize = 5;
pub const MAX_TXS_PER_BLOCK: usize = 10;

/// Scan up to [`MAX_BLOCKS`] most recent blocks and return every inspected
/// transaction alongside the window's provenance metadata.
pub async fn scan_recent(rpc: &dyn EvmRpc) -> GatewayResult<(Vec<TxRecord>, ScanWindow)> {
    let latest = rpc.block_number().await?;
    let start = latest.saturating_sub(MAX_BLOCKS - 1);
    let numbers: Vec<u64> = (start..=latest).collect();

    let fetched: Vec<_> = stream::iter(numbers)
        .map(|n| async move { (n, rpc.block_by_number(n, true).await) })
        .buffer_unordered(BATCH_CONCURRENCY)
        .collect()
        .await;

    let mut blocks_scanned = 0usize;
    let mut txs = Vec::new();
    let mut min_block = None;
    let mut max_block = None;

    for (number, result) in fetched {
        let Ok(Some(block)) = result else { continue };
        blocks_scanned += 1;
        min_block = Some(min_block.map_or(number, |m: u64| m.min(number)));
        max_block = Some(max_block.map_or(number, |m: u64| m.max(number)));

        let Some(inline_txs) = block.txs else { continue };
        for tx_ref in inline_txs.into_iter().take(MAX_TXS_PER_BLOCK) {
            if let TxRef::Inline(tx) = tx_ref {
                txs.push(*tx);
            }
        }
    }

    let window = ScanWindow {
        from_block: min_block.unwrap_or(start),
        to_block: max_block.unwrap_or(latest),
        blocks_scanned,
        txs_inspected: txs.len(),
        cap: MAX_TXS_PER_BLOCK,
    };

    Ok((txs, window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, Bytes, U256};
    use gateway_primitives::{BlockSample, GasPrice};
    use gateway_rpc::mock::MockEvmRpc;

    fn tx(hash_byte: u8) -> TxRecord {
        TxRecord {
            hash: alloy_primitives::B256::repeat_byte(hash_byte),
            from: address!("0x0000000000000000000000000000000000000001"),
            to: Some(address!("0x0000000000000000000000000000000000000002")),
            value: U256::ZERO,
            gas: 21_000,
            gas_price: GasPrice::Legacy { gas_price: 1 },
            input: Bytes::new(),
            nonce: 0,
            block_number: Some(1),
            block_timestamp: Some(1_700_000_000),
            status: None,
        }
    }

    #[tokio::test]
    async fn truncates_to_ten_transactions_per_block() {
        let txs = (0..20u8).map(|i| TxRef::Inline(Box::new(tx(i)))).collect();
        let rpc = MockEvmRpc::new().with_block(BlockSample {
            number: 1,
            timestamp: 1_700_000_000,
            gas_used: 0,
            gas_limit: 30_000_000,
            base_fee_per_gas: None,
            tx_count: 20,
            txs: Some(txs),
        });
        let (inspected, window) = scan_recent(&rpc).await.unwrap();
        assert_eq!(inspected.len(), 10);
        assert_eq!(window.txs_inspected, 10);
        assert_eq!(window.cap, 10);
        assert_eq!(window.blocks_scanned, 1);
    }
}
