//! Batched block sampling (§4.4, §5): blocks are fetched in groups of at
//! most 5 concurrent RPC reads; a failing batch member's slot is simply
//! dropped rather than failing the whole gather.

use futures::stream::{self, StreamExt};
use gateway_primitives::{BlockSample, GatewayResult};
use gateway_rpc::EvmRpc;

/// Maximum number of concurrent in-flight block reads per gather.
pub const BATCH_CONCURRENCY: usize = 5;

/// Sample up to `count` of the most recent blocks (fewer if the chain is
/// shorter than `count`), sorted by timestamp ascending (§5 ordering
/// guarantee). Individual block fetch failures are tolerated: the result
/// is computed over whatever was obtained.
pub async fn sample_recent_blocks(rpc: &dyn EvmRpc, count: usize) -> GatewayResult<Vec<BlockSample>> {
    let latest = rpc.block_number().await?;
    let count = count.max(1) as u64;
    let start = latest.saturating_sub(count - 1);
    let numbers: Vec<u64> = (start..=latest).collect();
    sample_block_range(rpc, numbers).await
}

/// Sample an explicit, arbitrary set of block numbers with the same
/// batched, fault-tolerant policy. Used by `growth` to sample a window
/// around a historical block.
pub async fn sample_block_range(rpc: &dyn EvmRpc, numbers: Vec<u64>) -> GatewayResult<Vec<BlockSample>> {
    let results: Vec<_> = stream::iter(numbers)
        .map(|n| async move { rpc.block_by_number(n, false).await })
        .buffer_unordered(BATCH_CONCURRENCY)
        .collect()
        .await;

    let mut blocks: Vec<BlockSample> =
        results.into_iter().filter_map(|r| r.ok().flatten()).collect();
    blocks.sort_by_key(|b| b.timestamp);
    Ok(blocks)
}
