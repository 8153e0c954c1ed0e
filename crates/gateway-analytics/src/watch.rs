//! Bounded background block-event poller (§9 design notes).
//!
//! Not wired into any tool by default — no tool in the closed set (§6.3)
//! consumes live events. This exists as a library capability the binary
//! may opt into, reifying the source's callback-style `block` event
//! listener as a cancellable task over a bounded broadcast channel.

use std::time::Duration;

use gateway_rpc::RpcResolver;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

/// A single polled block, published to every subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockObserved {
    pub network: String,
    pub number: u64,
    pub timestamp: u64,
}

/// Default channel capacity: slow subscribers drop the oldest, rather
/// than the poller blocking on a full channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Spawn a task that polls `network`'s latest block every `interval` and
/// publishes a [`BlockObserved`] whenever the block number advances. The
/// task exits cleanly when `cancel` fires; in-flight RPC calls complete or
/// are abandoned on the next `tokio::select!` turn.
pub fn watch(
    resolver: std::sync::Arc<dyn RpcResolver>,
    network: String,
    interval: Duration,
    cancel: CancellationToken,
) -> broadcast::Receiver<BlockObserved> {
    let (tx, rx) = broadcast::channel(DEFAULT_CHANNEL_CAPACITY);

    tokio::spawn(async move {
        let mut last_seen: Option<u64> = None;
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(%network, "block watcher cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    match resolver.resolve(&network).await {
                        Ok((_, rpc)) => match rpc.latest_block(false).await {
                            Ok(block) => {
                                if last_seen != Some(block.number) {
                                    last_seen = Some(block.number);
                                    let observed = BlockObserved {
                                        network: network.clone(),
                                        number: block.number,
                                        timestamp: block.timestamp,
                                    };
                                    // A full channel with no subscribers is not an error.
                                    let _ = tx.send(observed);
                                }
                            }
                            Err(e) => tracing::warn!(%network, error = %e, "block watcher poll failed"),
                        },
                        Err(e) => tracing::warn!(%network, error = %e, "block watcher resolve failed"),
                    }
                }
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_primitives::BlockSample;
    use gateway_rpc::mock::{MockEvmRpc, StaticRpcResolver};
    use std::sync::Arc;
    use std::time::Duration as StdDuration;

    #[tokio::test]
    async fn publishes_on_block_advance_and_stops_on_cancel() {
        let rpc = Arc::new(
            MockEvmRpc::new().with_block(BlockSample {
                number: 1,
                timestamp: 1_700_000_000,
                gas_used: 0,
                gas_limit: 30_000_000,
                base_fee_per_gas: None,
                tx_count: 0,
                txs: None,
            }),
        );
        let resolver: Arc<dyn RpcResolver> = Arc::new(StaticRpcResolver::new().with_client("iota", rpc));
        let cancel = CancellationToken::new();
        let mut rx = watch(resolver, "iota".into(), StdDuration::from_millis(5), cancel.clone());

        let observed = tokio::time::timeout(StdDuration::from_secs(2), rx.recv()).await.unwrap().unwrap();
        assert_eq!(observed.number, 1);

        cancel.cancel();
    }
}
