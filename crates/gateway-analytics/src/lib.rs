//! Network Analytics (C4): multi-block sampling for TPS, block time, gas
//! usage, health, cross-network comparison, growth estimation, and an
//! optional background block-event watcher.

pub mod compare;
pub mod gather;
pub mod growth;
pub mod metrics;
pub mod watch;

pub use compare::{compare, NetworkComparison};
pub use gather::{sample_block_range, sample_recent_blocks};
pub use growth::{growth, GrowthReport};
pub use metrics::{derive_metrics, network_metrics, DEFAULT_SAMPLE_SIZE};
pub use watch::{watch, BlockObserved};
