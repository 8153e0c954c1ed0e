//! Address & Tx Historian (C6): bounded-window scanning, per-address
//! aggregation, and transaction classification.

pub mod address_metrics;
pub mod classifier;
pub mod scanner;

pub use address_metrics::aggregate;
pub use classifier::{age_bucket, classify, confirmations, gas_efficiency};
pub use scanner::{scan_recent, BATCH_CONCURRENCY, MAX_BLOCKS, MAX_TXS_PER_BLOCK};
