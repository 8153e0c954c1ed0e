//! Arbitrage Engine (C7): per-network pool-reserve quoting and directed
//! cross-chain opportunity enumeration.

pub mod engine;
pub mod quote;

pub use engine::{enumerate_opportunities, find_arbitrage_opportunities, quote_all, DEFAULT_MIN_PROFIT_PCT};
pub use quote::quote_network;
