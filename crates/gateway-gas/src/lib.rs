//! Gas & Cost Engine (C5): tiered gas quotes from base price + congestion,
//! and transaction-cost estimates.

pub mod cost;
pub mod quote;

pub use cost::{estimate, format_wei, Speed};
pub use quote::{congestion_of, quote, recommendation};
