//! Chain Registry and Pool Registry.

pub mod chain;
pub mod placeholder;
pub mod pool;

pub use chain::{ChainRegistry, SIBLING_CHAIN_IDS, SIBLING_SHORT_NAMES};
pub use placeholder::{DefiDataProvider, LendingMarketInfo, PlaceholderDefiProvider, StakingInfo};
pub use pool::PoolRegistry;
