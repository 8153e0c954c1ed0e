//! Token & Contract Reader (C3): standard fungible metadata, interface
//! detection against a declared ABI, and bytecode-heuristic security
//! flags.

pub mod abi;
pub mod analyzer;
pub mod reader;
pub mod selectors;

pub use analyzer::{analyze_contract, ContractAnalysis, SecurityFlags};
pub use reader::{
    decode_address, decode_uint256, decode_uint256_at, read_fungible_metadata, read_token_balance,
    read_wrapper_or_native, FungibleMetadata,
};
pub use selectors::StandardId;
