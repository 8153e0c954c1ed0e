//! Ephemeral and registry record types.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// Which sibling-family role a network plays, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SiblingVariant {
    Mainnet,
    Testnet,
    AltMainnet,
    None,
}

/// A network's native coin: name, symbol, and decimals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenDescriptor {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Immutable, process-lifetime network descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescriptor {
    pub short_name: String,
    pub chain_id: u64,
    pub display_name: String,
    pub native_token: TokenDescriptor,
    pub default_rpc_url: String,
    pub explorer_url: String,
    pub is_sibling_family: bool,
    pub sibling_variant: SiblingVariant,
}

/// Either a bare transaction hash or an inlined full transaction, as
/// returned by `eth_getBlockByNumber` depending on the `hydrate` flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TxRef {
    Hash(B256),
    Inline(Box<TxRecord>),
}

/// A sampled block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSample {
    pub number: u64,
    pub timestamp: u64,
    pub gas_used: u64,
    pub gas_limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_fee_per_gas: Option<u64>,
    pub tx_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txs: Option<Vec<TxRef>>,
}

/// Status of a confirmed transaction/receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxStatus {
    Success,
    Reverted,
}

/// Gas price as either a legacy single price or an EIP-1559 fee pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GasPrice {
    Legacy { gas_price: u128 },
    Eip1559 { max_fee_per_gas: u128, max_priority_fee_per_gas: u128 },
}

impl GasPrice {
    /// The price that is actually comparable across tiers / used for cost
    /// estimates: `gasPrice` for legacy, `maxFeePerGas` for EIP-1559.
    pub fn effective(&self) -> u128 {
        match self {
            GasPrice::Legacy { gas_price } => *gas_price,
            GasPrice::Eip1559 { max_fee_per_gas, .. } => *max_fee_per_gas,
        }
    }
}

/// A transaction record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxRecord {
    pub hash: B256,
    pub from: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    pub value: U256,
    pub gas: u64,
    pub gas_price: GasPrice,
    pub input: Bytes,
    pub nonce: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_timestamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TxStatus>,
}

impl TxRecord {
    /// The first four bytes of `input`, i.e. the function selector. `None`
    /// for a plain value transfer (empty input).
    pub fn selector(&self) -> Option<[u8; 4]> {
        if self.input.len() < 4 {
            return None;
        }
        let mut sel = [0u8; 4];
        sel.copy_from_slice(&self.input[..4]);
        Some(sel)
    }

    /// `true` if this transaction deploys a contract (`to` absent).
    pub fn is_deployment(&self) -> bool {
        self.to.is_none()
    }
}

/// A log entry inside a receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
}

/// A transaction receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub gas_used: u128,
    pub block_number: u64,
    pub status: TxStatus,
    pub logs: Vec<LogEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<Address>,
}

/// Congestion tier derived from a single block's gas-used ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Congestion {
    Low,
    Medium,
    High,
}

/// A tiered gas quote. Units are native-token wei.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasQuote {
    pub base: u128,
    pub slow: u128,
    pub standard: u128,
    pub fast: u128,
    pub instant: u128,
    pub congestion: Congestion,
    pub taken_at: i64,
}

/// Cost estimate for a transaction of a given gas limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub gas_limit: u128,
    pub gas_price: u128,
    pub total_wei: U256,
    pub total_formatted: String,
    /// USD conversion is stubbed throughout the source.
    pub usd_equivalent: Option<f64>,
}

/// Native-token snapshot of a registry entry, as returned by the
/// `get_*_network_info` tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMetrics {
    pub network: String,
    pub block_height: u64,
    pub sample_size: usize,
    pub avg_block_time_s: f64,
    pub avg_tx_per_block: f64,
    pub recent_tps: f64,
    pub avg_gas_used: f64,
    pub utilization_pct: f64,
    pub gas_price_wei: u128,
    pub healthy: bool,
    pub token_info: TokenDescriptor,
}

/// Provenance metadata for a scan-window-derived aggregate. The window is a
/// lower bound on an address's real activity, not a full on-chain history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanWindow {
    pub from_block: u64,
    pub to_block: u64,
    pub blocks_scanned: usize,
    pub txs_inspected: usize,
    pub cap: usize,
}

/// Address-level aggregate derived from a bounded scan window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressMetrics {
    pub address: Address,
    pub tx_count: u64,
    pub sent: u64,
    pub received: u64,
    pub total_sent: U256,
    pub total_received: U256,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_age_s: Option<i64>,
    pub window: ScanWindow,
}

/// One side (buy or sell) of a directed arbitrage pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbQuoteSide {
    pub network: String,
    pub price: f64,
    pub dex: String,
    pub liquidity: f64,
}

/// A directed, profitable arbitrage opportunity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbitragePair {
    pub token: String,
    pub base_token: String,
    pub buy: ArbQuoteSide,
    pub sell: ArbQuoteSide,
    pub profit_pct: f64,
    pub bridging_required: bool,
    pub taken_at: i64,
}

/// A single network's raw quote for a token, prior to pairing (internal to
/// `gateway-arbitrage`, exposed for testability).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenQuote {
    pub network: String,
    pub symbol: String,
    pub base_symbol: String,
    pub price_in_base: f64,
    pub liquidity: f64,
    pub dex: String,
}

/// Static per-token pool registry entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolRegistryEntry {
    pub pair_address: Address,
    pub dex_name: String,
    pub bridged_from_canonical: bool,
}

/// Semantic label assigned to a transaction by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxLabel {
    NativeTransfer,
    Erc20Transfer,
    TokenApproval,
    Erc721Transfer,
    Erc1155Transfer,
    ContractDeployment,
    ContractInteraction,
}

impl TxLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxLabel::NativeTransfer => "Native Token Transfer",
            TxLabel::Erc20Transfer => "ERC20 Transfer",
            TxLabel::TokenApproval => "Token Approval",
            TxLabel::Erc721Transfer => "ERC721 Transfer",
            TxLabel::Erc1155Transfer => "ERC1155 Transfer",
            TxLabel::ContractDeployment => "Contract Deployment",
            TxLabel::ContractInteraction => "Contract Interaction",
        }
    }
}

/// Qualitative gas-efficiency bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GasEfficiency {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl GasEfficiency {
    pub fn from_ratio(used_over_limit: f64) -> Self {
        if used_over_limit < 0.60 {
            GasEfficiency::Excellent
        } else if used_over_limit < 0.80 {
            GasEfficiency::Good
        } else if used_over_limit < 0.95 {
            GasEfficiency::Fair
        } else {
            GasEfficiency::Poor
        }
    }
}
