//! Minimal ABI JSON model: just enough of the standard Solidity ABI JSON
//! shape to compute selectors and enumerate function/event names. Anything
//! else in a real ABI document (constructor, fallback, receive) is parsed
//! but ignored by the detector.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbiItemType {
    Function,
    Event,
    Constructor,
    Fallback,
    Receive,
    Error,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiInput {
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiItem {
    #[serde(rename = "type")]
    pub item_type: AbiItemType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiInput>,
}

impl AbiItem {
    /// The canonical `name(type,type,...)` signature, as used for selector
    /// computation — not valid for constructors/fallback/receive, which
    /// have no name.
    pub fn signature(&self) -> String {
        let types = self.inputs.iter().map(|i| i.ty.as_str()).collect::<Vec<_>>().join(",");
        format!("{}({})", self.name, types)
    }
}

/// Parse a `serde_json::Value` ABI array, skipping entries that fail to
/// deserialize rather than rejecting the whole document — a real-world ABI
/// dump often carries vendor extensions the detector doesn't need.
pub fn parse_abi(value: &serde_json::Value) -> Vec<AbiItem> {
    let Some(array) = value.as_array() else { return Vec::new() };
    array.iter().filter_map(|v| serde_json::from_value(v.clone()).ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_erc20_abi() {
        let abi = serde_json::json!([
            {"type": "function", "name": "balanceOf", "inputs": [{"type": "address"}]},
            {"type": "event", "name": "Transfer", "inputs": [{"type": "address"}, {"type": "address"}, {"type": "uint256"}]},
        ]);
        let items = parse_abi(&abi);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].signature(), "balanceOf(address)");
    }

    #[test]
    fn skips_unparseable_entries_instead_of_failing() {
        let abi = serde_json::json!([
            {"type": "function", "name": "ok", "inputs": []},
            {"type": "nonsense-vendor-extension"},
        ]);
        let items = parse_abi(&abi);
        assert_eq!(items.len(), 1);
    }
}
