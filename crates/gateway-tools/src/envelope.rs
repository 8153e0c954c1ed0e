//! Result envelopes returned to the AI client (§4.8, §6.2).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single content block. The core only ever emits `"text"` blocks
/// (JSON-encoded results or error messages) — richer content types are a
/// transport-layer concern, out of scope here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl ContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        Self { kind: "text".to_string(), text: text.into() }
    }
}

/// The tool-call result envelope (§4.8): `{content, isError?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ContentItem>,
    #[serde(rename = "isError", skip_serializing_if = "is_false")]
    pub is_error: bool,
}

fn is_false(b: &bool) -> bool {
    !b
}

impl ToolResult {
    pub fn ok(value: Value) -> Self {
        Self { content: vec![ContentItem::text(value.to_string())], is_error: false }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { content: vec![ContentItem::text(message.into())], is_error: true }
    }
}

/// A single bound resource read, `{uri, text}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceContent {
    pub uri: String,
    pub text: String,
}

/// The resource-read result envelope (§4.8): `{contents}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceResult {
    pub contents: Vec<ResourceContent>,
}

impl ResourceResult {
    pub fn ok(uri: impl Into<String>, value: Value) -> Self {
        Self { contents: vec![ResourceContent { uri: uri.into(), text: value.to_string() }] }
    }
}
