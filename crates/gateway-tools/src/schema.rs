//! Typed tool-argument schemas (§4.8, §9 "typed schema records... enum-like
//! string parameters"), validated before a handler ever sees the
//! arguments.

use gateway_primitives::{GatewayError, GatewayResult};
use serde_json::Value;

/// The semantic type of a single tool argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    Num,
    Bool,
    Enum(&'static [&'static str]),
    StrArray,
    JsonArray,
}

/// One argument in a [`ToolSchema`].
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl Field {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: true }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: false }
    }
}

/// The declared argument shape for one tool.
#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub fields: &'static [Field],
}

impl ToolSchema {
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }

    fn check_kind(name: &str, kind: FieldKind, value: &Value) -> GatewayResult<()> {
        let ok = match kind {
            FieldKind::Str => value.is_string(),
            FieldKind::Num => value.is_number(),
            FieldKind::Bool => value.is_boolean(),
            FieldKind::Enum(variants) => {
                value.as_str().map(|s| variants.contains(&s)).unwrap_or(false)
            }
            FieldKind::StrArray => value.as_array().map(|a| a.iter().all(|v| v.is_string())).unwrap_or(false),
            FieldKind::JsonArray => value.is_array(),
        };
        if ok {
            Ok(())
        } else {
            Err(GatewayError::validation(format!("field '{name}' does not match its declared type")))
        }
    }

    /// Walk `args`: every required field must be present and well-typed;
    /// every present optional field must be well-typed; unknown top-level
    /// keys are rejected.
    pub fn validate(&self, args: &Value) -> GatewayResult<()> {
        let obj = args.as_object().ok_or_else(|| GatewayError::validation("arguments must be a JSON object"))?;

        for known in self.fields {
            match obj.get(known.name) {
                Some(value) => Self::check_kind(known.name, known.kind, value)?,
                None if known.required => {
                    return Err(GatewayError::validation(format!("missing required field '{}'", known.name)))
                }
                None => {}
            }
        }

        let known_names: Vec<&str> = self.fields.iter().map(|f| f.name).collect();
        for key in obj.keys() {
            if !known_names.contains(&key.as_str()) {
                return Err(GatewayError::validation(format!("unknown field '{key}'")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCHEMA: ToolSchema = ToolSchema::new(&[
        Field::required("address", FieldKind::Str),
        Field::optional("network", FieldKind::Str),
        Field::optional("speed", FieldKind::Enum(&["slow", "standard", "fast", "instant"])),
    ]);

    #[test]
    fn accepts_a_valid_argument_set() {
        assert!(SCHEMA.validate(&json!({"address": "0xabc", "network": "iota"})).is_ok());
    }

    #[test]
    fn rejects_a_missing_required_field() {
        assert!(SCHEMA.validate(&json!({"network": "iota"})).is_err());
    }

    #[test]
    fn rejects_an_unknown_top_level_key() {
        assert!(SCHEMA.validate(&json!({"address": "0xabc", "bogus": 1})).is_err());
    }

    #[test]
    fn rejects_an_out_of_range_enum_value() {
        assert!(SCHEMA.validate(&json!({"address": "0xabc", "speed": "warp"})).is_err());
    }

    #[test]
    fn optional_fields_may_be_omitted() {
        assert!(SCHEMA.validate(&json!({"address": "0xabc"})).is_ok());
    }
}
