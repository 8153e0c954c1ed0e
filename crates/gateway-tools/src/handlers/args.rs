//! Small JSON-argument extraction helpers shared by every handler. Schema
//! validation has already run by the time a handler sees `args`
//! ([`crate::dispatcher::Dispatcher::invoke_tool`]), so these only need to
//! turn an already-well-typed `Value` into a domain type.

use alloy_primitives::{Address, Bytes, B256, U256};
use gateway_primitives::{GatewayError, GatewayResult};
use serde_json::Value;

pub fn str_field<'a>(args: &'a Value, name: &str) -> GatewayResult<&'a str> {
    args.get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| GatewayError::validation(format!("missing required field '{name}'")))
}

pub fn str_opt<'a>(args: &'a Value, name: &str) -> Option<&'a str> {
    args.get(name).and_then(Value::as_str)
}

pub fn num_opt(args: &Value, name: &str) -> Option<f64> {
    args.get(name).and_then(Value::as_f64)
}

pub fn address_field(args: &Value, name: &str) -> GatewayResult<Address> {
    let raw = str_field(args, name)?;
    raw.parse::<Address>().map_err(|_| GatewayError::validation(format!("'{name}' is not a valid address")))
}

pub fn u256_field(args: &Value, name: &str) -> GatewayResult<U256> {
    let raw = str_field(args, name)?;
    raw.parse::<U256>().map_err(|_| GatewayError::validation(format!("'{name}' is not a valid integer")))
}

pub fn u256_opt(args: &Value, name: &str) -> GatewayResult<Option<U256>> {
    match str_opt(args, name) {
        Some(raw) => {
            Ok(Some(raw.parse::<U256>().map_err(|_| GatewayError::validation(format!("'{name}' is not a valid integer")))?))
        }
        None => Ok(None),
    }
}

pub fn u128_field(args: &Value, name: &str) -> GatewayResult<u128> {
    let raw = str_field(args, name)?;
    raw.parse::<u128>().map_err(|_| GatewayError::validation(format!("'{name}' is not a valid integer")))
}

pub fn u128_opt(args: &Value, name: &str) -> GatewayResult<Option<u128>> {
    match str_opt(args, name) {
        Some(raw) => Ok(Some(raw.parse::<u128>().map_err(|_| GatewayError::validation(format!("'{name}' is not a valid integer")))?)),
        None => Ok(None),
    }
}

pub fn hash_field(args: &Value, name: &str) -> GatewayResult<B256> {
    let raw = str_field(args, name)?;
    raw.parse::<B256>().map_err(|_| GatewayError::validation(format!("'{name}' is not a valid transaction hash")))
}

pub fn bytes_field(args: &Value, name: &str) -> GatewayResult<Bytes> {
    let raw = str_field(args, name)?;
    raw.parse::<Bytes>().map_err(|_| GatewayError::validation(format!("'{name}' is not valid hex")))
}

pub fn bytes_opt(args: &Value, name: &str) -> GatewayResult<Bytes> {
    match str_opt(args, name) {
        Some(raw) => raw.parse::<Bytes>().map_err(|_| GatewayError::validation(format!("'{name}' is not valid hex"))),
        None => Ok(Bytes::new()),
    }
}

pub fn str_array_opt(args: &Value, name: &str) -> Vec<String> {
    args.get(name)
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}
