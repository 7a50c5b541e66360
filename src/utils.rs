//! Helpers for pulling typed values out of validated tool parameters.

use serde_json::Value;

use crate::core::error::ToolkitError;

/// Extracts a required string argument. Parameters have already passed the
/// tool schema, so absence indicates a schema/body mismatch and is reported
/// as an execution error rather than a validation one.
pub fn required_str(params: &Value, key: &str) -> Result<String, ToolkitError> {
    params
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| ToolkitError::Execution(format!("missing '{key}' in validated parameters")))
}

pub fn optional_str(params: &Value, key: &str) -> Option<String> {
    params.get(key).and_then(Value::as_str).map(str::to_owned)
}

pub fn optional_u64(params: &Value, key: &str) -> Option<u64> {
    params.get(key).and_then(Value::as_u64)
}

pub fn optional_bool(params: &Value, key: &str) -> Option<bool> {
    params.get(key).and_then(Value::as_bool)
}
