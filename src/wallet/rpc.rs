// src/wallet/rpc.rs

//! Thin JSON-RPC client over HTTP for talking to an EVM node.

use ethers_core::types::U256;
use serde_json::{json, Value};

use crate::core::error::ToolkitError;

/// One node endpoint plus a reusable HTTP client.
#[derive(Debug, Clone)]
pub struct RpcClient {
    url: String,
    http: reqwest::Client,
}

impl RpcClient {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends one JSON-RPC call and returns its `result` field. A populated
    /// `error` field fails the call with the node's message.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, ToolkitError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1,
        });

        let response: Value = self
            .http
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ToolkitError::Execution(format!("{method} request failed: {e}")))?
            .json()
            .await
            .map_err(|e| ToolkitError::Execution(format!("{method} returned invalid JSON: {e}")))?;

        if let Some(err) = response.get("error") {
            return Err(ToolkitError::Execution(format!(
                "RPC error from {method}: {err}"
            )));
        }

        Ok(response.get("result").cloned().unwrap_or(Value::Null))
    }
}

/// Decodes a `0x`-prefixed hex quantity result.
pub fn hex_quantity(value: &Value, what: &str) -> Result<U256, ToolkitError> {
    let hex = value
        .as_str()
        .ok_or_else(|| ToolkitError::Execution(format!("{what}: expected hex string result")))?;
    U256::from_str_radix(hex.trim_start_matches("0x"), 16)
        .map_err(|e| ToolkitError::Execution(format!("{what}: invalid hex quantity '{hex}': {e}")))
}
