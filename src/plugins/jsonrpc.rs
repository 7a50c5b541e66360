// src/plugins/jsonrpc.rs

use std::sync::Arc;

use serde_json::{json, Value};

use crate::core::chain::Chain;
use crate::core::error::ToolkitError;
use crate::core::plugin::Plugin;
use crate::core::schema::{ObjectSchema, Schema};
use crate::core::tool::ToolDescriptor;
use crate::core::wallet::WalletClient;
use crate::utils::required_str;

/// Relays raw JSON-RPC calls to a configured endpoint. Chain-agnostic.
pub struct JsonRpcPlugin {
    endpoint: String,
    http: reqwest::Client,
}

impl JsonRpcPlugin {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
        }
    }
}

impl Plugin for JsonRpcPlugin {
    fn name(&self) -> &str {
        "jsonrpc"
    }

    fn supports_chain(&self, _chain: &Chain) -> bool {
        true
    }

    fn tools(&self, _wallet: Arc<dyn WalletClient>) -> Result<Vec<ToolDescriptor>, ToolkitError> {
        let schema = ObjectSchema::new()
            .field(
                "method",
                "A method supported by the JSON-RPC endpoint",
                Schema::string(),
            )
            .field(
                "params",
                "The positional parameters for the method",
                Schema::array(Schema::any()),
            )
            .optional_with_default("id", "The request id", Schema::integer(), json!(1))
            .optional_with_default(
                "jsonrpc",
                "The JSON-RPC protocol version",
                Schema::string_enum(["2.0"]),
                json!("2.0"),
            );

        let endpoint = self.endpoint.clone();
        let http = self.http.clone();
        let call = ToolDescriptor::new(
            "json_rpc_call",
            "Make a raw JSON-RPC call to the configured endpoint",
            schema,
            move |params| {
                let endpoint = endpoint.clone();
                let http = http.clone();
                Box::pin(async move {
                    let method = required_str(&params, "method")?;
                    let payload = json!({
                        "jsonrpc": params.get("jsonrpc").cloned().unwrap_or_else(|| json!("2.0")),
                        "id": params.get("id").cloned().unwrap_or_else(|| json!(1)),
                        "method": method,
                        "params": params.get("params").cloned().unwrap_or_else(|| json!([])),
                    });

                    let response: Value = http
                        .post(&endpoint)
                        .json(&payload)
                        .send()
                        .await
                        .map_err(|e| {
                            ToolkitError::Execution(format!("JSON-RPC request failed: {e}"))
                        })?
                        .json()
                        .await
                        .map_err(|e| {
                            ToolkitError::Execution(format!(
                                "JSON-RPC endpoint returned invalid JSON: {e}"
                            ))
                        })?;

                    Ok(response)
                })
            },
        )?;

        Ok(vec![call])
    }
}
