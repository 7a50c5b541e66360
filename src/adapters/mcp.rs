// src/adapters/mcp.rs

//! Adapter exposing the registry through the Model Context Protocol's two
//! operations: tool listing and tool invocation.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use crate::core::error::ToolkitError;
use crate::core::plugin::Plugin;
use crate::core::registry::get_tools;
use crate::core::tool::ToolDescriptor;
use crate::core::wallet::WalletClient;

/// One entry of a `tools/list` response.
#[derive(Debug, Clone, Serialize)]
pub struct ToolListing {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Registry snapshot resolved once at construction and reused by both
/// operations. There is no refresh; build a new value to pick up changes.
pub struct McpTools {
    tools: Vec<ToolDescriptor>,
}

/// Resolves the registry for the protocol server.
pub fn get_on_chain_tools(
    wallet: Arc<dyn WalletClient>,
    plugins: &[Box<dyn Plugin>],
) -> Result<McpTools, ToolkitError> {
    Ok(McpTools {
        tools: get_tools(wallet, plugins)?,
    })
}

impl McpTools {
    /// Protocol-shaped listing of every tool, parameter schemas converted to
    /// JSON Schema.
    pub fn list_of_tools(&self) -> Vec<ToolListing> {
        self.tools
            .iter()
            .map(|tool| ToolListing {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                input_schema: tool.parameters().to_json_schema(),
            })
            .collect()
    }

    /// Looks up a tool by name, validates `args`, executes, and wraps the
    /// result in a text content block.
    ///
    /// Unknown names fail with [`ToolkitError::ToolNotFound`] before any tool
    /// runs. Execution errors propagate with their original message; the
    /// stdio server maps them to JSON-RPC error responses.
    pub async fn tool_handler(&self, name: &str, args: Value) -> Result<Value, ToolkitError> {
        let tool = self
            .tools
            .iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| ToolkitError::ToolNotFound(name.to_owned()))?;

        let parsed = tool.parameters().parse(&args)?;
        let result = tool.execute(parsed).await?;
        let text =
            serde_json::to_string(&result).map_err(|e| ToolkitError::Execution(e.to_string()))?;

        Ok(json!({
            "content": [{ "type": "text", "text": text }]
        }))
    }
}
