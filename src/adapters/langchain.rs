// src/adapters/langchain.rs

//! Adapter producing structured tools for LangChain-style agents.

use std::sync::Arc;

use serde_json::Value;

use crate::core::error::ToolkitError;
use crate::core::plugin::Plugin;
use crate::core::registry::get_tools;
use crate::core::tool::ToolDescriptor;
use crate::core::wallet::WalletClient;

/// A structured tool: name, description, argument schema and a callable
/// body producing textual output.
#[derive(Debug, Clone)]
pub struct LangchainTool {
    descriptor: ToolDescriptor,
}

impl LangchainTool {
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn description(&self) -> &str {
        self.descriptor.description()
    }

    /// JSON-Schema form of the argument schema.
    pub fn schema(&self) -> Value {
        self.descriptor.parameters().to_json_schema()
    }

    /// Validates `args` against the schema, executes, and returns textual
    /// output: string results pass through verbatim, anything else is
    /// JSON-stringified.
    pub async fn call(&self, args: Value) -> Result<String, ToolkitError> {
        let parsed = self.descriptor.parameters().parse(&args)?;
        let result = self.descriptor.execute(parsed).await?;
        Ok(match result {
            Value::String(text) => text,
            other => other.to_string(),
        })
    }
}

/// Resolves the registry and wraps every descriptor as a structured tool,
/// in registry order.
pub fn get_on_chain_tools(
    wallet: Arc<dyn WalletClient>,
    plugins: &[Box<dyn Plugin>],
) -> Result<Vec<LangchainTool>, ToolkitError> {
    let tools = get_tools(wallet, plugins)?;
    Ok(tools
        .into_iter()
        .map(|descriptor| LangchainTool { descriptor })
        .collect())
}
