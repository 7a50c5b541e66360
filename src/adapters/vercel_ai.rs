// src/adapters/vercel_ai.rs

//! Adapter producing the name-to-tool mapping Vercel-AI-style hosts consume.
//!
//! The host framework validates arguments against the attached schema before
//! calling `execute`, so this adapter does not validate again.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::core::error::ToolkitError;
use crate::core::plugin::Plugin;
use crate::core::registry::get_tools;
use crate::core::tool::ToolDescriptor;
use crate::core::wallet::WalletClient;

/// A tool in the framework's calling contract: description, parameter
/// schema, and an execute body returning the raw result value.
#[derive(Debug, Clone)]
pub struct AiTool {
    descriptor: ToolDescriptor,
}

impl AiTool {
    pub fn description(&self) -> &str {
        self.descriptor.description()
    }

    /// JSON-Schema form of the parameter schema, attached for the host's
    /// validation step.
    pub fn parameters(&self) -> Value {
        self.descriptor.parameters().to_json_schema()
    }

    /// Runs the tool with host-validated arguments.
    pub async fn execute(&self, args: Value) -> Result<Value, ToolkitError> {
        self.descriptor.execute(args).await
    }
}

/// Resolves the registry and maps every descriptor to a framework tool,
/// keyed by tool name.
pub fn get_on_chain_tools(
    wallet: Arc<dyn WalletClient>,
    plugins: &[Box<dyn Plugin>],
) -> Result<HashMap<String, AiTool>, ToolkitError> {
    let tools = get_tools(wallet, plugins)?;
    Ok(tools
        .into_iter()
        .map(|descriptor| (descriptor.name().to_owned(), AiTool { descriptor }))
        .collect())
}
