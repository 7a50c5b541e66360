// src/core/registry.rs

//! Registry resolution: the full ordered tool list for one wallet/plugin
//! combination.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::warn;

use super::error::ToolkitError;
use super::plugin::Plugin;
use super::tool::ToolDescriptor;
use super::wallet::WalletClient;

/// Resolves the ordered tool list: wallet core tools first, then each
/// supporting plugin's tools in input order, each plugin's own ordering
/// preserved.
///
/// Recomputed on every call; no shared mutable state. A plugin that does not
/// support the wallet chain is skipped entirely with a logged warning, and
/// its `tools()` is never invoked. Duplicate tool names across sources fail
/// resolution rather than silently colliding.
pub fn get_tools(
    wallet: Arc<dyn WalletClient>,
    plugins: &[Box<dyn Plugin>],
) -> Result<Vec<ToolDescriptor>, ToolkitError> {
    let chain = wallet.chain();
    let mut tools = wallet.core_tools(wallet.clone())?;

    for plugin in plugins {
        if !plugin.supports_chain(&chain) {
            warn!(
                plugin = plugin.name(),
                chain_type = chain.chain_type(),
                chain_id = chain.id(),
                "plugin does not support the wallet chain, skipping"
            );
            continue;
        }
        tools.extend(plugin.tools(wallet.clone())?);
    }

    let mut seen = HashSet::new();
    for tool in &tools {
        if !seen.insert(tool.name().to_owned()) {
            return Err(ToolkitError::DuplicateTool(tool.name().to_owned()));
        }
    }

    Ok(tools)
}
