// src/core/plugin.rs

use std::sync::Arc;

use super::chain::Chain;
use super::error::ToolkitError;
use super::tool::ToolDescriptor;
use super::wallet::WalletClient;

/// A named bundle of tool descriptors gated by a chain predicate.
///
/// Plugins perform no network I/O at construction or registration; anything
/// that touches the network lives inside individual tool bodies.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    /// Pure predicate deciding whether this plugin's tools apply to `chain`.
    /// Must not fail, even for chains the plugin has never heard of.
    fn supports_chain(&self, chain: &Chain) -> bool;

    /// Builds this plugin's descriptors, parameterized by the wallet.
    fn tools(&self, wallet: Arc<dyn WalletClient>) -> Result<Vec<ToolDescriptor>, ToolkitError>;
}
