// src/plugins/send_eth.rs

use std::sync::Arc;

use ethers::utils::parse_ether;
use serde_json::json;

use crate::core::chain::Chain;
use crate::core::error::ToolkitError;
use crate::core::plugin::Plugin;
use crate::core::schema::{ObjectSchema, Schema};
use crate::core::tool::ToolDescriptor;
use crate::core::wallet::{EvmTransaction, WalletClient};
use crate::utils::required_str;

/// Sends the chain's native token from the wallet account.
#[derive(Debug, Default)]
pub struct SendEthPlugin;

impl SendEthPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for SendEthPlugin {
    fn name(&self) -> &str {
        "send_eth"
    }

    fn supports_chain(&self, chain: &Chain) -> bool {
        matches!(chain, Chain::Evm { .. })
    }

    fn tools(&self, wallet: Arc<dyn WalletClient>) -> Result<Vec<ToolDescriptor>, ToolkitError> {
        let schema = ObjectSchema::new()
            .field("to", "The address to send ETH to", Schema::string())
            .field(
                "amount",
                "The amount of ETH to send, as a decimal string",
                Schema::string(),
            );

        let send = ToolDescriptor::new(
            "send_eth",
            "Send ETH to an address",
            schema,
            move |params| {
                let wallet = wallet.clone();
                Box::pin(async move {
                    let to = required_str(&params, "to")?;
                    let amount = required_str(&params, "amount")?;
                    let value = parse_ether(&amount).map_err(|e| {
                        ToolkitError::Execution(format!("invalid ETH amount '{amount}': {e}"))
                    })?;
                    let summary = wallet
                        .send_transaction(EvmTransaction {
                            to,
                            value,
                            data: None,
                        })
                        .await?;
                    Ok(json!({ "hash": summary.hash }))
                })
            },
        )?;

        Ok(vec![send])
    }
}
