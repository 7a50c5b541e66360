// src/core/wallet.rs

//! Wallet collaborator trait and the wallet-native core tools.

use std::sync::Arc;

use async_trait::async_trait;
use ethers_core::types::{Bytes, U256};
use serde::Serialize;
use serde_json::json;

use super::chain::Chain;
use super::error::ToolkitError;
use super::schema::{ObjectSchema, Schema};
use super::tool::ToolDescriptor;
use crate::utils::required_str;

/// Result of signing a message with the wallet key.
#[derive(Debug, Clone, Serialize)]
pub struct Signature {
    pub signature: String,
}

/// Native token balance, formatted and in base units.
#[derive(Debug, Clone, Serialize)]
pub struct Balance {
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
    /// Human-readable decimal value.
    pub value: String,
    /// Raw value in the token's smallest unit.
    pub in_base_units: String,
}

/// A transaction to submit through the wallet.
#[derive(Debug, Clone, Default)]
pub struct EvmTransaction {
    /// Recipient address, 0x-prefixed hex.
    pub to: String,
    /// Value in wei.
    pub value: U256,
    /// Calldata for contract interactions.
    pub data: Option<Bytes>,
}

/// Summary of a submitted and confirmed transaction.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionSummary {
    pub hash: String,
}

/// The wallet collaborator: chain identity, address, signing, balance
/// queries and the contract primitives plugin tools are built on.
#[async_trait]
pub trait WalletClient: Send + Sync {
    fn chain(&self) -> Chain;

    fn address(&self) -> String;

    async fn sign_message(&self, message: &str) -> Result<Signature, ToolkitError>;

    async fn balance_of(&self, address: &str) -> Result<Balance, ToolkitError>;

    /// Executes a read-only `eth_call` and returns the raw return data.
    async fn read_contract(&self, to: &str, data: Bytes) -> Result<Bytes, ToolkitError>;

    async fn send_transaction(&self, tx: EvmTransaction)
        -> Result<TransactionSummary, ToolkitError>;

    /// Submits transactions one at a time, aborting on first failure.
    async fn send_batch(&self, txs: Vec<EvmTransaction>)
        -> Result<TransactionSummary, ToolkitError>;

    /// Wallet-native tools included at the front of every registry snapshot.
    ///
    /// `handle` is the shared reference the registry holds to this same
    /// wallet; tool closures capture it.
    fn core_tools(
        &self,
        handle: Arc<dyn WalletClient>,
    ) -> Result<Vec<ToolDescriptor>, ToolkitError> {
        default_core_tools(handle)
    }
}

/// Builds the default wallet-native tool set: `get_address`, `get_chain`,
/// `get_balance` and `sign_message`.
pub fn default_core_tools(
    wallet: Arc<dyn WalletClient>,
) -> Result<Vec<ToolDescriptor>, ToolkitError> {
    let get_address = {
        let wallet = wallet.clone();
        ToolDescriptor::new(
            "get_address",
            "Get the address of the wallet",
            ObjectSchema::new(),
            move |_params| {
                let wallet = wallet.clone();
                Box::pin(async move { Ok(json!(wallet.address())) })
            },
        )?
    };

    let get_chain = {
        let wallet = wallet.clone();
        ToolDescriptor::new(
            "get_chain",
            "Get the chain of the wallet",
            ObjectSchema::new(),
            move |_params| {
                let wallet = wallet.clone();
                Box::pin(async move {
                    serde_json::to_value(wallet.chain())
                        .map_err(|e| ToolkitError::Execution(e.to_string()))
                })
            },
        )?
    };

    let get_balance = {
        let wallet = wallet.clone();
        ToolDescriptor::new(
            "get_balance",
            "Get the balance of an address",
            ObjectSchema::new().field(
                "address",
                "The address to get the balance of",
                Schema::string(),
            ),
            move |params| {
                let wallet = wallet.clone();
                Box::pin(async move {
                    let address = required_str(&params, "address")?;
                    let balance = wallet.balance_of(&address).await?;
                    serde_json::to_value(balance)
                        .map_err(|e| ToolkitError::Execution(e.to_string()))
                })
            },
        )?
    };

    let sign_message = {
        let wallet = wallet.clone();
        ToolDescriptor::new(
            "sign_message",
            "Sign a message with the wallet key",
            ObjectSchema::new().field("message", "The message to sign", Schema::string()),
            move |params| {
                let wallet = wallet.clone();
                Box::pin(async move {
                    let message = required_str(&params, "message")?;
                    let signature = wallet.sign_message(&message).await?;
                    serde_json::to_value(signature)
                        .map_err(|e| ToolkitError::Execution(e.to_string()))
                })
            },
        )?
    };

    Ok(vec![get_address, get_chain, get_balance, sign_message])
}
