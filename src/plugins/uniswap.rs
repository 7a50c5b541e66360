// src/plugins/uniswap.rs

//! Tools for the Uniswap trading API: approval checks, quotes and swaps.
//!
//! The API returns ready-to-send transaction objects; the tools relay them
//! through the wallet.

use std::sync::Arc;

use ethers_core::types::{Bytes, U256};
use serde_json::{json, Value};

use crate::core::chain::Chain;
use crate::core::error::ToolkitError;
use crate::core::plugin::Plugin;
use crate::core::schema::{ObjectSchema, Schema};
use crate::core::tool::ToolDescriptor;
use crate::core::wallet::{EvmTransaction, WalletClient};
use crate::utils::required_str;

/// Chain ids the trading API serves.
const SUPPORTED_CHAIN_IDS: &[u64] = &[1, 10, 137, 8453, 42161, 11155111];

pub struct UniswapPlugin {
    api_key: String,
    base_url: String,
}

impl UniswapPlugin {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

struct UniswapService {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl UniswapService {
    async fn request(&self, endpoint: &str, payload: Value) -> Result<Value, ToolkitError> {
        let url = format!("{}/{endpoint}", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ToolkitError::Execution(format!("{endpoint} request failed: {e}")))?;

        let status = response.status();
        let body: Value = response.json().await.map_err(|e| {
            ToolkitError::Execution(format!("{endpoint} returned invalid JSON: {e}"))
        })?;
        if !status.is_success() {
            return Err(ToolkitError::Execution(format!(
                "{endpoint} failed with status {status}: {body}"
            )));
        }
        Ok(body)
    }

    async fn quote(
        &self,
        wallet: &Arc<dyn WalletClient>,
        params: &Value,
    ) -> Result<Value, ToolkitError> {
        let chain_id = wallet.chain().id();
        self.request(
            "quote",
            json!({
                "tokenIn": required_str(params, "token_in")?,
                "tokenOut": required_str(params, "token_out")?,
                "amount": required_str(params, "amount")?,
                "type": required_str(params, "swap_type")?,
                "tokenInChainId": chain_id,
                "tokenOutChainId": chain_id,
                "swapper": wallet.address(),
            }),
        )
        .await
    }
}

/// Converts a transaction object from the API into a wallet transaction.
fn api_transaction(tx: &Value) -> Result<EvmTransaction, ToolkitError> {
    let to = tx
        .get("to")
        .and_then(Value::as_str)
        .ok_or_else(|| ToolkitError::Execution("API transaction missing 'to'".into()))?
        .to_string();
    let value = match tx.get("value").and_then(Value::as_str) {
        None => U256::zero(),
        Some(raw) if raw.is_empty() => U256::zero(),
        Some(raw) if raw.starts_with("0x") => U256::from_str_radix(&raw[2..], 16)
            .map_err(|e| ToolkitError::Execution(format!("invalid tx value '{raw}': {e}")))?,
        Some(raw) => U256::from_dec_str(raw)
            .map_err(|e| ToolkitError::Execution(format!("invalid tx value '{raw}': {e}")))?,
    };
    let data = match tx.get("data").and_then(Value::as_str) {
        None => None,
        Some(hex) => Some(Bytes::from(
            hex::decode(hex.trim_start_matches("0x")).map_err(|e| {
                ToolkitError::Execution(format!("invalid tx calldata '{hex}': {e}"))
            })?,
        )),
    };
    Ok(EvmTransaction { to, value, data })
}

fn quote_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field("token_in", "Address of the token to swap from", Schema::string())
        .field("token_out", "Address of the token to swap to", Schema::string())
        .field(
            "amount",
            "The amount of tokens to swap, in base units",
            Schema::string(),
        )
        .optional_with_default(
            "swap_type",
            "Whether the amount is the exact input or the exact output",
            Schema::string_enum(["EXACT_INPUT", "EXACT_OUTPUT"]),
            json!("EXACT_INPUT"),
        )
}

impl Plugin for UniswapPlugin {
    fn name(&self) -> &str {
        "uniswap"
    }

    fn supports_chain(&self, chain: &Chain) -> bool {
        match chain {
            Chain::Evm { id } => SUPPORTED_CHAIN_IDS.contains(id),
        }
    }

    fn tools(&self, wallet: Arc<dyn WalletClient>) -> Result<Vec<ToolDescriptor>, ToolkitError> {
        let service = Arc::new(UniswapService {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            http: reqwest::Client::new(),
        });

        let check_approval = {
            let service = service.clone();
            let wallet = wallet.clone();
            ToolDescriptor::new(
                "uniswap_check_approval",
                "Check if the wallet has enough token approval for a swap and approve if not",
                ObjectSchema::new()
                    .field("token", "Token address to check approval for", Schema::string())
                    .field("amount", "Amount of tokens to approve, in base units", Schema::string())
                    .field("wallet_address", "Wallet address to check approval for", Schema::string()),
                move |params| {
                    let service = service.clone();
                    let wallet = wallet.clone();
                    Box::pin(async move {
                        let body = service
                            .request(
                                "check_approval",
                                json!({
                                    "token": required_str(&params, "token")?,
                                    "amount": required_str(&params, "amount")?,
                                    "walletAddress": required_str(&params, "wallet_address")?,
                                    "chainId": wallet.chain().id(),
                                }),
                            )
                            .await?;

                        match body.get("approval").filter(|approval| !approval.is_null()) {
                            None => Ok(json!({
                                "status": "approved",
                                "message": "Token already has sufficient approval",
                            })),
                            Some(approval) => {
                                let summary = wallet
                                    .send_transaction(api_transaction(approval)?)
                                    .await?;
                                Ok(json!({
                                    "status": "approved",
                                    "tx_hash": summary.hash,
                                    "message": "Token approval transaction successful",
                                }))
                            }
                        }
                    })
                },
            )?
        };

        let get_quote = {
            let service = service.clone();
            let wallet = wallet.clone();
            ToolDescriptor::new(
                "uniswap_get_quote",
                "Get a quote for swapping tokens on Uniswap",
                quote_schema(),
                move |params| {
                    let service = service.clone();
                    let wallet = wallet.clone();
                    Box::pin(async move { service.quote(&wallet, &params).await })
                },
            )?
        };

        let swap_tokens = {
            let service = service.clone();
            let wallet = wallet.clone();
            ToolDescriptor::new(
                "uniswap_swap_tokens",
                "Swap tokens on Uniswap",
                quote_schema(),
                move |params| {
                    let service = service.clone();
                    let wallet = wallet.clone();
                    Box::pin(async move {
                        let quote_response = service.quote(&wallet, &params).await?;
                        let swap_response = service
                            .request(
                                "swap",
                                json!({ "quote": quote_response.get("quote").cloned().unwrap_or(Value::Null) }),
                            )
                            .await?;
                        let swap_tx = swap_response.get("swap").ok_or_else(|| {
                            ToolkitError::Execution("swap response missing 'swap' transaction".into())
                        })?;
                        let summary = wallet.send_transaction(api_transaction(swap_tx)?).await?;
                        Ok(json!({
                            "status": "success",
                            "tx_hash": summary.hash,
                            "token_in": required_str(&params, "token_in")?,
                            "token_out": required_str(&params, "token_out")?,
                            "amount": required_str(&params, "amount")?,
                        }))
                    })
                },
            )?
        };

        Ok(vec![check_approval, get_quote, swap_tokens])
    }
}
