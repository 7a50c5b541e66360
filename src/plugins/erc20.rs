// src/plugins/erc20.rs

//! ERC-20 token tools over a configured token list.
//!
//! The plugin is constructed with the tokens it should know about; balance,
//! transfer and approval tools additionally accept arbitrary token addresses
//! with amounts given in base units.

use std::collections::HashMap;
use std::sync::Arc;

use ethers::utils::{format_units, parse_units, ParseUnits};
use ethers_core::abi::Token as AbiToken;
use ethers_core::types::U256;
use serde_json::{json, Value};

use crate::core::chain::Chain;
use crate::core::error::ToolkitError;
use crate::core::plugin::Plugin;
use crate::core::schema::{ObjectSchema, Schema};
use crate::core::tool::ToolDescriptor;
use crate::core::wallet::{EvmTransaction, WalletClient};
use crate::utils::{optional_bool, optional_u64, required_str};
use crate::wallet::abi;

/// An ERC-20 token known to the plugin, with its per-chain deployments.
#[derive(Debug, Clone)]
pub struct Token {
    pub symbol: String,
    pub name: String,
    pub decimals: u32,
    /// Chain id to contract address.
    pub chains: HashMap<u64, String>,
}

impl Token {
    pub fn new(symbol: &str, name: &str, decimals: u32, chains: &[(u64, &str)]) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            decimals,
            chains: chains
                .iter()
                .map(|(id, address)| (*id, address.to_string()))
                .collect(),
        }
    }

    /// USDC on Ethereum mainnet and Sepolia.
    pub fn usdc() -> Self {
        Token::new(
            "USDC",
            "USD Coin",
            6,
            &[
                (1, "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
                (11155111, "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238"),
            ],
        )
    }

    /// Wrapped ETH on Ethereum mainnet and Sepolia.
    pub fn weth() -> Self {
        Token::new(
            "WETH",
            "Wrapped Ether",
            18,
            &[
                (1, "0xC02aaA39b223FE8D0A0e5C4F27eAD9083c756Cc2"),
                (11155111, "0xfFf9976782d46CC05630D1f6eBAb18b2324d6B14"),
            ],
        )
    }
}

pub struct Erc20Plugin {
    tokens: Vec<Token>,
}

impl Erc20Plugin {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

struct Erc20Service {
    tokens: Vec<Token>,
}

impl Erc20Service {
    fn token_by_symbol(&self, symbol: &str) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|token| token.symbol.eq_ignore_ascii_case(symbol))
    }

    fn token_by_address(&self, address: &str) -> Option<&Token> {
        self.tokens.iter().find(|token| {
            token
                .chains
                .values()
                .any(|deployed| deployed.eq_ignore_ascii_case(address))
        })
    }

    /// Interprets a user-supplied amount: base units by default, a decimal
    /// value scaled by the token's configured decimals when `format_amount`
    /// is set.
    fn parse_amount(
        &self,
        token_address: &str,
        amount: &str,
        format_amount: bool,
    ) -> Result<U256, ToolkitError> {
        if !format_amount {
            return U256::from_dec_str(amount).map_err(|e| {
                ToolkitError::Execution(format!("invalid base unit amount '{amount}': {e}"))
            });
        }
        let token = self.token_by_address(token_address).ok_or_else(|| {
            ToolkitError::Execution(format!(
                "token '{token_address}' is not configured, pass the amount in base units"
            ))
        })?;
        to_base_units(amount, token.decimals)
    }

    fn describe(&self, address: &str, raw: U256) -> Value {
        match self.token_by_address(address) {
            Some(token) => json!({
                "symbol": token.symbol,
                "decimals": token.decimals,
                "value": format_units(raw, token.decimals).unwrap_or_else(|_| raw.to_string()),
                "in_base_units": raw.to_string(),
            }),
            None => json!({ "in_base_units": raw.to_string() }),
        }
    }
}

fn to_base_units(amount: &str, decimals: u32) -> Result<U256, ToolkitError> {
    let parsed = parse_units(amount, decimals)
        .map_err(|e| ToolkitError::Execution(format!("invalid amount '{amount}': {e}")))?;
    match parsed {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(_) => Err(ToolkitError::Execution(format!(
            "amount '{amount}' must not be negative"
        ))),
    }
}

/// Reads the validated `decimals` parameter as a `u32`. Schema validation
/// admits any JSON integer, so negative and oversized values are rejected
/// here with the offending value in the message.
fn token_decimals(params: &Value) -> Result<u32, ToolkitError> {
    optional_u64(params, "decimals")
        .and_then(|d| u32::try_from(d).ok())
        .ok_or_else(|| {
            let got = params.get("decimals").cloned().unwrap_or(Value::Null);
            ToolkitError::Execution(format!(
                "token decimals must be a non-negative integer fitting in u32, got {got}"
            ))
        })
}

impl Plugin for Erc20Plugin {
    fn name(&self) -> &str {
        "erc20"
    }

    fn supports_chain(&self, chain: &Chain) -> bool {
        matches!(chain, Chain::Evm { .. })
    }

    fn tools(&self, wallet: Arc<dyn WalletClient>) -> Result<Vec<ToolDescriptor>, ToolkitError> {
        let service = Arc::new(Erc20Service {
            tokens: self.tokens.clone(),
        });

        let get_token_info = {
            let service = service.clone();
            let wallet = wallet.clone();
            ToolDescriptor::new(
                "get_token_info_by_symbol",
                "Get the ERC-20 token info by its symbol",
                ObjectSchema::new().field("symbol", "The token symbol", Schema::string()),
                move |params| {
                    let service = service.clone();
                    let wallet = wallet.clone();
                    Box::pin(async move {
                        let symbol = required_str(&params, "symbol")?;
                        let token = service.token_by_symbol(&symbol).ok_or_else(|| {
                            ToolkitError::Execution(format!("token '{symbol}' is not configured"))
                        })?;
                        let chain_id = wallet.chain().id();
                        let contract = token.chains.get(&chain_id).ok_or_else(|| {
                            ToolkitError::Execution(format!(
                                "token '{symbol}' has no deployment on chain {chain_id}"
                            ))
                        })?;
                        Ok(json!({
                            "symbol": token.symbol,
                            "name": token.name,
                            "decimals": token.decimals,
                            "contract_address": contract,
                        }))
                    })
                },
            )?
        };

        let get_balance = {
            let service = service.clone();
            let wallet = wallet.clone();
            ToolDescriptor::new(
                "get_token_balance",
                "Get the ERC-20 token balance of an address",
                ObjectSchema::new()
                    .field("wallet", "The address to check the balance of", Schema::string())
                    .field("token_address", "The token contract address", Schema::string()),
                move |params| {
                    let service = service.clone();
                    let wallet = wallet.clone();
                    Box::pin(async move {
                        let holder = required_str(&params, "wallet")?;
                        let token_address = required_str(&params, "token_address")?;
                        let data = abi::encode_call(
                            "balanceOf(address)",
                            &[AbiToken::Address(abi::parse_address(&holder)?)],
                        );
                        let ret = wallet.read_contract(&token_address, data).await?;
                        let raw = abi::decode_u256(&ret)?;
                        Ok(service.describe(&token_address, raw))
                    })
                },
            )?
        };

        let transfer = {
            let service = service.clone();
            let wallet = wallet.clone();
            ToolDescriptor::new(
                "transfer",
                "Transfer an amount of an ERC-20 token to an address",
                ObjectSchema::new()
                    .field("token_address", "The token contract address", Schema::string())
                    .field("to", "The address to transfer to", Schema::string())
                    .field(
                        "amount",
                        "The amount to transfer, in base units unless format_amount is set",
                        Schema::string(),
                    )
                    .optional_with_default(
                        "format_amount",
                        "Treat amount as a decimal value and scale by the token decimals",
                        Schema::boolean(),
                        json!(false),
                    ),
                move |params| {
                    let service = service.clone();
                    let wallet = wallet.clone();
                    Box::pin(async move {
                        let token_address = required_str(&params, "token_address")?;
                        let to = required_str(&params, "to")?;
                        let amount = required_str(&params, "amount")?;
                        let format_amount = optional_bool(&params, "format_amount").unwrap_or(false);
                        let value = service.parse_amount(&token_address, &amount, format_amount)?;
                        let data = abi::encode_call(
                            "transfer(address,uint256)",
                            &[
                                AbiToken::Address(abi::parse_address(&to)?),
                                AbiToken::Uint(value),
                            ],
                        );
                        let summary = wallet
                            .send_transaction(EvmTransaction {
                                to: token_address,
                                value: U256::zero(),
                                data: Some(data),
                            })
                            .await?;
                        Ok(json!({ "hash": summary.hash }))
                    })
                },
            )?
        };

        let approve = {
            let service = service.clone();
            let wallet = wallet.clone();
            ToolDescriptor::new(
                "approve",
                "Approve a spender for an amount of an ERC-20 token",
                ObjectSchema::new()
                    .field("token_address", "The token contract address", Schema::string())
                    .field("spender", "The address to approve", Schema::string())
                    .field(
                        "amount",
                        "The amount to approve, in base units unless format_amount is set",
                        Schema::string(),
                    )
                    .optional_with_default(
                        "format_amount",
                        "Treat amount as a decimal value and scale by the token decimals",
                        Schema::boolean(),
                        json!(false),
                    ),
                move |params| {
                    let service = service.clone();
                    let wallet = wallet.clone();
                    Box::pin(async move {
                        let token_address = required_str(&params, "token_address")?;
                        let spender = required_str(&params, "spender")?;
                        let amount = required_str(&params, "amount")?;
                        let format_amount = optional_bool(&params, "format_amount").unwrap_or(false);
                        let value = service.parse_amount(&token_address, &amount, format_amount)?;
                        let data = abi::encode_call(
                            "approve(address,uint256)",
                            &[
                                AbiToken::Address(abi::parse_address(&spender)?),
                                AbiToken::Uint(value),
                            ],
                        );
                        let summary = wallet
                            .send_transaction(EvmTransaction {
                                to: token_address,
                                value: U256::zero(),
                                data: Some(data),
                            })
                            .await?;
                        Ok(json!({ "hash": summary.hash }))
                    })
                },
            )?
        };

        let get_allowance = {
            let service = service.clone();
            let wallet = wallet.clone();
            ToolDescriptor::new(
                "get_token_allowance",
                "Get the allowance a spender has for an ERC-20 token",
                ObjectSchema::new()
                    .field("token_address", "The token contract address", Schema::string())
                    .field("owner", "The owner of the tokens", Schema::string())
                    .field("spender", "The spender to check", Schema::string()),
                move |params| {
                    let service = service.clone();
                    let wallet = wallet.clone();
                    Box::pin(async move {
                        let token_address = required_str(&params, "token_address")?;
                        let owner = required_str(&params, "owner")?;
                        let spender = required_str(&params, "spender")?;
                        let data = abi::encode_call(
                            "allowance(address,address)",
                            &[
                                AbiToken::Address(abi::parse_address(&owner)?),
                                AbiToken::Address(abi::parse_address(&spender)?),
                            ],
                        );
                        let ret = wallet.read_contract(&token_address, data).await?;
                        let raw = abi::decode_u256(&ret)?;
                        Ok(service.describe(&token_address, raw))
                    })
                },
            )?
        };

        let get_total_supply = {
            let service = service.clone();
            let wallet = wallet.clone();
            ToolDescriptor::new(
                "get_token_total_supply",
                "Get the total supply of an ERC-20 token",
                ObjectSchema::new().field(
                    "token_address",
                    "The token contract address",
                    Schema::string(),
                ),
                move |params| {
                    let service = service.clone();
                    let wallet = wallet.clone();
                    Box::pin(async move {
                        let token_address = required_str(&params, "token_address")?;
                        let data = abi::encode_call("totalSupply()", &[]);
                        let ret = wallet.read_contract(&token_address, data).await?;
                        let raw = abi::decode_u256(&ret)?;
                        Ok(service.describe(&token_address, raw))
                    })
                },
            )?
        };

        let convert_to_base = ToolDescriptor::new(
            "convert_to_base_unit",
            "Convert a decimal token amount to base units",
            ObjectSchema::new()
                .field("amount", "The decimal amount to convert", Schema::string())
                .field("decimals", "The token decimals", Schema::integer()),
            move |params| {
                Box::pin(async move {
                    let amount = required_str(&params, "amount")?;
                    let decimals = token_decimals(&params)?;
                    let value = to_base_units(&amount, decimals)?;
                    Ok(json!({ "in_base_units": value.to_string() }))
                })
            },
        )?;

        let convert_from_base = ToolDescriptor::new(
            "convert_from_base_unit",
            "Convert a base unit token amount to a decimal value",
            ObjectSchema::new()
                .field("amount", "The base unit amount to convert", Schema::string())
                .field("decimals", "The token decimals", Schema::integer()),
            move |params| {
                Box::pin(async move {
                    let amount = required_str(&params, "amount")?;
                    let decimals = token_decimals(&params)?;
                    let raw = U256::from_dec_str(&amount).map_err(|e| {
                        ToolkitError::Execution(format!("invalid base unit amount '{amount}': {e}"))
                    })?;
                    let value = format_units(raw, decimals)
                        .map_err(|e| ToolkitError::Execution(format!("conversion failed: {e}")))?;
                    Ok(json!({ "value": value }))
                })
            },
        )?;

        Ok(vec![
            get_token_info,
            get_balance,
            transfer,
            approve,
            get_allowance,
            get_total_supply,
            convert_to_base,
            convert_from_base,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_lookup_is_case_insensitive() {
        let service = Erc20Service {
            tokens: vec![Token::usdc()],
        };
        assert!(service.token_by_symbol("usdc").is_some());
        assert!(service
            .token_by_address("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48")
            .is_some());
        assert!(service.token_by_symbol("DAI").is_none());
    }

    #[test]
    fn parse_amount_scales_by_token_decimals() {
        let service = Erc20Service {
            tokens: vec![Token::usdc()],
        };
        let usdc_mainnet = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
        let scaled = service.parse_amount(usdc_mainnet, "1.5", true).unwrap();
        assert_eq!(scaled, U256::from(1_500_000u64));

        let raw = service.parse_amount(usdc_mainnet, "1500000", false).unwrap();
        assert_eq!(raw, U256::from(1_500_000u64));
    }

    #[test]
    fn parse_amount_rejects_unknown_token_when_formatting() {
        let service = Erc20Service { tokens: vec![] };
        assert!(service.parse_amount("0xdead", "1.5", true).is_err());
    }

    #[test]
    fn base_unit_conversion() {
        assert_eq!(
            to_base_units("2", 18).unwrap(),
            U256::from_dec_str("2000000000000000000").unwrap()
        );
        assert!(to_base_units("-1", 18).is_err());
    }

    #[test]
    fn token_decimals_rejects_out_of_range_values() {
        assert_eq!(token_decimals(&json!({ "decimals": 18 })).unwrap(), 18);

        // u32::MAX + 1 must not wrap to 0.
        let err = token_decimals(&json!({ "decimals": 4_294_967_296u64 })).unwrap_err();
        assert!(err.to_string().contains("4294967296"));

        // Negative integers pass schema validation but cannot be decimals.
        let err = token_decimals(&json!({ "decimals": -6 })).unwrap_err();
        assert!(err.to_string().contains("-6"));
        assert!(err.to_string().contains("non-negative"));
    }
}
