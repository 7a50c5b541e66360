// src/config.rs

use std::env;

use anyhow::{Context, Result};

/// Startup configuration for the MCP server binary, loaded once from the
/// environment (with `.env` support).
#[derive(Clone, Debug)]
pub struct Config {
    /// RPC endpoint of the target EVM node.
    pub rpc_url: String,
    /// Numeric chain id of that node.
    pub chain_id: u64,
    /// Signing key for the wallet, 0x-prefixed hex.
    pub private_key: String,
    /// Buffer applied to gas estimates, in percent (120 = estimate + 20%).
    pub gas_buffer_percent: u64,
    /// Endpoint for the raw JSON-RPC plugin; the plugin is only registered
    /// when set.
    pub jsonrpc_endpoint: Option<String>,
    /// Uniswap trading API credentials; the uniswap plugin is only
    /// registered when both are set.
    pub uniswap_api_key: Option<String>,
    pub uniswap_base_url: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();

        Ok(Config {
            rpc_url: env::var("RPC_URL").context("RPC_URL must be set")?,
            chain_id: env::var("CHAIN_ID")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .context("CHAIN_ID must be a valid number")?,
            private_key: env::var("WALLET_PRIVATE_KEY")
                .context("WALLET_PRIVATE_KEY must be set")?,
            gas_buffer_percent: env::var("GAS_BUFFER_PERCENT")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .context("GAS_BUFFER_PERCENT must be a valid number")?,
            jsonrpc_endpoint: env::var("JSONRPC_ENDPOINT").ok(),
            uniswap_api_key: env::var("UNISWAP_API_KEY").ok(),
            uniswap_base_url: env::var("UNISWAP_BASE_URL").ok(),
        })
    }
}
