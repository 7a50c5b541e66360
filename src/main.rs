// src/main.rs

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use evm_agent_toolkit::adapters::mcp::get_on_chain_tools;
use evm_agent_toolkit::config::Config;
use evm_agent_toolkit::core::plugin::Plugin;
use evm_agent_toolkit::mcp::server::run_stdio_server;
use evm_agent_toolkit::plugins::erc20::{Erc20Plugin, Token};
use evm_agent_toolkit::plugins::jsonrpc::JsonRpcPlugin;
use evm_agent_toolkit::plugins::send_eth::SendEthPlugin;
use evm_agent_toolkit::plugins::uniswap::UniswapPlugin;
use evm_agent_toolkit::wallet::EvmWallet;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the protocol stream.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evm_agent_toolkit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("failed to load configuration")?;

    let wallet = EvmWallet::new(&config.rpc_url, &config.private_key, config.chain_id)
        .context("failed to initialize wallet")?
        .with_gas_buffer(config.gas_buffer_percent);
    let wallet: Arc<dyn evm_agent_toolkit::WalletClient> = Arc::new(wallet);

    let mut plugins: Vec<Box<dyn Plugin>> = vec![
        Box::new(SendEthPlugin::new()),
        Box::new(Erc20Plugin::new(vec![Token::usdc(), Token::weth()])),
    ];
    if let Some(endpoint) = &config.jsonrpc_endpoint {
        plugins.push(Box::new(JsonRpcPlugin::new(endpoint.clone())));
    }
    if let (Some(api_key), Some(base_url)) = (&config.uniswap_api_key, &config.uniswap_base_url) {
        plugins.push(Box::new(UniswapPlugin::new(
            api_key.clone(),
            base_url.clone(),
        )));
    }

    let tools =
        get_on_chain_tools(wallet, &plugins).context("failed to resolve on-chain tools")?;
    info!(
        tools = tools.list_of_tools().len(),
        chain_id = config.chain_id,
        "tool registry resolved"
    );

    run_stdio_server(tools).await
}
