// src/lib.rs

//! On-chain EVM tools for AI agent frameworks.
//!
//! The crate turns a wallet client plus an ordered list of plugins into
//! callable tools for LangChain-style agents, Vercel-AI-style hosts and
//! Model Context Protocol clients. Tool inputs are validated against
//! declared parameter schemas, plugins are filtered by the wallet's chain,
//! and a stdio MCP server binary wires the whole stack together.

pub mod adapters;
pub mod config;
pub mod core;
pub mod mcp;
pub mod plugins;
pub mod utils;
pub mod wallet;

// Re-export commonly used types
pub use self::core::chain::Chain;
pub use self::core::error::{ToolkitError, ValidationError};
pub use self::core::plugin::Plugin;
pub use self::core::registry::get_tools;
pub use self::core::schema::{ObjectSchema, Schema};
pub use self::core::tool::ToolDescriptor;
pub use self::core::wallet::{
    Balance, EvmTransaction, Signature, TransactionSummary, WalletClient,
};
pub use self::wallet::EvmWallet;

pub use ethers_core::types::{Address, Bytes, H256, U256};
