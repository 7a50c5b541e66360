// src/plugins/mod.rs

pub mod erc20;
pub mod jsonrpc;
pub mod send_eth;
pub mod uniswap;
