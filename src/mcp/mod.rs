// src/mcp/mod.rs

pub mod protocol;
pub mod server;
