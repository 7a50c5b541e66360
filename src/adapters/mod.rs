// src/adapters/mod.rs

pub mod langchain;
pub mod mcp;
pub mod vercel_ai;
