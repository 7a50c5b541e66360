// src/core/mod.rs

pub mod chain;
pub mod error;
pub mod plugin;
pub mod registry;
pub mod schema;
pub mod tool;
pub mod wallet;
