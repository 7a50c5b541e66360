// src/core/chain.rs

use serde::{Deserialize, Serialize};

/// Chain descriptor used as a plugin filter key. Carries no behavior.
///
/// Serializes as `{ "type": "evm", "id": N }`. The toolkit targets
/// EVM-compatible networks only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Chain {
    Evm { id: u64 },
}

impl Chain {
    pub fn evm(id: u64) -> Self {
        Chain::Evm { id }
    }

    /// Numeric chain identifier.
    pub fn id(&self) -> u64 {
        match self {
            Chain::Evm { id } => *id,
        }
    }

    /// Chain family tag.
    pub fn chain_type(&self) -> &'static str {
        match self {
            Chain::Evm { .. } => "evm",
        }
    }
}
