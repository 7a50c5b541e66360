// src/wallet/nonce.rs

use std::sync::Arc;

use dashmap::DashMap;
use ethers_core::types::{Address, U256};
use serde_json::json;
use tokio::sync::Mutex;

use super::rpc::{hex_quantity, RpcClient};
use crate::core::error::ToolkitError;

/// Tracks the next nonce per sender so sequential submissions never reuse or
/// skip a nonce.
///
/// The pending transaction count is fetched from the node on first use for
/// an address; subsequent nonces are assigned locally under the per-address
/// lock.
#[derive(Debug, Clone, Default)]
pub struct NonceManager {
    nonces: Arc<DashMap<Address, Arc<Mutex<Option<U256>>>>>,
}

impl NonceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the nonce to use for the next transaction from `address`.
    pub async fn get_next_nonce(
        &self,
        address: Address,
        rpc: &RpcClient,
    ) -> Result<U256, ToolkitError> {
        let slot = self
            .nonces
            .entry(address)
            .or_insert_with(|| Arc::new(Mutex::new(None)))
            .clone();
        let mut state = slot.lock().await;

        let next = match *state {
            Some(nonce) => nonce,
            None => {
                let result = rpc
                    .call(
                        "eth_getTransactionCount",
                        json!([format!("{address:?}"), "pending"]),
                    )
                    .await?;
                hex_quantity(&result, "transaction count")?
            }
        };

        *state = Some(next + U256::one());
        Ok(next)
    }
}
