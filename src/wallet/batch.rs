// src/wallet/batch.rs

//! Sequential batch execution: one transaction at a time, each awaited
//! before the next, preserving nonce order.

use async_trait::async_trait;
use tracing::debug;

use crate::core::error::ToolkitError;
use crate::core::wallet::{EvmTransaction, TransactionSummary};

/// Anything that can submit a single transaction and return its hash.
#[async_trait]
pub trait TransactionSender: Send + Sync {
    async fn send(&self, tx: &EvmTransaction) -> Result<TransactionSummary, ToolkitError>;
}

/// Executes `txs` in order, returning the last summary on full success.
///
/// On a failure at index `i`, transactions `0..i` stay confirmed and their
/// hashes are carried in the error; transactions after `i` are never
/// attempted.
pub async fn execute_sequential_batch(
    sender: &dyn TransactionSender,
    txs: &[EvmTransaction],
) -> Result<TransactionSummary, ToolkitError> {
    if txs.is_empty() {
        return Err(ToolkitError::Config(
            "batch must contain at least one transaction".into(),
        ));
    }

    let mut completed: Vec<String> = Vec::with_capacity(txs.len());
    for (index, tx) in txs.iter().enumerate() {
        debug!(index, to = %tx.to, "submitting batch transaction");
        match sender.send(tx).await {
            Ok(summary) => completed.push(summary.hash),
            Err(err) => {
                return Err(ToolkitError::Batch {
                    index,
                    message: err.to_string(),
                    completed,
                });
            }
        }
    }

    let hash = completed.pop().unwrap_or_default();
    Ok(TransactionSummary { hash })
}
