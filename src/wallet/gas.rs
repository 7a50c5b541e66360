// src/wallet/gas.rs

use ethers_core::types::U256;
use serde_json::{json, Value};

use super::rpc::{hex_quantity, RpcClient};
use crate::core::error::ToolkitError;

/// Default buffer applied on top of node estimates, in percent.
pub const DEFAULT_GAS_BUFFER_PERCENT: u64 = 120;

/// Estimates gas through `eth_estimateGas` and pads the result by a
/// configurable percentage.
#[derive(Debug, Clone)]
pub struct GasEstimator {
    buffer_percent: u64,
}

impl Default for GasEstimator {
    fn default() -> Self {
        Self {
            buffer_percent: DEFAULT_GAS_BUFFER_PERCENT,
        }
    }
}

impl GasEstimator {
    pub fn new(buffer_percent: u64) -> Self {
        Self { buffer_percent }
    }

    /// Estimates gas for `call_obj` (a JSON transaction object) and applies
    /// the buffer.
    pub async fn estimate(&self, rpc: &RpcClient, call_obj: Value) -> Result<U256, ToolkitError> {
        let result = rpc.call("eth_estimateGas", json!([call_obj])).await?;
        let estimate = hex_quantity(&result, "gas estimate")?;
        self.apply_buffer(estimate)
    }

    /// Integer equivalent of multiplying by `buffer_percent / 100`.
    pub fn apply_buffer(&self, gas: U256) -> Result<U256, ToolkitError> {
        gas.checked_mul(U256::from(self.buffer_percent))
            .map(|padded| padded / U256::from(100u64))
            .ok_or_else(|| {
                ToolkitError::Execution(format!(
                    "gas estimate {gas} overflows when buffered by {}%",
                    self.buffer_percent
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_buffer_adds_twenty_percent() {
        let estimator = GasEstimator::default();
        assert_eq!(
            estimator.apply_buffer(U256::from(100_000u64)).unwrap(),
            U256::from(120_000u64)
        );
    }

    #[test]
    fn buffer_truncates_toward_zero() {
        let estimator = GasEstimator::new(120);
        assert_eq!(
            estimator.apply_buffer(U256::from(21u64)).unwrap(),
            U256::from(25u64)
        );
    }

    #[test]
    fn hundred_percent_is_identity() {
        let estimator = GasEstimator::new(100);
        assert_eq!(
            estimator.apply_buffer(U256::from(21_000u64)).unwrap(),
            U256::from(21_000u64)
        );
    }

    #[test]
    fn overflowing_estimate_is_an_error_not_a_panic() {
        let estimator = GasEstimator::default();
        let err = estimator.apply_buffer(U256::MAX).unwrap_err();
        assert!(err.to_string().contains("overflows"));
    }
}
