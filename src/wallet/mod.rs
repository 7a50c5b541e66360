// src/wallet/mod.rs

//! EVM wallet client over a local signer and raw node JSON-RPC.

pub mod abi;
pub mod batch;
pub mod gas;
pub mod nonce;
pub mod rpc;

use std::str::FromStr;

use async_trait::async_trait;
use ethers_core::types::transaction::eip2718::TypedTransaction;
use ethers_core::types::{Address, Bytes, TransactionRequest};
use ethers::utils::{format_units, to_checksum};
use ethers_signers::{LocalWallet, Signer};
use serde_json::json;
use tracing::{debug, info};

use crate::core::chain::Chain;
use crate::core::error::ToolkitError;
use crate::core::wallet::{
    Balance, EvmTransaction, Signature, TransactionSummary, WalletClient,
};
use batch::{execute_sequential_batch, TransactionSender};
use gas::GasEstimator;
use nonce::NonceManager;
use rpc::{hex_quantity, RpcClient};

/// Wallet client backed by an in-process signing key. Transactions are
/// populated, signed locally and broadcast as raw RLP.
pub struct EvmWallet {
    rpc: RpcClient,
    signer: LocalWallet,
    chain: Chain,
    nonces: NonceManager,
    gas: GasEstimator,
}

impl EvmWallet {
    /// Builds a wallet for the node at `rpc_url` with the given signing key.
    pub fn new(rpc_url: &str, private_key: &str, chain_id: u64) -> Result<Self, ToolkitError> {
        let signer = LocalWallet::from_str(private_key)
            .map_err(|e| ToolkitError::Config(format!("invalid private key: {e}")))?
            .with_chain_id(chain_id);
        Ok(Self {
            rpc: RpcClient::new(rpc_url),
            signer,
            chain: Chain::evm(chain_id),
            nonces: NonceManager::new(),
            gas: GasEstimator::default(),
        })
    }

    /// Overrides the default gas estimate buffer.
    pub fn with_gas_buffer(mut self, buffer_percent: u64) -> Self {
        self.gas = GasEstimator::new(buffer_percent);
        self
    }

    async fn submit(&self, tx: &EvmTransaction) -> Result<TransactionSummary, ToolkitError> {
        let to = Address::from_str(&tx.to)
            .map_err(|_| ToolkitError::Execution(format!("invalid recipient address '{}'", tx.to)))?;
        let from = self.signer.address();
        let nonce = self.nonces.get_next_nonce(from, &self.rpc).await?;

        let mut request = TransactionRequest::new()
            .from(from)
            .to(to)
            .value(tx.value)
            .nonce(nonce)
            .chain_id(self.chain.id());
        if let Some(data) = &tx.data {
            request = request.data(data.clone());
        }

        let call_obj = serde_json::to_value(&request)
            .map_err(|e| ToolkitError::Execution(format!("failed to encode transaction: {e}")))?;
        let gas = self.gas.estimate(&self.rpc, call_obj).await?;
        request = request.gas(gas);

        let gas_price = self.rpc.call("eth_gasPrice", json!([])).await?;
        request = request.gas_price(hex_quantity(&gas_price, "gas price")?);

        let typed: TypedTransaction = request.into();
        let signature = self
            .signer
            .sign_transaction(&typed)
            .await
            .map_err(|e| ToolkitError::Execution(format!("failed to sign transaction: {e}")))?;
        let raw = typed.rlp_signed(&signature);

        let result = self
            .rpc
            .call(
                "eth_sendRawTransaction",
                json!([format!("0x{}", hex::encode(&raw))]),
            )
            .await?;
        let hash = result
            .as_str()
            .ok_or_else(|| {
                ToolkitError::Execution("missing transaction hash in node response".into())
            })?
            .to_string();

        info!(%hash, nonce = %nonce, "transaction submitted");
        Ok(TransactionSummary { hash })
    }
}

#[async_trait]
impl WalletClient for EvmWallet {
    fn chain(&self) -> Chain {
        self.chain
    }

    fn address(&self) -> String {
        to_checksum(&self.signer.address(), None)
    }

    async fn sign_message(&self, message: &str) -> Result<Signature, ToolkitError> {
        let signature = self
            .signer
            .sign_message(message)
            .await
            .map_err(|e| ToolkitError::Execution(format!("failed to sign message: {e}")))?;
        Ok(Signature {
            signature: format!("0x{signature}"),
        })
    }

    async fn balance_of(&self, address: &str) -> Result<Balance, ToolkitError> {
        let address = Address::from_str(address)
            .map_err(|_| ToolkitError::Execution(format!("invalid address '{address}'")))?;
        let result = self
            .rpc
            .call("eth_getBalance", json!([format!("{address:?}"), "latest"]))
            .await?;
        let wei = hex_quantity(&result, "balance")?;
        let value = format_units(wei, "ether")
            .map_err(|e| ToolkitError::Execution(format!("failed to format balance: {e}")))?;

        Ok(Balance {
            decimals: 18,
            symbol: "ETH".to_string(),
            name: "Ether".to_string(),
            value,
            in_base_units: wei.to_string(),
        })
    }

    async fn read_contract(&self, to: &str, data: Bytes) -> Result<Bytes, ToolkitError> {
        let to = Address::from_str(to)
            .map_err(|_| ToolkitError::Execution(format!("invalid contract address '{to}'")))?;
        let call_obj = json!({
            "to": format!("{to:?}"),
            "data": format!("0x{}", hex::encode(&data)),
        });
        let result = self.rpc.call("eth_call", json!([call_obj, "latest"])).await?;
        let hex = result
            .as_str()
            .ok_or_else(|| ToolkitError::Execution("eth_call returned no data".into()))?;
        let bytes = hex::decode(hex.trim_start_matches("0x"))
            .map_err(|e| ToolkitError::Execution(format!("invalid eth_call return data: {e}")))?;
        debug!(returned = bytes.len(), "eth_call completed");
        Ok(Bytes::from(bytes))
    }

    async fn send_transaction(
        &self,
        tx: EvmTransaction,
    ) -> Result<TransactionSummary, ToolkitError> {
        self.submit(&tx).await
    }

    async fn send_batch(
        &self,
        txs: Vec<EvmTransaction>,
    ) -> Result<TransactionSummary, ToolkitError> {
        execute_sequential_batch(self, &txs).await
    }
}

#[async_trait]
impl TransactionSender for EvmWallet {
    async fn send(&self, tx: &EvmTransaction) -> Result<TransactionSummary, ToolkitError> {
        self.submit(tx).await
    }
}
