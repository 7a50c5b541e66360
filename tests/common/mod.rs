// tests/common/mod.rs

//! Shared mocks: an offline wallet, a spy tool that counts invocations, and
//! fixed-output plugins.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use evm_agent_toolkit::core::chain::Chain;
use evm_agent_toolkit::core::error::ToolkitError;
use evm_agent_toolkit::core::plugin::Plugin;
use evm_agent_toolkit::core::schema::{ObjectSchema, Schema};
use evm_agent_toolkit::core::tool::ToolDescriptor;
use evm_agent_toolkit::core::wallet::{
    Balance, EvmTransaction, Signature, TransactionSummary, WalletClient,
};
use evm_agent_toolkit::Bytes;

pub const MOCK_ADDRESS: &str = "0x1111111111111111111111111111111111111111";

/// Offline wallet with canned answers and the default core tool set.
pub struct MockWallet {
    pub chain: Chain,
}

impl MockWallet {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain: Chain::evm(chain_id),
        }
    }
}

#[async_trait]
impl WalletClient for MockWallet {
    fn chain(&self) -> Chain {
        self.chain
    }

    fn address(&self) -> String {
        MOCK_ADDRESS.to_string()
    }

    async fn sign_message(&self, message: &str) -> Result<Signature, ToolkitError> {
        Ok(Signature {
            signature: format!("0xsigned:{message}"),
        })
    }

    async fn balance_of(&self, _address: &str) -> Result<Balance, ToolkitError> {
        Ok(Balance {
            decimals: 18,
            symbol: "ETH".to_string(),
            name: "Ether".to_string(),
            value: "1.0".to_string(),
            in_base_units: "1000000000000000000".to_string(),
        })
    }

    async fn read_contract(&self, _to: &str, _data: Bytes) -> Result<Bytes, ToolkitError> {
        Ok(Bytes::default())
    }

    async fn send_transaction(
        &self,
        _tx: EvmTransaction,
    ) -> Result<TransactionSummary, ToolkitError> {
        Ok(TransactionSummary {
            hash: "0xmockhash".to_string(),
        })
    }

    async fn send_batch(
        &self,
        _txs: Vec<EvmTransaction>,
    ) -> Result<TransactionSummary, ToolkitError> {
        Ok(TransactionSummary {
            hash: "0xmockhash".to_string(),
        })
    }
}

/// Wallet that contributes no core tools, so registries contain only plugin
/// tools.
pub struct BareWallet {
    pub chain: Chain,
}

impl BareWallet {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain: Chain::evm(chain_id),
        }
    }
}

#[async_trait]
impl WalletClient for BareWallet {
    fn chain(&self) -> Chain {
        self.chain
    }

    fn address(&self) -> String {
        MOCK_ADDRESS.to_string()
    }

    async fn sign_message(&self, _message: &str) -> Result<Signature, ToolkitError> {
        Ok(Signature {
            signature: "0xsig".to_string(),
        })
    }

    async fn balance_of(&self, _address: &str) -> Result<Balance, ToolkitError> {
        Ok(Balance {
            decimals: 18,
            symbol: "ETH".to_string(),
            name: "Ether".to_string(),
            value: "0.0".to_string(),
            in_base_units: "0".to_string(),
        })
    }

    async fn read_contract(&self, _to: &str, _data: Bytes) -> Result<Bytes, ToolkitError> {
        Ok(Bytes::default())
    }

    async fn send_transaction(
        &self,
        _tx: EvmTransaction,
    ) -> Result<TransactionSummary, ToolkitError> {
        Ok(TransactionSummary {
            hash: "0xmockhash".to_string(),
        })
    }

    async fn send_batch(
        &self,
        _txs: Vec<EvmTransaction>,
    ) -> Result<TransactionSummary, ToolkitError> {
        Ok(TransactionSummary {
            hash: "0xmockhash".to_string(),
        })
    }

    fn core_tools(
        &self,
        _handle: Arc<dyn WalletClient>,
    ) -> Result<Vec<ToolDescriptor>, ToolkitError> {
        Ok(Vec::new())
    }
}

/// Builds a tool with one required string field that counts how many times
/// its body ran.
pub fn spy_tool(name: &str, calls: Arc<AtomicUsize>) -> ToolDescriptor {
    let schema = ObjectSchema::new().field("param", "A test parameter", Schema::string());
    ToolDescriptor::new(
        name,
        &format!("{name} description"),
        schema,
        move |params| {
            let calls = calls.clone();
            Box::pin(async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(json!({ "echo": params["param"] }))
            })
        },
    )
    .expect("spy tool is valid")
}

/// Builds a tool that always fails with an execution error.
pub fn failing_tool(name: &str, message: &str) -> ToolDescriptor {
    let message = message.to_string();
    ToolDescriptor::new(
        name,
        "always fails",
        ObjectSchema::new().field("param", "A test parameter", Schema::string()),
        move |_params| {
            let message = message.clone();
            Box::pin(async move { Err(ToolkitError::Execution(message)) })
        },
    )
    .expect("failing tool is valid")
}

/// Plugin exposing a fixed tool list for a fixed set of chains.
pub struct StaticPlugin {
    pub name: String,
    pub chains: Vec<Chain>,
    pub tools: Vec<ToolDescriptor>,
}

impl StaticPlugin {
    pub fn new(name: &str, chains: Vec<Chain>, tools: Vec<ToolDescriptor>) -> Self {
        Self {
            name: name.to_string(),
            chains,
            tools,
        }
    }
}

impl Plugin for StaticPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports_chain(&self, chain: &Chain) -> bool {
        self.chains.contains(chain)
    }

    fn tools(&self, _wallet: Arc<dyn WalletClient>) -> Result<Vec<ToolDescriptor>, ToolkitError> {
        Ok(self.tools.clone())
    }
}

/// Plugin whose `tools()` always fails.
pub struct BrokenPlugin;

impl Plugin for BrokenPlugin {
    fn name(&self) -> &str {
        "broken"
    }

    fn supports_chain(&self, _chain: &Chain) -> bool {
        true
    }

    fn tools(&self, _wallet: Arc<dyn WalletClient>) -> Result<Vec<ToolDescriptor>, ToolkitError> {
        Err(ToolkitError::Execution("plugin construction failed".into()))
    }
}

pub fn spy_counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

pub fn count(calls: &Arc<AtomicUsize>) -> usize {
    calls.load(Ordering::SeqCst)
}
