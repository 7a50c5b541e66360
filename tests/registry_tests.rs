// tests/registry_tests.rs

mod common;

use std::sync::Arc;

use serde_json::json;

use common::{
    spy_counter, spy_tool, BareWallet, BrokenPlugin, MockWallet, StaticPlugin, MOCK_ADDRESS,
};
use evm_agent_toolkit::core::chain::Chain;
use evm_agent_toolkit::core::error::ToolkitError;
use evm_agent_toolkit::core::plugin::Plugin;
use evm_agent_toolkit::core::registry::get_tools;
use evm_agent_toolkit::core::wallet::WalletClient;

#[tokio::test]
async fn core_tools_come_first_then_plugins_in_input_order() {
    let wallet: Arc<dyn WalletClient> = Arc::new(MockWallet::new(1));
    let chain = vec![Chain::evm(1)];
    let plugins: Vec<Box<dyn Plugin>> = vec![
        Box::new(StaticPlugin::new(
            "p1",
            chain.clone(),
            vec![spy_tool("p1_tool", spy_counter())],
        )),
        Box::new(StaticPlugin::new(
            "p2",
            chain,
            vec![
                spy_tool("p2_first", spy_counter()),
                spy_tool("p2_second", spy_counter()),
            ],
        )),
    ];

    let tools = get_tools(wallet, &plugins).unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
    assert_eq!(
        names,
        vec![
            "get_address",
            "get_chain",
            "get_balance",
            "sign_message",
            "p1_tool",
            "p2_first",
            "p2_second",
        ]
    );
}

#[tokio::test]
async fn unsupported_plugins_are_excluded_entirely() {
    // No core tools; P1 supports the wallet chain with [a, b]; P2 does not
    // and contributes [c]. The result must be exactly [a, b].
    let wallet: Arc<dyn WalletClient> = Arc::new(BareWallet::new(123));
    let plugins: Vec<Box<dyn Plugin>> = vec![
        Box::new(StaticPlugin::new(
            "p1",
            vec![Chain::evm(123), Chain::evm(456)],
            vec![spy_tool("a", spy_counter()), spy_tool("b", spy_counter())],
        )),
        Box::new(StaticPlugin::new(
            "p2",
            vec![Chain::evm(1)],
            vec![spy_tool("c", spy_counter())],
        )),
    ];

    let tools = get_tools(wallet, &plugins).unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[tokio::test]
async fn duplicate_tool_names_fail_resolution() {
    let wallet: Arc<dyn WalletClient> = Arc::new(BareWallet::new(1));
    let chain = vec![Chain::evm(1)];
    let plugins: Vec<Box<dyn Plugin>> = vec![
        Box::new(StaticPlugin::new(
            "p1",
            chain.clone(),
            vec![spy_tool("swap", spy_counter())],
        )),
        Box::new(StaticPlugin::new(
            "p2",
            chain,
            vec![spy_tool("swap", spy_counter())],
        )),
    ];

    let err = get_tools(wallet, &plugins).unwrap_err();
    match err {
        ToolkitError::DuplicateTool(name) => assert_eq!(name, "swap"),
        other => panic!("expected DuplicateTool, got {other:?}"),
    }
}

#[tokio::test]
async fn plugin_failure_propagates() {
    let wallet: Arc<dyn WalletClient> = Arc::new(BareWallet::new(1));
    let plugins: Vec<Box<dyn Plugin>> = vec![Box::new(BrokenPlugin)];
    assert!(get_tools(wallet, &plugins).is_err());
}

#[tokio::test]
async fn resolution_is_deterministic_across_calls() {
    let wallet: Arc<dyn WalletClient> = Arc::new(MockWallet::new(1));
    let plugins: Vec<Box<dyn Plugin>> = vec![Box::new(StaticPlugin::new(
        "p1",
        vec![Chain::evm(1)],
        vec![spy_tool("x", spy_counter())],
    ))];

    let first: Vec<String> = get_tools(wallet.clone(), &plugins)
        .unwrap()
        .iter()
        .map(|t| t.name().to_owned())
        .collect();
    let second: Vec<String> = get_tools(wallet, &plugins)
        .unwrap()
        .iter()
        .map(|t| t.name().to_owned())
        .collect();
    assert_eq!(first, second);
}

#[tokio::test]
async fn core_tools_answer_from_the_wallet() {
    let wallet: Arc<dyn WalletClient> = Arc::new(MockWallet::new(123));
    let tools = get_tools(wallet, &[]).unwrap();

    let get_address = tools.iter().find(|t| t.name() == "get_address").unwrap();
    assert_eq!(
        get_address.execute(json!({})).await.unwrap(),
        json!(MOCK_ADDRESS)
    );

    let get_chain = tools.iter().find(|t| t.name() == "get_chain").unwrap();
    assert_eq!(
        get_chain.execute(json!({})).await.unwrap(),
        json!({ "type": "evm", "id": 123 })
    );

    let sign = tools.iter().find(|t| t.name() == "sign_message").unwrap();
    assert_eq!(
        sign.execute(json!({ "message": "hello" })).await.unwrap(),
        json!({ "signature": "0xsigned:hello" })
    );

    let balance = tools.iter().find(|t| t.name() == "get_balance").unwrap();
    let result = balance
        .execute(json!({ "address": MOCK_ADDRESS }))
        .await
        .unwrap();
    assert_eq!(result["symbol"], "ETH");
    assert_eq!(result["in_base_units"], "1000000000000000000");
}
