//! Pass-through and terminal handler tests.

use crate::utils::{call, test_wallet};
use headless_wallet::{ChainDescriptor, HttpTransportFactory, WalletConfig, WalletProvider};
use headless_wallet_rpc::{ErrorCode, RpcError};
use serde_json::json;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread")]
async fn unknown_methods_are_forwarded_verbatim() {
    let (wallet, transport, _events) = test_wallet();
    transport.respond("eth_getBalance", json!("0x10"));

    let params = json!(["0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266", "latest"]);
    let result = call(&wallet, "eth_getBalance", Some(params.clone())).await.unwrap();
    assert_eq!(result, json!("0x10"));

    // the request reached the endpoint unchanged
    assert_eq!(transport.calls_for("eth_getBalance"), vec![Some(params)]);
}

#[tokio::test(flavor = "multi_thread")]
async fn remote_errors_are_forwarded_unchanged() {
    let (wallet, transport, _events) = test_wallet();
    transport.fail(
        "eth_call",
        RpcError {
            code: ErrorCode::ServerError(3),
            message: "execution reverted".into(),
            data: Some(json!("0x08c379a0")),
        },
    );

    let err = call(&wallet, "eth_call", Some(json!([{}, "latest"]))).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ServerError(3));
    assert_eq!(err.message, "execution reverted");
    assert_eq!(err.data, Some(json!("0x08c379a0")));
}

#[tokio::test(flavor = "multi_thread")]
async fn transport_failure_falls_through_to_unsupported() {
    let (wallet, _transport, _events) = test_wallet();
    // the mock has no canned response, so the transport cannot carry the call

    let err = call(&wallet, "eth_mining", None).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::UnsupportedMethod);
    assert!(err.message.contains("eth_mining"));
    assert_eq!(err.data, Some(json!("eth_mining")));
}

#[tokio::test(flavor = "multi_thread")]
async fn chain_without_endpoint_reports_unsupported() {
    // a real HTTP factory, but the active chain has no RPC URL configured
    let config = WalletConfig::default()
        .with_chains(vec![ChainDescriptor::new(31337, "offline dev")], 31337)
        .with_transport_factory(Arc::new(HttpTransportFactory::default()));
    let wallet = WalletProvider::new(config).unwrap();

    let err = wallet
        .request(headless_wallet_rpc::RpcRequest::new("eth_blockNumber", None))
        .await
        .into_result()
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::UnsupportedMethod);
}

#[tokio::test(flavor = "multi_thread")]
async fn recognized_methods_never_reach_the_transport() {
    let (wallet, transport, _events) = test_wallet();

    call(&wallet, "eth_chainId", None).await.unwrap();
    call(&wallet, "eth_accounts", None).await.unwrap();

    assert!(transport.methods_called().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn forwarding_keeps_null_results() {
    let (wallet, transport, _events) = test_wallet();
    transport.respond("eth_getTransactionReceipt", json!(null));

    let result = call(
        &wallet,
        "eth_getTransactionReceipt",
        Some(json!([format!("0x{}", "22".repeat(32))])),
    )
    .await
    .unwrap();
    assert_eq!(result, json!(null));
}
