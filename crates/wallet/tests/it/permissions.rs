//! EIP-2255 permission request tests.

use crate::utils::{call, test_wallet};
use headless_wallet::{CapabilityKind, GLOBAL_SCOPE, WalletEvent, dev_signer};
use headless_wallet_rpc::ErrorCode;
use serde_json::json;

#[tokio::test(flavor = "multi_thread")]
async fn request_permissions_grants_and_describes() {
    let (wallet, _transport, events) = test_wallet();

    let result =
        call(&wallet, "wallet_requestPermissions", Some(json!([{ "eth_accounts": {} }])))
            .await
            .unwrap();
    assert_eq!(result, json!([{ "parentCapability": "eth_accounts", "caveats": [] }]));
    assert!(wallet.permissions().is_permitted(CapabilityKind::Accounts, GLOBAL_SCOPE));

    // the grant makes eth_accounts visible
    let accounts = call(&wallet, "eth_accounts", None).await.unwrap();
    assert_eq!(accounts, json!([dev_signer().address()]));

    let events = events.lock();
    assert!(events.iter().any(|e| matches!(e, WalletEvent::AccountsChanged(_))));
    assert!(events.iter().any(|e| matches!(e, WalletEvent::PermissionsChanged(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_capability_is_rejected_whole() {
    let (wallet, _transport, _events) = test_wallet();

    let err = call(
        &wallet,
        "wallet_requestPermissions",
        Some(json!([{ "eth_accounts": {}, "eth_mining": {} }])),
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidParams);
    assert!(err.message.contains("eth_mining"));

    // nothing was granted
    assert!(!wallet.permissions().is_permitted(CapabilityKind::Accounts, GLOBAL_SCOPE));
}

#[tokio::test(flavor = "multi_thread")]
async fn get_permissions_reflects_current_grants() {
    let (wallet, _transport, _events) = test_wallet();

    let none = call(&wallet, "wallet_getPermissions", None).await.unwrap();
    assert_eq!(none, json!([]));

    call(&wallet, "eth_requestAccounts", None).await.unwrap();

    let granted = call(&wallet, "wallet_getPermissions", None).await.unwrap();
    assert_eq!(granted, json!([{ "parentCapability": "eth_accounts", "caveats": [] }]));
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_permission_payload_fails() {
    let (wallet, _transport, _events) = test_wallet();

    let err = call(&wallet, "wallet_requestPermissions", Some(json!(["eth_accounts"])))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidParams);

    let err = call(&wallet, "wallet_requestPermissions", None).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidParams);
}
