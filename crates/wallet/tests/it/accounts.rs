//! Account exposure tests.

use crate::utils::{call, second_signer, test_wallet};
use headless_wallet::{CapabilityKind, GLOBAL_SCOPE, WalletEvent, dev_signer};
use serde_json::json;

#[tokio::test(flavor = "multi_thread")]
async fn read_accounts_before_grant_is_empty() {
    let (wallet, _transport, _events) = test_wallet();

    let accounts = call(&wallet, "eth_accounts", None).await.unwrap();
    assert_eq!(accounts, json!([]));
    assert!(!wallet.permissions().is_permitted(CapabilityKind::Accounts, GLOBAL_SCOPE));
}

#[tokio::test(flavor = "multi_thread")]
async fn request_accounts_grants_and_announces() {
    let (wallet, _transport, events) = test_wallet();
    let expected = json!([dev_signer().address()]);

    let accounts = call(&wallet, "eth_requestAccounts", None).await.unwrap();
    assert_eq!(accounts, expected);
    assert!(wallet.permissions().is_permitted(CapabilityKind::Accounts, GLOBAL_SCOPE));

    // the grant is observable through eth_accounts afterwards
    let accounts = call(&wallet, "eth_accounts", None).await.unwrap();
    assert_eq!(accounts, expected);

    let events = events.lock();
    assert_eq!(*events, vec![WalletEvent::AccountsChanged(vec![dev_signer().address()])]);
}

#[tokio::test(flavor = "multi_thread")]
async fn request_accounts_is_idempotent() {
    let (wallet, _transport, events) = test_wallet();

    let first = call(&wallet, "eth_requestAccounts", None).await.unwrap();
    let second = call(&wallet, "eth_requestAccounts", None).await.unwrap();
    assert_eq!(first, second);

    // every call re-announces the addresses
    let announced = events
        .lock()
        .iter()
        .filter(|e| matches!(e, WalletEvent::AccountsChanged(_)))
        .count();
    assert_eq!(announced, 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn replace_accounts_rebinds_handlers() {
    let (wallet, _transport, events) = test_wallet();
    assert_eq!(wallet.addresses(), vec![dev_signer().address()]);

    wallet.replace_accounts(vec![second_signer()]);
    assert_eq!(wallet.addresses(), vec![second_signer().address()]);

    // the swap itself announces the new set
    assert_eq!(
        events.lock().last(),
        Some(&WalletEvent::AccountsChanged(vec![second_signer().address()]))
    );

    let accounts = call(&wallet, "eth_requestAccounts", None).await.unwrap();
    assert_eq!(accounts, json!([second_signer().address()]));
}
