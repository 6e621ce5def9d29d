//! Message signing tests.

use crate::utils::{call, test_wallet};
use alloy_dyn_abi::TypedData;
use alloy_primitives::{Signature, hex};
use alloy_signer::Signer;
use headless_wallet::dev_signer;
use headless_wallet_rpc::ErrorCode;
use serde_json::json;

#[tokio::test(flavor = "multi_thread")]
async fn personal_sign_produces_recoverable_signature() {
    let (wallet, _transport, _events) = test_wallet();

    // "hello", hex-encoded the way dApps send it
    let result =
        call(&wallet, "personal_sign", Some(json!(["0x68656c6c6f", wallet.addresses()[0]])))
            .await
            .unwrap();
    let sig_hex = result.as_str().unwrap();

    let expected = dev_signer().sign_message(b"hello").await.unwrap();
    assert_eq!(sig_hex, hex::encode_prefixed(expected.as_bytes()));

    // the signature independently verifies to the signer's address
    let signature = Signature::from_raw(&hex::decode(sig_hex).unwrap()).unwrap();
    assert_eq!(signature.recover_address_from_msg(b"hello").unwrap(), dev_signer().address());
}

#[tokio::test(flavor = "multi_thread")]
async fn typed_data_v4_signs_json_string_payload() {
    let (wallet, _transport, _events) = test_wallet();
    let typed_json = json!({
        "types": {
            "EIP712Domain": [
                { "name": "name", "type": "string" },
                { "name": "chainId", "type": "uint256" },
            ],
            "Person": [
                { "name": "name", "type": "string" },
                { "name": "wallet", "type": "address" },
            ],
        },
        "primaryType": "Person",
        "domain": { "name": "Test", "chainId": 31337 },
        "message": {
            "name": "Alice",
            "wallet": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
        },
    });

    let result = call(
        &wallet,
        "eth_signTypedData_v4",
        Some(json!([wallet.addresses()[0], typed_json.to_string()])),
    )
    .await
    .unwrap();

    let typed: TypedData = serde_json::from_value(typed_json).unwrap();
    let expected = dev_signer().sign_dynamic_typed_data(&typed).await.unwrap();
    assert_eq!(result, json!(hex::encode_prefixed(expected.as_bytes())));
}

#[tokio::test(flavor = "multi_thread")]
async fn typed_data_v4_accepts_object_payload() {
    let (wallet, _transport, _events) = test_wallet();
    let typed_json = json!({
        "types": {
            "EIP712Domain": [{ "name": "name", "type": "string" }],
            "Ping": [{ "name": "value", "type": "uint256" }],
        },
        "primaryType": "Ping",
        "domain": { "name": "Test" },
        "message": { "value": 1 },
    });

    let from_object = call(
        &wallet,
        "eth_signTypedData_v4",
        Some(json!([wallet.addresses()[0], typed_json])),
    )
    .await
    .unwrap();
    assert!(from_object.as_str().unwrap().starts_with("0x"));
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_message_errors_propagate() {
    let (wallet, _transport, _events) = test_wallet();

    let err = call(&wallet, "personal_sign", Some(json!(["0xzz", wallet.addresses()[0]])))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InternalError);

    let err = call(&wallet, "personal_sign", None).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidParams);

    let err = call(&wallet, "eth_signTypedData_v4", Some(json!([wallet.addresses()[0], "{not json"])))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidParams);
}
