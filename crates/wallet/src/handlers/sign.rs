//! Message signing: `personal_sign` and `eth_signTypedData_v4`.

use crate::{error::{Result, WalletError}, handlers::WalletHandler};
use alloy_dyn_abi::TypedData;
use alloy_primitives::hex;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use headless_wallet_rpc::RpcRequest;
use serde_json::{Value, json};

/// Signs messages with the configured account. Decoding and signer failures
/// propagate to the caller unmodified.
pub struct SignHandler {
    account: PrivateKeySigner,
}

impl SignHandler {
    pub fn new(account: PrivateKeySigner) -> Self {
        Self { account }
    }

    /// EIP-191 signature over the hex-decoded message.
    async fn personal_sign(&self, request: &RpcRequest) -> Result<Value> {
        let message = request.param(0).and_then(Value::as_str).ok_or_else(|| {
            WalletError::InvalidParams(
                "personal_sign expects a hex-encoded message as its first parameter".to_string(),
            )
        })?;
        let message = hex::decode(message)?;

        let signature = self.account.sign_message(&message).await?;
        Ok(json!(hex::encode_prefixed(signature.as_bytes())))
    }

    /// EIP-712 signature over the structured payload in the second parameter.
    async fn sign_typed_data_v4(&self, request: &RpcRequest) -> Result<Value> {
        let payload = request.param(1).ok_or_else(|| {
            WalletError::InvalidParams(
                "eth_signTypedData_v4 expects typed data as its second parameter".to_string(),
            )
        })?;
        let typed_data: TypedData = match payload {
            Value::String(raw) => serde_json::from_str(raw),
            other => serde_json::from_value(other.clone()),
        }
        .map_err(|err| WalletError::InvalidParams(format!("malformed typed data: {err}")))?;

        let signature = self.account.sign_dynamic_typed_data(&typed_data).await?;
        Ok(json!(hex::encode_prefixed(signature.as_bytes())))
    }
}

#[async_trait]
impl WalletHandler for SignHandler {
    async fn handle(&self, request: &RpcRequest) -> Option<Result<Value>> {
        match request.method.as_str() {
            "personal_sign" => Some(self.personal_sign(request).await),
            "eth_signTypedData_v4" => Some(self.sign_typed_data_v4(request).await),
            _ => None,
        }
    }
}
