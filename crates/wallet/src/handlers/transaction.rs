//! Transaction submission: `eth_sendTransaction`.

use crate::{
    error::{Result, WalletError},
    handlers::WalletHandler,
    submit::TransactionSubmitter,
};
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;
use headless_wallet_rpc::RpcRequest;
use serde_json::{Value, json};
use std::sync::Arc;

/// Hands the request's transaction object to the submission capability bound
/// at construction time. Submission failures are reported to the caller, never
/// swallowed.
pub struct TransactionHandler {
    submitter: Arc<dyn TransactionSubmitter>,
}

impl TransactionHandler {
    pub fn new(submitter: Arc<dyn TransactionSubmitter>) -> Self {
        Self { submitter }
    }

    async fn send_transaction(&self, request: &RpcRequest) -> Result<Value> {
        let param = request.param(0).ok_or_else(|| {
            WalletError::InvalidParams(
                "eth_sendTransaction expects a transaction object as its first parameter"
                    .to_string(),
            )
        })?;
        let tx: TransactionRequest = serde_json::from_value(param.clone()).map_err(|err| {
            WalletError::InvalidParams(format!("malformed transaction request: {err}"))
        })?;

        let hash = self.submitter.submit(tx).await?;
        Ok(json!(hash))
    }
}

#[async_trait]
impl WalletHandler for TransactionHandler {
    async fn handle(&self, request: &RpcRequest) -> Option<Result<Value>> {
        match request.method.as_str() {
            "eth_sendTransaction" => Some(self.send_transaction(request).await),
            _ => None,
        }
    }
}
