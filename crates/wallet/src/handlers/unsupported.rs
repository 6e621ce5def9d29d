//! The terminal handler: anything that reaches it is unsupported.

use crate::{
    error::{Result, WalletError},
    handlers::WalletHandler,
};
use async_trait::async_trait;
use headless_wallet_rpc::RpcRequest;
use serde_json::Value;

/// Always registered last; reports the offending method by name.
pub struct UnsupportedHandler;

#[async_trait]
impl WalletHandler for UnsupportedHandler {
    async fn handle(&self, request: &RpcRequest) -> Option<Result<Value>> {
        Some(Err(WalletError::UnsupportedMethod(request.method.clone())))
    }
}
