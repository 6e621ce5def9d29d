//! The request-processing pipeline: an ordered chain of method handlers
//! behind the authorization gate.

use crate::{
    authorization::AuthorizationOracle,
    error::ToRpcResponseResult,
    handlers::WalletHandler,
};
use headless_wallet_rpc::{ResponseResult, RpcRequest};
use serde_json::Value;
use std::sync::Arc;
use tracing::{trace, warn};

/// Executes requests against a fixed, ordered chain of [`WalletHandler`]s.
///
/// Dispatch first suspends on the authorization gate; once approved, handlers
/// run in registration order and the first one that recognizes the method
/// produces the response. The engine holds no per-request state, so any number
/// of dispatches may be in flight concurrently.
pub struct RpcEngine {
    oracle: Arc<dyn AuthorizationOracle>,
    handlers: Vec<Box<dyn WalletHandler>>,
}

impl RpcEngine {
    pub fn new(oracle: Arc<dyn AuthorizationOracle>) -> Self {
        Self { oracle, handlers: Vec::new() }
    }

    /// Appends `handler` to the chain.
    pub fn register<H: WalletHandler + 'static>(&mut self, handler: H) {
        self.handlers.push(Box::new(handler));
    }

    /// Runs the full chain against one request and resolves once it settles.
    pub async fn dispatch(&self, request: RpcRequest) -> ResponseResult {
        trace!(target: "wallet::rpc", method = %request.method, "dispatching request");
        let proceed = Box::pin(self.run_handlers(&request));
        self.oracle.authorize(&request, proceed).await
    }

    async fn run_handlers(&self, request: &RpcRequest) -> ResponseResult {
        for handler in &self.handlers {
            if let Some(outcome) = handler.handle(request).await {
                if let Err(err) = &outcome {
                    warn!(target: "wallet::rpc", method = %request.method, %err, "request failed");
                }
                return outcome.to_rpc_result();
            }
        }
        // ran past the last handler without anyone recognizing the method;
        // with the terminal handler registered this is unreachable
        ResponseResult::Success(Value::Null)
    }
}
