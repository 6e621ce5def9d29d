//! Forwards anything the wallet does not resolve locally to the active
//! chain's live endpoint.

use crate::{
    chain::ChainRegistry,
    error::Result,
    handlers::WalletHandler,
    transport::{TransportError, TransportFactory},
};
use async_trait::async_trait;
use headless_wallet_rpc::RpcRequest;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Keeps full protocol coverage for read-only queries without reimplementing
/// them: the request goes out verbatim and the endpoint's answer comes back
/// unchanged, including JSON-RPC error objects.
///
/// When no transport can carry the request the handler delegates, so the
/// terminal handler reports the method as unsupported.
pub struct PassthroughHandler {
    registry: Arc<ChainRegistry>,
    transports: Arc<dyn TransportFactory>,
}

impl PassthroughHandler {
    pub fn new(registry: Arc<ChainRegistry>, transports: Arc<dyn TransportFactory>) -> Self {
        Self { registry, transports }
    }
}

#[async_trait]
impl WalletHandler for PassthroughHandler {
    async fn handle(&self, request: &RpcRequest) -> Option<Result<Value>> {
        let chain = self.registry.active();
        let transport = match self.transports.for_chain(&chain) {
            Ok(transport) => transport,
            Err(err) => {
                warn!(
                    target: "wallet::passthrough",
                    method = %request.method, %err, "no usable transport for active chain"
                );
                return None;
            }
        };

        match transport.request(&request.method, request.params.clone()).await {
            Ok(value) => Some(Ok(value)),
            // the endpoint answered; its error is the response
            Err(err @ TransportError::Rpc(_)) => Some(Err(err.into())),
            Err(err) => {
                warn!(
                    target: "wallet::passthrough",
                    method = %request.method, %err, "transport failed to carry request"
                );
                None
            }
        }
    }
}
