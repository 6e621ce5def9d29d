//! Chain state: `eth_chainId`, `net_version`, `wallet_addEthereumChain` and
//! `wallet_switchEthereumChain`.

use crate::{
    chain::{AddChainRequest, ChainMetadataPolicy, ChainRegistry, SwitchChainRequest},
    error::{Result, WalletError},
    events::{EmitFn, WalletEvent},
    handlers::WalletHandler,
};
use async_trait::async_trait;
use headless_wallet_rpc::RpcRequest;
use serde_json::{Value, json};
use std::sync::Arc;

pub struct ChainHandler {
    registry: Arc<ChainRegistry>,
    policy: ChainMetadataPolicy,
    emit: EmitFn,
}

impl ChainHandler {
    pub fn new(registry: Arc<ChainRegistry>, policy: ChainMetadataPolicy, emit: EmitFn) -> Self {
        Self { registry, policy, emit }
    }

    fn chain_id(&self) -> Result<Value> {
        Ok(json!(format!("0x{:x}", self.registry.active_id())))
    }

    fn network_version(&self) -> Result<Value> {
        Ok(json!(self.registry.active_id()))
    }

    fn add_chain(&self, request: &RpcRequest) -> Result<Value> {
        let add: AddChainRequest = parse_object_param(request, "wallet_addEthereumChain")?;
        self.registry.add_chain(self.policy.describe(add));
        Ok(Value::Null)
    }

    /// Switching to the already-active chain is a no-op; switching to an
    /// unknown chain is an error (EIP-3326 code 4902).
    fn switch_chain(&self, request: &RpcRequest) -> Result<Value> {
        let switch: SwitchChainRequest = parse_object_param(request, "wallet_switchEthereumChain")?;
        if self.registry.switch(switch.chain_id)? {
            (self.emit)(WalletEvent::ChainChanged(switch.chain_id));
        }
        Ok(Value::Null)
    }
}

fn parse_object_param<T: serde::de::DeserializeOwned>(
    request: &RpcRequest,
    method: &str,
) -> Result<T> {
    let param = request
        .param(0)
        .ok_or_else(|| WalletError::InvalidParams(format!("{method} expects a parameter object")))?;
    serde_json::from_value(param.clone())
        .map_err(|err| WalletError::InvalidParams(format!("{method}: {err}")))
}

#[async_trait]
impl WalletHandler for ChainHandler {
    async fn handle(&self, request: &RpcRequest) -> Option<Result<Value>> {
        match request.method.as_str() {
            "eth_chainId" => Some(self.chain_id()),
            "net_version" => Some(self.network_version()),
            "wallet_addEthereumChain" => Some(self.add_chain(request)),
            "wallet_switchEthereumChain" => Some(self.switch_chain(request)),
            _ => None,
        }
    }
}
