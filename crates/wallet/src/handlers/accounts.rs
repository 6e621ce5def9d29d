//! Account exposure: `eth_accounts` and `eth_requestAccounts`.

use crate::{
    error::Result,
    events::{EmitFn, WalletEvent},
    handlers::WalletHandler,
    permissions::{CapabilityKind, GLOBAL_SCOPE, PermissionSystem},
};
use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use headless_wallet_rpc::RpcRequest;
use serde_json::{Value, json};
use std::sync::Arc;

pub struct AccountsHandler {
    accounts: Arc<Vec<PrivateKeySigner>>,
    wps: Arc<PermissionSystem>,
    emit: EmitFn,
}

impl AccountsHandler {
    pub fn new(accounts: Arc<Vec<PrivateKeySigner>>, wps: Arc<PermissionSystem>, emit: EmitFn) -> Self {
        Self { accounts, wps, emit }
    }

    fn addresses(&self) -> Vec<Address> {
        self.accounts.iter().map(|a| a.address()).collect()
    }

    /// Without an account-exposure grant this degrades to an empty list, the
    /// standard wallet privacy behavior; it never fails.
    fn read_accounts(&self) -> Result<Value> {
        let addresses = if self.wps.is_permitted(CapabilityKind::Accounts, GLOBAL_SCOPE) {
            self.addresses()
        } else {
            Vec::new()
        };
        Ok(json!(addresses))
    }

    /// Grants account exposure (idempotently), announces the addresses and
    /// returns them.
    fn request_accounts(&self) -> Result<Value> {
        self.wps.permit(CapabilityKind::Accounts, GLOBAL_SCOPE);

        let addresses = self.addresses();
        (self.emit)(WalletEvent::AccountsChanged(addresses.clone()));
        Ok(json!(addresses))
    }
}

#[async_trait]
impl WalletHandler for AccountsHandler {
    async fn handle(&self, request: &RpcRequest) -> Option<Result<Value>> {
        match request.method.as_str() {
            "eth_accounts" => Some(self.read_accounts()),
            "eth_requestAccounts" => Some(self.request_accounts()),
            _ => None,
        }
    }
}
