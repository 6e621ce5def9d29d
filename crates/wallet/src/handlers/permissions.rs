//! Permission requests: `wallet_requestPermissions` and
//! `wallet_getPermissions`, following EIP-2255.

use crate::{
    error::{Result, WalletError},
    events::{EmitFn, WalletEvent},
    handlers::WalletHandler,
    permissions::{CapabilityKind, GLOBAL_SCOPE, PermissionDescriptor, PermissionSystem},
};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use headless_wallet_rpc::RpcRequest;
use serde_json::{Value, json};
use std::sync::Arc;

pub struct PermissionsHandler {
    wps: Arc<PermissionSystem>,
    accounts: Arc<Vec<PrivateKeySigner>>,
    emit: EmitFn,
}

impl PermissionsHandler {
    pub fn new(
        wps: Arc<PermissionSystem>,
        accounts: Arc<Vec<PrivateKeySigner>>,
        emit: EmitFn,
    ) -> Self {
        Self { wps, accounts, emit }
    }

    /// Validates the requested capabilities, grants them and returns their
    /// descriptions. An unknown capability key fails the whole request.
    fn request_permissions(&self, request: &RpcRequest) -> Result<Value> {
        let requested = request.param(0).and_then(Value::as_object).ok_or_else(|| {
            WalletError::InvalidParams(
                "wallet_requestPermissions expects a permissions request object".to_string(),
            )
        })?;

        let mut kinds = Vec::with_capacity(requested.len());
        for method in requested.keys() {
            let kind = CapabilityKind::from_method(method).ok_or_else(|| {
                WalletError::InvalidParams(format!("unknown capability: {method}"))
            })?;
            kinds.push(kind);
        }

        let mut descriptors = Vec::with_capacity(kinds.len());
        for kind in kinds {
            self.wps.permit(kind, GLOBAL_SCOPE);
            descriptors.push(PermissionDescriptor::new(kind));
            if kind == CapabilityKind::Accounts {
                let addresses = self.accounts.iter().map(|a| a.address()).collect();
                (self.emit)(WalletEvent::AccountsChanged(addresses));
            }
        }
        (self.emit)(WalletEvent::PermissionsChanged(descriptors.clone()));
        Ok(json!(descriptors))
    }

    fn get_permissions(&self) -> Result<Value> {
        let descriptors: Vec<PermissionDescriptor> =
            self.wps.granted().into_iter().map(|(kind, _)| PermissionDescriptor::new(kind)).collect();
        Ok(json!(descriptors))
    }
}

#[async_trait]
impl WalletHandler for PermissionsHandler {
    async fn handle(&self, request: &RpcRequest) -> Option<Result<Value>> {
        match request.method.as_str() {
            "wallet_requestPermissions" => Some(self.request_permissions(request)),
            "wallet_getPermissions" => Some(self.get_permissions()),
            _ => None,
        }
    }
}
