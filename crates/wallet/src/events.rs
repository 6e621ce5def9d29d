//! Provider events surfaced to the host environment.
//!
//! Delivery into the page context is a collaborator concern; the wallet only
//! invokes the configured [`EmitFn`] callback with the event value.

use crate::permissions::PermissionDescriptor;
use alloy_primitives::{Address, ChainId};
use serde_json::{Value, json};
use std::sync::Arc;

/// An [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193) provider event.
#[derive(Clone, Debug, PartialEq)]
pub enum WalletEvent {
    AccountsChanged(Vec<Address>),
    ChainChanged(ChainId),
    PermissionsChanged(Vec<PermissionDescriptor>),
}

impl WalletEvent {
    /// The EIP-1193 event name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AccountsChanged(_) => "accountsChanged",
            Self::ChainChanged(_) => "chainChanged",
            Self::PermissionsChanged(_) => "permissionsChanged",
        }
    }

    /// The event payload as it is delivered to the page.
    pub fn payload(&self) -> Value {
        match self {
            Self::AccountsChanged(addresses) => json!(addresses),
            // chainChanged carries the hex-encoded chain id
            Self::ChainChanged(id) => json!(format!("0x{id:x}")),
            Self::PermissionsChanged(descriptors) => json!(descriptors),
        }
    }
}

/// Callback invoked for every emitted event.
pub type EmitFn = Arc<dyn Fn(WalletEvent) + Send + Sync>;

/// An emitter that drops every event, for wallets whose host does not observe
/// them.
pub fn noop_emitter() -> EmitFn {
    Arc::new(|_| {})
}
