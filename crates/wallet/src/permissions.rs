//! Tracks which capabilities the dApp has been granted.
//!
//! Grants follow [EIP-2255](https://eips.ethereum.org/EIPS/eip-2255): a
//! capability is keyed by the restricted method it unlocks plus a scope string
//! (the empty string is the global scope). Grants are monotonic; this core
//! exposes no revoke operation.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::trace;

/// The scope used when a grant is not tied to a specific origin.
pub const GLOBAL_SCOPE: &str = "";

/// The classes of provider requests a dApp can be granted or asked to
/// authorize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CapabilityKind {
    /// Exposure of the configured account addresses.
    Accounts,
    SendTransaction,
    SignMessage,
    SignTypedData,
    AddChain,
    SwitchChain,
    RequestPermissions,
}

impl CapabilityKind {
    /// Classifies a request method into its capability kind.
    pub fn from_method(method: &str) -> Option<Self> {
        let kind = match method {
            "eth_accounts" | "eth_requestAccounts" => Self::Accounts,
            "eth_sendTransaction" => Self::SendTransaction,
            "personal_sign" => Self::SignMessage,
            "eth_signTypedData_v4" => Self::SignTypedData,
            "wallet_addEthereumChain" => Self::AddChain,
            "wallet_switchEthereumChain" => Self::SwitchChain,
            "wallet_requestPermissions" => Self::RequestPermissions,
            _ => return None,
        };
        Some(kind)
    }

    /// The restricted method this capability unlocks, as used in EIP-2255
    /// permission payloads.
    pub const fn as_method(&self) -> &'static str {
        match self {
            Self::Accounts => "eth_accounts",
            Self::SendTransaction => "eth_sendTransaction",
            Self::SignMessage => "personal_sign",
            Self::SignTypedData => "eth_signTypedData_v4",
            Self::AddChain => "wallet_addEthereumChain",
            Self::SwitchChain => "wallet_switchEthereumChain",
            Self::RequestPermissions => "wallet_requestPermissions",
        }
    }
}

/// An EIP-2255 permission description returned from the permission-request
/// methods.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionDescriptor {
    pub parent_capability: String,
    pub caveats: Vec<Value>,
}

impl PermissionDescriptor {
    pub fn new(kind: CapabilityKind) -> Self {
        Self { parent_capability: kind.as_method().to_string(), caveats: Vec::new() }
    }
}

/// The set of `(capability, scope)` pairs currently granted.
///
/// Safe for concurrent use; a grant observed by `permit` is visible to every
/// subsequent `is_permitted` call.
#[derive(Debug, Default)]
pub struct PermissionSystem {
    granted: RwLock<HashSet<(CapabilityKind, String)>>,
}

impl PermissionSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `kind` for `scope`. Granting an already-granted pair is a no-op.
    pub fn permit(&self, kind: CapabilityKind, scope: &str) {
        let inserted = self.granted.write().insert((kind, scope.to_string()));
        if inserted {
            trace!(target: "wallet::permissions", ?kind, scope, "capability granted");
        }
    }

    /// Whether `kind` has been granted for `scope`.
    pub fn is_permitted(&self, kind: CapabilityKind, scope: &str) -> bool {
        self.granted.read().iter().any(|(k, s)| *k == kind && s == scope)
    }

    /// Snapshot of all current grants.
    pub fn granted(&self) -> Vec<(CapabilityKind, String)> {
        let mut grants: Vec<_> = self.granted.read().iter().cloned().collect();
        grants.sort_by_key(|(kind, _)| kind.as_method());
        grants
    }
}
