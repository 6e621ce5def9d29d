//! The set of chains the wallet knows about and the currently active one.

use crate::error::{Result, WalletError};
use alloy_primitives::ChainId;
use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Native currency metadata of a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl NativeCurrency {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self { name: name.into(), symbol: symbol.into(), decimals }
    }

    /// Ether, as configured on mainnet-like chains.
    pub fn ether() -> Self {
        Self::new("Ether", "ETH", 18)
    }
}

/// A chain known to the wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainDescriptor {
    pub id: ChainId,
    pub name: String,
    pub native_currency: NativeCurrency,
    /// RPC endpoints serving this chain; the first entry is used for
    /// pass-through and broadcast.
    pub rpc_urls: Vec<Url>,
}

impl ChainDescriptor {
    pub fn new(id: ChainId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), native_currency: NativeCurrency::ether(), rpc_urls: Vec::new() }
    }

    pub fn with_rpc_url(mut self, url: Url) -> Self {
        self.rpc_urls.push(url);
        self
    }

    pub fn with_native_currency(mut self, currency: NativeCurrency) -> Self {
        self.native_currency = currency;
        self
    }
}

/// The `wallet_addEthereumChain` parameter object, see
/// [EIP-3085](https://eips.ethereum.org/EIPS/eip-3085).
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainRequest {
    #[serde(deserialize_with = "deserialize_chain_id")]
    pub chain_id: ChainId,
    #[serde(default)]
    pub chain_name: Option<String>,
    #[serde(default)]
    pub rpc_urls: Vec<Url>,
    #[serde(default)]
    pub native_currency: Option<NativeCurrency>,
}

/// The `wallet_switchEthereumChain` parameter object, see
/// [EIP-3326](https://eips.ethereum.org/EIPS/eip-3326).
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchChainRequest {
    #[serde(deserialize_with = "deserialize_chain_id")]
    pub chain_id: ChainId,
}

/// Parses a chain id given as a JSON number, a decimal string or a `0x`-hex
/// string, the way dApps send them.
pub fn parse_chain_id(s: &str) -> Option<ChainId> {
    match s.strip_prefix("0x") {
        Some(hex) => ChainId::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

fn deserialize_chain_id<'de, D>(deserializer: D) -> std::result::Result<ChainId, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().ok_or_else(|| D::Error::custom("chain id out of range")),
        Value::String(s) => {
            parse_chain_id(&s).ok_or_else(|| D::Error::custom(format!("invalid chain id: {s}")))
        }
        other => Err(D::Error::custom(format!("invalid chain id: {other}"))),
    }
}

/// Controls which metadata a chain added via `wallet_addEthereumChain` ends up
/// with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChainMetadataPolicy {
    /// Fixed placeholder name and currency, regardless of the payload.
    #[default]
    Placeholder,
    /// Name and currency taken from the payload where present.
    FromRequest,
}

const PLACEHOLDER_CHAIN_NAME: &str = "test chain";
const PLACEHOLDER_CURRENCY_NAME: &str = "test currency";
const PLACEHOLDER_CURRENCY_SYMBOL: &str = "ETH";
const PLACEHOLDER_CURRENCY_DECIMALS: u8 = 10;

impl ChainMetadataPolicy {
    fn placeholder_currency() -> NativeCurrency {
        NativeCurrency::new(
            PLACEHOLDER_CURRENCY_NAME,
            PLACEHOLDER_CURRENCY_SYMBOL,
            PLACEHOLDER_CURRENCY_DECIMALS,
        )
    }

    /// Builds the descriptor for an added chain. RPC endpoints always come
    /// from the payload; only name and currency are policy-dependent.
    pub fn describe(&self, request: AddChainRequest) -> ChainDescriptor {
        let (name, native_currency) = match self {
            Self::Placeholder => {
                (PLACEHOLDER_CHAIN_NAME.to_string(), Self::placeholder_currency())
            }
            Self::FromRequest => (
                request.chain_name.unwrap_or_else(|| PLACEHOLDER_CHAIN_NAME.to_string()),
                request.native_currency.unwrap_or_else(Self::placeholder_currency),
            ),
        };
        ChainDescriptor { id: request.chain_id, name, native_currency, rpc_urls: request.rpc_urls }
    }
}

#[derive(Debug)]
struct RegistryInner {
    chains: Vec<ChainDescriptor>,
    active: ChainId,
}

/// The registry of known chains plus the currently active one.
///
/// The active id always references a descriptor present in the set.
#[derive(Debug)]
pub struct ChainRegistry {
    inner: RwLock<RegistryInner>,
}

impl ChainRegistry {
    /// Creates a registry from the initial chain set. Fails if `active` is not
    /// among `chains`.
    pub fn new(chains: Vec<ChainDescriptor>, active: ChainId) -> Result<Self> {
        if !chains.iter().any(|c| c.id == active) {
            return Err(WalletError::UnknownChain(active));
        }
        Ok(Self { inner: RwLock::new(RegistryInner { chains, active }) })
    }

    /// The currently active chain.
    pub fn active(&self) -> ChainDescriptor {
        let inner = self.inner.read();
        inner
            .chains
            .iter()
            .find(|c| c.id == inner.active)
            .cloned()
            .expect("active chain is always present in the registry")
    }

    /// The currently active chain id.
    pub fn active_id(&self) -> ChainId {
        self.inner.read().active
    }

    pub fn contains(&self, id: ChainId) -> bool {
        self.inner.read().chains.iter().any(|c| c.id == id)
    }

    /// Inserts `descriptor`; re-adding a known id replaces its entry.
    pub fn add_chain(&self, descriptor: ChainDescriptor) {
        let mut inner = self.inner.write();
        debug!(target: "wallet::chain", id = descriptor.id, name = %descriptor.name, "chain added");
        if let Some(existing) = inner.chains.iter_mut().find(|c| c.id == descriptor.id) {
            *existing = descriptor;
        } else {
            inner.chains.push(descriptor);
        }
    }

    /// Makes `id` the active chain. Returns `Ok(false)` if it already was,
    /// `Ok(true)` if the active chain changed.
    pub fn switch(&self, id: ChainId) -> Result<bool> {
        let mut inner = self.inner.write();
        if inner.active == id {
            return Ok(false);
        }
        if !inner.chains.iter().any(|c| c.id == id) {
            return Err(WalletError::UnknownChain(id));
        }
        debug!(target: "wallet::chain", from = inner.active, to = id, "active chain switched");
        inner.active = id;
        Ok(true)
    }

    /// Snapshot of all known chains.
    pub fn chains(&self) -> Vec<ChainDescriptor> {
        self.inner.read().chains.clone()
    }
}
