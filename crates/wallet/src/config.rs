//! Wallet configuration with test-friendly defaults.

use crate::{
    authorization::{AuthorizationOracle, AutoApprove},
    chain::{ChainDescriptor, ChainMetadataPolicy},
    events::{EmitFn, WalletEvent, noop_emitter},
    transport::{HttpTransportFactory, TransportFactory},
};
use alloy_primitives::{ChainId, b256};
use alloy_signer_local::PrivateKeySigner;
use std::sync::Arc;
use url::Url;

/// Chain id of the local development node.
pub const DEV_CHAIN_ID: ChainId = 31337;

const DEV_RPC_URL: &str = "http://localhost:8545";

/// Configures a [`WalletProvider`](crate::provider::WalletProvider).
///
/// The default configuration serves the local development chain with one
/// deterministic dev account, approves every request and drops all events.
#[derive(Clone)]
pub struct WalletConfig {
    pub accounts: Vec<PrivateKeySigner>,
    pub chains: Vec<ChainDescriptor>,
    pub active_chain: ChainId,
    pub metadata_policy: ChainMetadataPolicy,
    pub oracle: Arc<dyn AuthorizationOracle>,
    pub transports: Arc<dyn TransportFactory>,
    pub emit: EmitFn,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            accounts: vec![dev_signer()],
            chains: vec![dev_chain()],
            active_chain: DEV_CHAIN_ID,
            metadata_policy: ChainMetadataPolicy::default(),
            oracle: Arc::new(AutoApprove),
            transports: Arc::new(HttpTransportFactory::default()),
            emit: noop_emitter(),
        }
    }
}

impl WalletConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the account set.
    pub fn with_accounts(mut self, accounts: Vec<PrivateKeySigner>) -> Self {
        self.accounts = accounts;
        self
    }

    /// Replaces the chain set; `active` must be among the given chains.
    pub fn with_chains(mut self, chains: Vec<ChainDescriptor>, active: ChainId) -> Self {
        self.chains = chains;
        self.active_chain = active;
        self
    }

    /// Adds one more known chain.
    pub fn with_chain(mut self, chain: ChainDescriptor) -> Self {
        self.chains.push(chain);
        self
    }

    pub fn with_metadata_policy(mut self, policy: ChainMetadataPolicy) -> Self {
        self.metadata_policy = policy;
        self
    }

    pub fn with_oracle(mut self, oracle: Arc<dyn AuthorizationOracle>) -> Self {
        self.oracle = oracle;
        self
    }

    pub fn with_transport_factory(mut self, transports: Arc<dyn TransportFactory>) -> Self {
        self.transports = transports;
        self
    }

    pub fn with_emitter(mut self, emit: EmitFn) -> Self {
        self.emit = emit;
        self
    }

    /// Convenience wrapper around [`with_emitter`](Self::with_emitter) taking
    /// a plain closure.
    pub fn on_event(self, f: impl Fn(WalletEvent) + Send + Sync + 'static) -> Self {
        self.with_emitter(Arc::new(f))
    }
}

/// The well-known first dev-node account.
pub fn dev_signer() -> PrivateKeySigner {
    PrivateKeySigner::from_bytes(&b256!(
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
    ))
    .expect("dev key is a valid secp256k1 scalar")
}

/// The local development chain as served by a dev node on the default port.
pub fn dev_chain() -> ChainDescriptor {
    ChainDescriptor::new(DEV_CHAIN_ID, "dev chain")
        .with_rpc_url(Url::parse(DEV_RPC_URL).expect("default RPC URL is well-formed"))
}
