//! The assembled wallet provider.

use crate::{
    authorization::AuthorizationOracle,
    chain::{ChainMetadataPolicy, ChainRegistry},
    config::WalletConfig,
    engine::RpcEngine,
    error::Result,
    events::{EmitFn, WalletEvent},
    handlers::{
        AccountsHandler, ChainHandler, PassthroughHandler, PermissionsHandler, SignHandler,
        TransactionHandler, UnsupportedHandler,
    },
    permissions::PermissionSystem,
    submit::SignAndBroadcast,
    transport::TransportFactory,
};
use alloy_primitives::{Address, ChainId};
use alloy_signer_local::PrivateKeySigner;
use headless_wallet_rpc::{ResponseResult, RpcRequest};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// A headless, EIP-1193-style wallet provider.
///
/// Cheap to share behind an [`Arc`]; any number of requests may be dispatched
/// concurrently.
pub struct WalletProvider {
    accounts: RwLock<Arc<Vec<PrivateKeySigner>>>,
    wps: Arc<PermissionSystem>,
    registry: Arc<ChainRegistry>,
    transports: Arc<dyn TransportFactory>,
    oracle: Arc<dyn AuthorizationOracle>,
    metadata_policy: ChainMetadataPolicy,
    emit: EmitFn,
    engine: RwLock<Arc<RpcEngine>>,
}

impl WalletProvider {
    /// Builds the provider and its handler pipeline from `config`. Fails if
    /// the configured active chain is not among the known chains.
    pub fn new(config: WalletConfig) -> Result<Self> {
        let WalletConfig {
            accounts,
            chains,
            active_chain,
            metadata_policy,
            oracle,
            transports,
            emit,
        } = config;

        let registry = Arc::new(ChainRegistry::new(chains, active_chain)?);
        let wps = Arc::new(PermissionSystem::new());
        let accounts = Arc::new(accounts);
        let engine = build_pipeline(
            &accounts,
            &wps,
            &registry,
            &transports,
            &oracle,
            metadata_policy,
            &emit,
        );

        Ok(Self {
            accounts: RwLock::new(accounts),
            wps,
            registry,
            transports,
            oracle,
            metadata_policy,
            emit,
            engine: RwLock::new(Arc::new(engine)),
        })
    }

    /// Dispatches one request through the pipeline and resolves once it
    /// settles.
    ///
    /// Requests already in flight when the account set is replaced keep the
    /// pipeline they started with.
    pub async fn request(&self, request: RpcRequest) -> ResponseResult {
        let engine = self.engine.read().clone();
        engine.dispatch(request).await
    }

    /// Atomically replaces the account set and rebuilds the handler chain so
    /// signing and transaction handlers re-bind to the new first account.
    pub fn replace_accounts(&self, accounts: Vec<PrivateKeySigner>) {
        let accounts = Arc::new(accounts);
        let engine = build_pipeline(
            &accounts,
            &self.wps,
            &self.registry,
            &self.transports,
            &self.oracle,
            self.metadata_policy,
            &self.emit,
        );

        let addresses: Vec<Address> = accounts.iter().map(|a| a.address()).collect();
        debug!(target: "wallet::provider", accounts = addresses.len(), "account set replaced");
        *self.accounts.write() = accounts;
        *self.engine.write() = Arc::new(engine);
        (self.emit)(WalletEvent::AccountsChanged(addresses));
    }

    /// The configured account addresses, in configuration order.
    pub fn addresses(&self) -> Vec<Address> {
        self.accounts.read().iter().map(|a| a.address()).collect()
    }

    /// The currently active chain id.
    pub fn chain_id(&self) -> ChainId {
        self.registry.active_id()
    }

    /// The chain registry shared with the pipeline.
    pub fn chain_registry(&self) -> &Arc<ChainRegistry> {
        &self.registry
    }

    /// The permission system shared with the pipeline.
    pub fn permissions(&self) -> &Arc<PermissionSystem> {
        &self.wps
    }
}

/// Assembles the handler chain in its fixed order. The authorization gate sits
/// in front of every handler; the terminal handler is always last.
fn build_pipeline(
    accounts: &Arc<Vec<PrivateKeySigner>>,
    wps: &Arc<PermissionSystem>,
    registry: &Arc<ChainRegistry>,
    transports: &Arc<dyn TransportFactory>,
    oracle: &Arc<dyn AuthorizationOracle>,
    metadata_policy: ChainMetadataPolicy,
    emit: &EmitFn,
) -> RpcEngine {
    let mut engine = RpcEngine::new(oracle.clone());

    engine.register(AccountsHandler::new(accounts.clone(), wps.clone(), emit.clone()));
    if let Some(account) = accounts.first() {
        engine.register(SignHandler::new(account.clone()));
    }
    engine.register(ChainHandler::new(registry.clone(), metadata_policy, emit.clone()));
    if let Some(account) = accounts.first() {
        let submitter =
            SignAndBroadcast::new(account.clone(), registry.clone(), transports.clone());
        engine.register(TransactionHandler::new(Arc::new(submitter)));
    }
    engine.register(PermissionsHandler::new(wps.clone(), accounts.clone(), emit.clone()));
    engine.register(PassthroughHandler::new(registry.clone(), transports.clone()));
    engine.register(UnsupportedHandler);

    engine
}
