//! Shared helpers for the integration tests.

use async_trait::async_trait;
use headless_wallet::{
    ChainDescriptor, ChainTransport, EmitFn, TransportError, TransportFactory, WalletConfig,
    WalletEvent, WalletProvider,
};
use headless_wallet_rpc::{RpcError, RpcRequest};
use parking_lot::Mutex;
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};

/// Anvil's second well-known dev account.
pub fn second_signer() -> alloy_signer_local::PrivateKeySigner {
    "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d"
        .parse()
        .expect("well-known dev key")
}

/// A scriptable in-memory chain endpoint recording every call.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<String, Value>>,
    errors: Mutex<HashMap<String, RpcError>>,
    calls: Mutex<Vec<(String, Option<Value>)>>,
}

impl MockTransport {
    pub fn respond(&self, method: &str, value: Value) {
        self.responses.lock().insert(method.to_string(), value);
    }

    pub fn fail(&self, method: &str, error: RpcError) {
        self.errors.lock().insert(method.to_string(), error);
    }

    pub fn methods_called(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(method, _)| method.clone()).collect()
    }

    pub fn calls_for(&self, method: &str) -> Vec<Option<Value>> {
        self.calls
            .lock()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params.clone())
            .collect()
    }
}

#[async_trait]
impl ChainTransport for MockTransport {
    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, TransportError> {
        self.calls.lock().push((method.to_string(), params));
        if let Some(error) = self.errors.lock().get(method) {
            return Err(TransportError::Rpc(error.clone()));
        }
        self.responses
            .lock()
            .get(method)
            .cloned()
            .ok_or_else(|| TransportError::InvalidResponse(format!("no canned response for {method}")))
    }
}

/// Hands the same mock transport out for every chain.
pub struct MockTransportFactory(pub Arc<MockTransport>);

impl TransportFactory for MockTransportFactory {
    fn for_chain(&self, _chain: &ChainDescriptor) -> Result<Arc<dyn ChainTransport>, TransportError> {
        Ok(self.0.clone())
    }
}

pub type Events = Arc<Mutex<Vec<WalletEvent>>>;

/// An emitter that records every event for later assertions.
pub fn recording_emitter() -> (EmitFn, Events) {
    let events: Events = Arc::default();
    let sink = events.clone();
    (Arc::new(move |event| sink.lock().push(event)), events)
}

/// A wallet with the default dev setup, a mock transport and a recording
/// emitter.
pub fn test_wallet() -> (Arc<WalletProvider>, Arc<MockTransport>, Events) {
    test_wallet_with(WalletConfig::default())
}

pub fn test_wallet_with(config: WalletConfig) -> (Arc<WalletProvider>, Arc<MockTransport>, Events) {
    let transport = Arc::new(MockTransport::default());
    let (emit, events) = recording_emitter();
    let config = config
        .with_transport_factory(Arc::new(MockTransportFactory(transport.clone())))
        .with_emitter(emit);
    let wallet = WalletProvider::new(config).expect("valid test config");
    (Arc::new(wallet), transport, events)
}

/// Dispatches `method` and unwraps the response envelope.
pub async fn call(
    wallet: &WalletProvider,
    method: &str,
    params: Option<Value>,
) -> Result<Value, RpcError> {
    wallet.request(RpcRequest::new(method, params)).await.into_result()
}
