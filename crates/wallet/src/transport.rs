//! The JSON-RPC transport seam towards live chain endpoints.
//!
//! Unrecognized methods and raw-transaction broadcasts leave the wallet
//! through a [`ChainTransport`]; the [`TransportFactory`] hands out one
//! transport per chain so consumers always talk to the currently active one.

use crate::chain::ChainDescriptor;
use alloy_primitives::ChainId;
use async_trait::async_trait;
use headless_wallet_rpc::RpcError;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};
use tracing::trace;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The chain has no RPC endpoint configured.
    #[error("chain {0:#x} has no configured RPC endpoint")]
    MissingEndpoint(ChainId),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("malformed JSON-RPC response: {0}")]
    InvalidResponse(String),
    /// The endpoint answered with a JSON-RPC error object.
    #[error("{0}")]
    Rpc(RpcError),
}

/// A connection to one chain's JSON-RPC endpoint.
#[async_trait]
pub trait ChainTransport: Send + Sync {
    /// Performs a raw JSON-RPC call and returns the `result` value, or the
    /// endpoint's error object as [`TransportError::Rpc`].
    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, TransportError>;
}

/// Hands out transports per chain.
pub trait TransportFactory: Send + Sync {
    fn for_chain(&self, chain: &ChainDescriptor) -> Result<Arc<dyn ChainTransport>, TransportError>;
}

#[derive(Serialize)]
struct RequestEnvelope<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a Value>,
}

#[derive(Deserialize)]
struct ResponseEnvelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

/// JSON-RPC 2.0 over HTTP.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: Url,
    next_id: AtomicU64,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client, url: Url) -> Self {
        Self { client, url, next_id: AtomicU64::new(1) }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ChainTransport for HttpTransport {
    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let envelope =
            RequestEnvelope { jsonrpc: "2.0", id, method, params: params.as_ref() };
        trace!(target: "wallet::transport", %method, url = %self.url, "forwarding request");

        let response = self.client.post(self.url.clone()).json(&envelope).send().await?;
        let body: ResponseEnvelope = response
            .json()
            .await
            .map_err(|err| TransportError::InvalidResponse(err.to_string()))?;

        if let Some(error) = body.error {
            return Err(TransportError::Rpc(error));
        }
        Ok(body.result.unwrap_or(Value::Null))
    }
}

/// Builds and caches one [`HttpTransport`] per chain, keyed by chain id; the
/// first configured RPC endpoint wins.
#[derive(Debug, Default)]
pub struct HttpTransportFactory {
    client: reqwest::Client,
    cache: Mutex<HashMap<ChainId, Arc<HttpTransport>>>,
}

impl HttpTransportFactory {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client, cache: Mutex::new(HashMap::new()) }
    }
}

impl TransportFactory for HttpTransportFactory {
    fn for_chain(&self, chain: &ChainDescriptor) -> Result<Arc<dyn ChainTransport>, TransportError> {
        let url =
            chain.rpc_urls.first().cloned().ok_or(TransportError::MissingEndpoint(chain.id))?;

        let mut cache = self.cache.lock();
        if let Some(cached) = cache.get(&chain.id)
            && *cached.url() == url
        {
            return Ok(cached.clone());
        }
        let transport = Arc::new(HttpTransport::new(self.client.clone(), url));
        cache.insert(chain.id, transport.clone());
        Ok(transport)
    }
}
