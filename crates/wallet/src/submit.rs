//! Signing and broadcasting transactions through the active chain.

use crate::{
    chain::ChainRegistry,
    error::{Result, WalletError},
    transport::{ChainTransport, TransportError, TransportFactory},
};
use alloy_eips::eip2718::Encodable2718;
use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_primitives::{Address, TxHash, hex};
use alloy_rpc_types::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

/// The external capability that turns a transaction request into a broadcast
/// transaction hash.
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    async fn submit(&self, tx: TransactionRequest) -> Result<TxHash>;
}

/// Signs with the configured account and broadcasts over the active chain's
/// transport.
///
/// Bound to the account at construction; the transport is looked up per
/// submission so a chain switch is picked up immediately.
pub struct SignAndBroadcast {
    wallet: EthereumWallet,
    sender: Address,
    registry: Arc<ChainRegistry>,
    transports: Arc<dyn TransportFactory>,
}

impl SignAndBroadcast {
    pub fn new(
        account: PrivateKeySigner,
        registry: Arc<ChainRegistry>,
        transports: Arc<dyn TransportFactory>,
    ) -> Self {
        let sender = account.address();
        Self { wallet: EthereumWallet::from(account), sender, registry, transports }
    }

    /// Completes the fields the dApp left out, querying the chain where
    /// needed, so the request becomes buildable.
    async fn fill(
        &self,
        tx: &mut TransactionRequest,
        transport: &Arc<dyn ChainTransport>,
    ) -> Result<()> {
        let from = tx.from.unwrap_or(self.sender);
        if tx.nonce.is_none() {
            let nonce =
                transport.request("eth_getTransactionCount", Some(json!([from, "pending"]))).await?;
            tx.set_nonce(parse_quantity(&nonce)?.try_into().map_err(bad_quantity)?);
        }
        if tx.gas.is_none() {
            let gas = transport.request("eth_estimateGas", Some(json!([&tx]))).await?;
            tx.set_gas_limit(parse_quantity(&gas)?.try_into().map_err(bad_quantity)?);
        }
        if tx.gas_price.is_none() && tx.max_fee_per_gas.is_none() {
            let price = transport.request("eth_gasPrice", None).await?;
            tx.set_gas_price(parse_quantity(&price)?);
        } else if tx.max_fee_per_gas.is_some() && tx.max_priority_fee_per_gas.is_none() {
            tx.set_max_priority_fee_per_gas(0);
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionSubmitter for SignAndBroadcast {
    async fn submit(&self, mut tx: TransactionRequest) -> Result<TxHash> {
        let chain = self.registry.active();
        let transport = self.transports.for_chain(&chain)?;

        // normalize into the canonical shape for the active chain
        if tx.from.is_none() {
            tx.set_from(self.sender);
        }
        tx.set_chain_id(chain.id);
        self.fill(&mut tx, &transport).await?;

        let envelope =
            tx.build(&self.wallet).await.map_err(|err| WalletError::Transaction(err.to_string()))?;
        let raw = hex::encode_prefixed(envelope.encoded_2718());
        debug!(target: "wallet::tx", chain = chain.id, "broadcasting signed transaction");

        let hash = transport.request("eth_sendRawTransaction", Some(json!([raw]))).await?;
        serde_json::from_value(hash).map_err(|err| {
            WalletError::Transaction(format!("invalid transaction hash in response: {err}"))
        })
    }
}

fn bad_quantity<E: std::fmt::Display>(err: E) -> WalletError {
    WalletError::Transport(TransportError::InvalidResponse(err.to_string()))
}

/// Parses a JSON-RPC quantity (`0x`-hex string or plain number).
fn parse_quantity(value: &Value) -> Result<u128> {
    let parsed = match value {
        Value::String(s) => match s.strip_prefix("0x") {
            Some(hex) => u128::from_str_radix(hex, 16).ok(),
            None => s.parse().ok(),
        },
        Value::Number(n) => n.as_u64().map(u128::from),
        _ => None,
    };
    parsed.ok_or_else(|| bad_quantity(format!("expected a quantity, got {value}")))
}
