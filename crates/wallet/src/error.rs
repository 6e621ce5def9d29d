//! Aggregated error type for the wallet pipeline

use crate::transport::TransportError;
use alloy_primitives::ChainId;
use headless_wallet_rpc::{ResponseResult, RpcError};
use serde_json::Value;

pub(crate) type Result<T> = std::result::Result<T, WalletError>;

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// No handler recognized the method and the pass-through could not carry
    /// it either.
    #[error("the method {0} does not exist / is not available")]
    UnsupportedMethod(String),
    /// The authorization oracle declined the request.
    #[error("user rejected the request")]
    Rejected,
    #[error("invalid params: {0}")]
    InvalidParams(String),
    /// The requested chain is not present in the registry.
    #[error("unrecognized chain id {0:#x}")]
    UnknownChain(ChainId),
    #[error(transparent)]
    Signer(#[from] alloy_signer::Error),
    #[error("invalid hex payload: {0}")]
    HexDecode(#[from] alloy_primitives::hex::FromHexError),
    /// Building, signing or broadcasting a transaction failed.
    #[error("failed to submit transaction: {0}")]
    Transaction(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl WalletError {
    /// Maps the failure onto the wire-level error object reported to the dApp.
    pub fn to_rpc_error(&self) -> RpcError {
        match self {
            Self::UnsupportedMethod(method) => RpcError::unsupported_method(method.clone()),
            Self::Rejected => RpcError::user_rejected(),
            Self::InvalidParams(msg) => RpcError::invalid_params(msg.clone()),
            Self::UnknownChain(id) => RpcError::unrecognized_chain(format!(
                "Unrecognized chain ID {id:#x}. Try adding the chain using wallet_addEthereumChain first."
            )),
            Self::Signer(err) => RpcError::internal_error_with(err.to_string()),
            Self::HexDecode(err) => RpcError::internal_error_with(err.to_string()),
            Self::Transaction(msg) => RpcError::transaction_rejected(msg.clone()),
            // a remote error response is forwarded to the caller unchanged
            Self::Transport(TransportError::Rpc(err)) => err.clone(),
            Self::Transport(err) => RpcError::internal_error_with(err.to_string()),
        }
    }
}

/// Helper trait to easily convert handler outcomes to rpc results
pub(crate) trait ToRpcResponseResult {
    fn to_rpc_result(self) -> ResponseResult;
}

impl ToRpcResponseResult for Result<Value> {
    fn to_rpc_result(self) -> ResponseResult {
        match self {
            Ok(value) => ResponseResult::Success(value),
            Err(err) => ResponseResult::Error(err.to_rpc_error()),
        }
    }
}
