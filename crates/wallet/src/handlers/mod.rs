//! The method handlers making up the pipeline.
//!
//! Each handler owns a narrow slice of the protocol surface. A handler either
//! recognizes the request's method and produces a terminal outcome, or
//! delegates by returning `None`.

use crate::error::Result;
use async_trait::async_trait;
use headless_wallet_rpc::RpcRequest;
use serde_json::Value;

mod accounts;
mod chain;
mod passthrough;
mod permissions;
mod sign;
mod transaction;
mod unsupported;

pub use accounts::AccountsHandler;
pub use chain::ChainHandler;
pub use passthrough::PassthroughHandler;
pub use permissions::PermissionsHandler;
pub use sign::SignHandler;
pub use transaction::TransactionHandler;
pub use unsupported::UnsupportedHandler;

/// A unit of the pipeline recognizing a subset of methods.
#[async_trait]
pub trait WalletHandler: Send + Sync {
    /// Returns `None` when the method is not this handler's to answer,
    /// `Some(Ok)` with the result value when it is, and `Some(Err)` when
    /// handling it failed terminally.
    async fn handle(&self, request: &RpcRequest) -> Option<Result<Value>>;
}
