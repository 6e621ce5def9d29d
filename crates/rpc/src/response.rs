//! JSON-RPC response bindings

use crate::error::RpcError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The outcome of one dispatched request: exactly one of a result value or an
/// error object, serialized under the standard `result`/`error` keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ResponseResult {
    #[serde(rename = "result")]
    Success(Value),
    #[serde(rename = "error")]
    Error(RpcError),
}

impl ResponseResult {
    /// Serializes `value` into a success response, or an internal error if the
    /// value is not representable as JSON.
    pub fn success<S: Serialize>(value: S) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => Self::Success(value),
            Err(_) => Self::Error(RpcError::internal_error()),
        }
    }

    /// Creates a new error response.
    pub fn error(error: RpcError) -> Self {
        Self::Error(error)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Unwraps into a plain `Result`, mostly useful for callers and tests.
    pub fn into_result(self) -> Result<Value, RpcError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Error(error) => Err(error),
        }
    }
}

impl From<RpcError> for ResponseResult {
    fn from(error: RpcError) -> Self {
        Self::Error(error)
    }
}
