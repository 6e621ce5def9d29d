//! JSON-RPC request bindings

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single provider request: a method name plus optional, method-defined
/// parameters.
///
/// Requests are immutable once constructed; the pipeline only ever reads them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl RpcRequest {
    /// Creates a new request for `method`.
    pub fn new(method: impl Into<String>, params: impl Into<Option<Value>>) -> Self {
        Self { method: method.into(), params: params.into() }
    }

    /// Returns the positional parameter at `index`, if params is an array
    /// containing one.
    pub fn param(&self, index: usize) -> Option<&Value> {
        match &self.params {
            Some(Value::Array(params)) => params.get(index),
            _ => None,
        }
    }
}
