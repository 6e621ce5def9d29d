//! Wire-level JSON-RPC bindings for the headless wallet provider.
//!
//! Provider requests follow [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193):
//! a method name plus optional parameters, answered with either a result value
//! or an error object. Error codes combine the JSON-RPC 2.0 set with the
//! provider-specific codes EIP-1193 (and EIP-3326 for chain switching) assign.

pub mod error;
pub mod request;
pub mod response;

pub use error::{ErrorCode, RpcError};
pub use request::RpcRequest;
pub use response::ResponseResult;
