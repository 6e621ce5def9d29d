//! # Headless Wallet
//!
//! A browser-wallet emulator for automated dApp testing, implementing:
//! - [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193): Ethereum Provider JavaScript API
//! - [EIP-712](https://eips.ethereum.org/EIPS/eip-712): Typed structured data hashing and signing
//! - [EIP-2255](https://eips.ethereum.org/EIPS/eip-2255): Wallet permissions
//! - [EIP-3085](https://eips.ethereum.org/EIPS/eip-3085) / [EIP-3326](https://eips.ethereum.org/EIPS/eip-3326):
//!   Adding and switching chains
//!
//! ## Architecture
//!
//! Requests flow through an ordered pipeline of method handlers. Before any
//! handler runs, the request suspends on the authorization gate until the
//! hosting test harness approves or rejects it. Handlers resolve account,
//! chain, signing, permission and transaction methods locally; anything else
//! is forwarded verbatim to the active chain's live endpoint, and a terminal
//! handler reports methods nobody could carry.
//!
//! ```no_run
//! use headless_wallet::{WalletConfig, WalletProvider};
//! use headless_wallet_rpc::RpcRequest;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let wallet = WalletProvider::new(WalletConfig::default())?;
//! let chain_id = wallet.request(RpcRequest::new("eth_chainId", None)).await;
//! # Ok(())
//! # }
//! ```

pub mod authorization;
pub mod chain;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod handlers;
pub mod permissions;
pub mod provider;
pub mod submit;
pub mod transport;

pub use authorization::{AuthorizationOracle, AutoApprove, ManualAuthorization, PendingRequest};
pub use chain::{ChainDescriptor, ChainMetadataPolicy, ChainRegistry, NativeCurrency};
pub use config::{DEV_CHAIN_ID, WalletConfig, dev_chain, dev_signer};
pub use engine::RpcEngine;
pub use error::WalletError;
pub use events::{EmitFn, WalletEvent, noop_emitter};
pub use permissions::{CapabilityKind, GLOBAL_SCOPE, PermissionDescriptor, PermissionSystem};
pub use provider::WalletProvider;
pub use submit::{SignAndBroadcast, TransactionSubmitter};
pub use transport::{ChainTransport, HttpTransport, HttpTransportFactory, TransportError, TransportFactory};

/// Re-export of the wire-level JSON-RPC bindings.
pub use headless_wallet_rpc as rpc;
