//! Ethereum wallet helper library.
//!
//! Offline key handling, token transfer encoding and transaction signing, plus
//! a thin typed client for the node queries a wallet needs.

// Offline wallet operations
pub mod wallet;

// Node access
pub mod rpc;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::{SharedConfig, WalletConfig};
pub use rpc::{EthClient, NodeClient, RpcError};
pub use wallet::{KeyMaterial, SignedTransaction, UnsignedTransaction, WalletError};
