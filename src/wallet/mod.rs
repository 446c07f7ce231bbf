//! Offline wallet operations.
//!
//! # Data Flow
//! ```text
//! random entropy / hex private key
//!     → keys.rs (KeyMaterial: key pair + checksum address)
//!
//! recipient, amount, token id
//!     → abi.rs (ERC-20 / ERC-721 call data)
//!     → transaction.rs (UnsignedTransaction → signed EIP-2718 bytes)
//!     → rpc::EthClient::send_raw_transaction
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - Nothing here touches the network or the filesystem

pub mod abi;
pub mod keys;
pub mod transaction;
pub mod types;

pub use abi::{erc20_transfer_data, erc721_safe_transfer_data};
pub use keys::{address_from_public_key, address_from_public_key_hex, ExportedKey, KeyMaterial};
pub use transaction::{sign_offline, sign_offline_hex, FeeParams, SignedTransaction, UnsignedTransaction};
pub use types::{WalletError, WalletResult};
