//! Node access over JSON-RPC.
//!
//! # Data Flow
//! ```text
//! CLI / embedding application
//!     → client.rs (EthClient: typed calls, deadline from SharedConfig snapshot,
//!                  null → NotFound, metrics + logs)
//!     → transport.rs (RpcTransport: raw JSON-RPC, single / batch / close)
//!     → alloy RpcClient (http, ws or ipc by URL scheme)
//!     → Ethereum node
//! ```
//!
//! # Design Decisions
//! - No retries, caching or failover: one call, one request
//! - The deadline is read per call, so a config reload applies to the next call
//! - Dial has its own fixed deadline, independent of the config
//! - Closing is terminal; there is no reconnect

pub mod client;
pub mod transport;
pub mod types;

pub use client::{EthClient, NodeClient, DIAL_TIMEOUT};
pub use transport::{AlloyTransport, RpcTransport};
pub use types::{BlockTransaction, FilteredLogs, RpcBlock, RpcError, RpcRequest, RpcResult};
