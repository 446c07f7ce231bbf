//! RPC-side types and error definitions.

use alloy::primitives::{Address, TxHash, B256, U256};
use alloy::rpc::types::{Header, Log};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during RPC operations.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The node answered with a null result for a lookup.
    #[error("Not found")]
    NotFound,

    /// Network failure, connection failure or call deadline exceeded.
    #[error("RPC transport error: {0}")]
    Transport(String),

    /// The transport was closed by the caller.
    #[error("RPC client is closed")]
    Closed,

    /// The node returned a JSON-RPC error object.
    #[error("RPC error response {code}: {message}")]
    ErrorResponse { code: i64, message: String },

    /// The result did not have the expected shape.
    #[error("Failed to decode {method} result: {reason}")]
    Decode { method: String, reason: String },

    /// Declared operation without an implementation.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

impl RpcError {
    /// Network-level failures, including timeouts and use after close.
    pub fn is_transport(&self) -> bool {
        matches!(self, RpcError::Transport(_) | RpcError::Closed)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RpcError::NotFound)
    }
}

/// Result type for RPC operations.
pub type RpcResult<T> = Result<T, RpcError>;

/// One entry of a batch call.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcRequest {
    pub method: String,
    /// Positional parameters as a JSON array.
    pub params: Value,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

/// Transaction entry of a full block, reduced to what the wallet reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTransaction {
    /// `None` for contract creation.
    pub to: Option<Address>,
    pub hash: TxHash,
}

/// Block with its transactions, as fetched for deposit scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcBlock {
    pub hash: B256,
    #[serde(default)]
    pub transactions: Vec<BlockTransaction>,
    #[serde(default)]
    pub base_fee_per_gas: Option<U256>,
}

/// Logs matched by a filter together with the header they were read at.
#[derive(Debug, Clone, Default)]
pub struct FilteredLogs {
    pub logs: Vec<Log>,
    pub block_header: Option<Header>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_display() {
        assert_eq!(RpcError::NotFound.to_string(), "Not found");
        assert_eq!(
            RpcError::NotImplemented("filter_logs").to_string(),
            "filter_logs is not implemented"
        );
        let err = RpcError::ErrorResponse {
            code: -32000,
            message: "nonce too low".into(),
        };
        assert!(err.to_string().contains("nonce too low"));
    }

    #[test]
    fn test_error_classification() {
        assert!(RpcError::Transport("connection refused".into()).is_transport());
        assert!(RpcError::Closed.is_transport());
        assert!(!RpcError::NotFound.is_transport());
        assert!(RpcError::NotFound.is_not_found());
        assert!(!RpcError::NotImplemented("x").is_transport());
    }

    #[test]
    fn test_block_decodes_from_node_json() {
        let block: RpcBlock = serde_json::from_value(json!({
            "hash": "0x88e96d4537bea4d9c05d12549907b32561d3bf31f45aae734cdc119f13406cb6",
            "number": "0x1b4",
            "baseFeePerGas": "0x7",
            "transactions": [
                {
                    "hash": "0xc55e2b90168af6972193c1f86fa4d7d7b31a29c156665d15b9cd48618b5177ef",
                    "to": "0x8ff44c9b5eab5e5ce8d1d642184b70e9b9587f74",
                    "value": "0x0"
                },
                {
                    "hash": "0x5ec8ba4aa4b7d3b2d2b98df0aa1b4e2f5c5e3f5d8e1f3c3b2a1908f7e6d5c4b3",
                    "to": null
                }
            ]
        }))
        .unwrap();

        assert_eq!(block.base_fee_per_gas, Some(U256::from(7u8)));
        assert_eq!(block.transactions.len(), 2);
        assert!(block.transactions[0].to.is_some());
        assert_eq!(block.transactions[1].to, None);
    }
}
