//! Typed Ethereum client over a JSON-RPC transport.
//!
//! # Responsibilities
//! - Map each wallet query onto one JSON-RPC method with positional params
//! - Bound every call by the `max_request_time` of the current config
//! - Turn `null` lookup results into `RpcError::NotFound`
//! - Record per-method metrics and structured logs

use alloy::eips::BlockNumberOrTag;
use alloy::primitives::{Address, TxHash, B256, U256, U64};
use alloy::rpc::types::{Filter, Header, Transaction, TransactionReceipt};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;

use crate::config::SharedConfig;
use crate::observability::metrics::{self, RpcOutcome};
use crate::rpc::transport::{AlloyTransport, RpcTransport};
use crate::rpc::types::{FilteredLogs, RpcBlock, RpcError, RpcRequest, RpcResult};

/// Deadline for establishing the initial connection.
pub const DIAL_TIMEOUT: Duration = Duration::from_secs(5);

/// Chain queries and submission used by the wallet.
#[async_trait]
pub trait EthClient: Send + Sync {
    /// Header of the block at `number` (a height or a tag).
    async fn block_header_by_number(&self, number: BlockNumberOrTag) -> RpcResult<Header>;

    /// Block at `number` with full transaction objects.
    async fn block_by_number(&self, number: BlockNumberOrTag) -> RpcResult<RpcBlock>;

    /// Header of the latest `safe` block.
    async fn safe_block_header(&self) -> RpcResult<Header>;

    /// Header of the latest `finalized` block.
    async fn finalized_block_header(&self) -> RpcResult<Header>;

    async fn block_header_by_hash(&self, hash: B256) -> RpcResult<Header>;

    /// Headers in `[start, end]`. Not implemented.
    async fn block_headers_by_range(
        &self,
        start: u64,
        end: u64,
        chain_id: u64,
    ) -> RpcResult<Vec<Header>>;

    async fn tx_by_hash(&self, hash: TxHash) -> RpcResult<Transaction>;

    async fn tx_receipt_by_hash(&self, hash: TxHash) -> RpcResult<TransactionReceipt>;

    /// Storage root of `address` at `block`, taken from `eth_getProof`.
    async fn storage_hash(&self, address: Address, block: BlockNumberOrTag) -> RpcResult<B256>;

    /// Next nonce for `address`, counting pending transactions.
    async fn address_nonce(&self, address: Address) -> RpcResult<u64>;

    /// Broadcast a 0x-prefixed signed transaction and return its hash.
    async fn send_raw_transaction(&self, raw_tx_hex: &str) -> RpcResult<TxHash>;

    /// Logs matching `filter`. Not implemented.
    async fn filter_logs(&self, filter: &Filter, chain_id: u64) -> RpcResult<FilteredLogs>;

    async fn suggest_gas_price(&self) -> RpcResult<U256>;

    async fn suggest_gas_tip_cap(&self) -> RpcResult<U256>;

    /// Close the underlying transport.
    fn close(&self);
}

/// [`EthClient`] backed by any [`RpcTransport`].
#[derive(Clone)]
pub struct NodeClient {
    rpc: Arc<dyn RpcTransport>,
    config: SharedConfig,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountProof {
    storage_hash: B256,
}

impl NodeClient {
    /// Connect to `eth_rpc_url` from the current config snapshot.
    ///
    /// The connection attempt is bounded by [`DIAL_TIMEOUT`]; later calls use
    /// the configured `max_request_time`.
    pub async fn dial(config: SharedConfig) -> RpcResult<Self> {
        let url = config.snapshot().eth_rpc_url.clone();
        let transport = match timeout(DIAL_TIMEOUT, AlloyTransport::connect(&url)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(RpcError::Transport(format!(
                    "dial {url} timed out after {}s",
                    DIAL_TIMEOUT.as_secs()
                )))
            }
        };

        tracing::info!(rpc_url = %url, "RPC client connected");
        Ok(Self::new(Arc::new(transport), config))
    }

    /// Build a client over an existing transport.
    pub fn new(rpc: Arc<dyn RpcTransport>, config: SharedConfig) -> Self {
        Self { rpc, config }
    }

    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    /// Send several raw calls in one round trip, under the same deadline as a
    /// single call.
    pub async fn batch(&self, requests: &[RpcRequest]) -> RpcResult<Vec<RpcResult<Value>>> {
        let limit = self.config.snapshot().request_timeout();
        let start = Instant::now();

        let (result, outcome) = match timeout(limit, self.rpc.batch_call(requests)).await {
            Ok(result) => {
                let outcome = RpcOutcome::of(&result);
                (result, outcome)
            }
            Err(_) => (Err(timed_out("batch", limit)), RpcOutcome::Timeout),
        };
        metrics::record_rpc_call("batch", outcome, start);

        match &result {
            Ok(results) => tracing::debug!(size = results.len(), "Batch call completed"),
            Err(e) => tracing::warn!(size = requests.len(), error = %e, "Batch call failed"),
        }
        result
    }

    async fn request(&self, method: &'static str, params: Value) -> RpcResult<Value> {
        let limit = self.config.snapshot().request_timeout();
        let start = Instant::now();

        let (result, outcome) = match timeout(limit, self.rpc.call(method, params)).await {
            Ok(result) => {
                let outcome = RpcOutcome::of(&result);
                (result, outcome)
            }
            Err(_) => (Err(timed_out(method, limit)), RpcOutcome::Timeout),
        };
        metrics::record_rpc_call(method, outcome, start);

        match &result {
            Ok(_) => tracing::debug!(
                method,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "RPC call completed"
            ),
            Err(e) => tracing::warn!(method, error = %e, "RPC call failed"),
        }
        result
    }

    /// Call a method whose result must be present.
    async fn fetch<T: DeserializeOwned>(&self, method: &'static str, params: Value) -> RpcResult<T> {
        let value = self.request(method, params).await?;
        decode(method, value)
    }

    /// Call a lookup method where `null` means the object does not exist.
    async fn lookup<T: DeserializeOwned>(&self, method: &'static str, params: Value) -> RpcResult<T> {
        let value = self.request(method, params).await?;
        if value.is_null() {
            return Err(RpcError::NotFound);
        }
        decode(method, value)
    }
}

#[async_trait]
impl EthClient for NodeClient {
    async fn block_header_by_number(&self, number: BlockNumberOrTag) -> RpcResult<Header> {
        self.lookup("eth_getBlockByNumber", json!([number, false]))
            .await
    }

    async fn block_by_number(&self, number: BlockNumberOrTag) -> RpcResult<RpcBlock> {
        self.lookup("eth_getBlockByNumber", json!([number, true]))
            .await
    }

    async fn safe_block_header(&self) -> RpcResult<Header> {
        self.block_header_by_number(BlockNumberOrTag::Safe).await
    }

    async fn finalized_block_header(&self) -> RpcResult<Header> {
        self.block_header_by_number(BlockNumberOrTag::Finalized)
            .await
    }

    async fn block_header_by_hash(&self, hash: B256) -> RpcResult<Header> {
        self.lookup("eth_getBlockByHash", json!([hash, false])).await
    }

    async fn block_headers_by_range(
        &self,
        _start: u64,
        _end: u64,
        _chain_id: u64,
    ) -> RpcResult<Vec<Header>> {
        Err(RpcError::NotImplemented("block_headers_by_range"))
    }

    async fn tx_by_hash(&self, hash: TxHash) -> RpcResult<Transaction> {
        self.lookup("eth_getTransactionByHash", json!([hash])).await
    }

    async fn tx_receipt_by_hash(&self, hash: TxHash) -> RpcResult<TransactionReceipt> {
        self.lookup("eth_getTransactionReceipt", json!([hash])).await
    }

    async fn storage_hash(&self, address: Address, block: BlockNumberOrTag) -> RpcResult<B256> {
        let proof: AccountProof = self
            .lookup("eth_getProof", json!([address, [], block]))
            .await?;
        Ok(proof.storage_hash)
    }

    async fn address_nonce(&self, address: Address) -> RpcResult<u64> {
        let nonce: U64 = self
            .fetch("eth_getTransactionCount", json!([address, "pending"]))
            .await?;
        Ok(nonce.to::<u64>())
    }

    async fn send_raw_transaction(&self, raw_tx_hex: &str) -> RpcResult<TxHash> {
        let hash: TxHash = self
            .fetch("eth_sendRawTransaction", json!([raw_tx_hex]))
            .await?;
        tracing::info!(tx_hash = %hash, "Transaction submitted");
        Ok(hash)
    }

    async fn filter_logs(&self, _filter: &Filter, _chain_id: u64) -> RpcResult<FilteredLogs> {
        Err(RpcError::NotImplemented("filter_logs"))
    }

    async fn suggest_gas_price(&self) -> RpcResult<U256> {
        self.fetch("eth_gasPrice", json!([])).await
    }

    async fn suggest_gas_tip_cap(&self) -> RpcResult<U256> {
        self.fetch("eth_maxPriorityFeePerGas", json!([])).await
    }

    fn close(&self) {
        self.rpc.close();
    }
}

fn decode<T: DeserializeOwned>(method: &'static str, value: Value) -> RpcResult<T> {
    serde_json::from_value(value).map_err(|e| RpcError::Decode {
        method: method.to_string(),
        reason: e.to_string(),
    })
}

fn timed_out(method: &str, limit: Duration) -> RpcError {
    RpcError::Transport(format!(
        "{method} timed out after {}s",
        limit.as_secs()
    ))
}
