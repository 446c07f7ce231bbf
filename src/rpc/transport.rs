//! JSON-RPC transport abstraction.
//!
//! # Responsibilities
//! - Single and batched JSON-RPC calls with raw JSON results
//! - Close semantics: every call after `close()` fails with `RpcError::Closed`
//!
//! The typed client in `client.rs` only depends on [`RpcTransport`], so tests
//! can script node behaviour without a network.

use alloy::rpc::client::{ClientBuilder, RpcClient};
use alloy::transports::TransportError;
use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::rpc::types::{RpcError, RpcRequest, RpcResult};

/// Raw JSON-RPC access to a node.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Invoke `method` with positional `params` and return the raw result.
    async fn call(&self, method: &str, params: Value) -> RpcResult<Value>;

    /// Send several calls in one round trip.
    ///
    /// The outer error covers the round trip itself; each element carries the
    /// outcome of its own call, in request order.
    async fn batch_call(&self, requests: &[RpcRequest]) -> RpcResult<Vec<RpcResult<Value>>>;

    /// Release the connection. Idempotent.
    fn close(&self);
}

/// [`RpcTransport`] over an alloy `RpcClient` (HTTP, WebSocket or IPC,
/// chosen from the URL scheme).
pub struct AlloyTransport {
    client: ArcSwapOption<RpcClient>,
    endpoint: String,
}

impl AlloyTransport {
    /// Connect to `url`. No deadline is applied here; callers wrap this in
    /// their own dial timeout.
    pub async fn connect(url: &str) -> RpcResult<Self> {
        let client = ClientBuilder::default()
            .connect(url)
            .await
            .map_err(|e| RpcError::Transport(format!("failed to dial {url}: {e}")))?;
        Ok(Self::from_client(client, url))
    }

    /// Wrap an already-built client.
    pub fn from_client(client: RpcClient, endpoint: impl Into<String>) -> Self {
        Self {
            client: ArcSwapOption::from_pointee(client),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_closed(&self) -> bool {
        self.client.load().is_none()
    }

    fn client(&self) -> RpcResult<Arc<RpcClient>> {
        self.client.load_full().ok_or(RpcError::Closed)
    }
}

#[async_trait]
impl RpcTransport for AlloyTransport {
    async fn call(&self, method: &str, params: Value) -> RpcResult<Value> {
        let client = self.client()?;
        client
            .request::<_, Value>(method.to_string(), params)
            .await
            .map_err(RpcError::from)
    }

    async fn batch_call(&self, requests: &[RpcRequest]) -> RpcResult<Vec<RpcResult<Value>>> {
        let client = self.client()?;
        let mut batch = client.new_batch();
        let mut waiters = Vec::with_capacity(requests.len());
        for request in requests {
            let waiter = batch
                .add_call::<_, Value>(request.method.clone(), &request.params)
                .map_err(RpcError::from)?;
            waiters.push(waiter);
        }

        batch.send().await.map_err(RpcError::from)?;

        let mut results = Vec::with_capacity(waiters.len());
        for waiter in waiters {
            results.push(waiter.await.map_err(RpcError::from));
        }
        Ok(results)
    }

    fn close(&self) {
        if self.client.swap(None).is_some() {
            tracing::info!(endpoint = %self.endpoint, "RPC transport closed");
        }
    }
}

impl From<TransportError> for RpcError {
    fn from(err: TransportError) -> Self {
        if let Some(payload) = err.as_error_resp() {
            return RpcError::ErrorResponse {
                code: payload.code,
                message: payload.message.to_string(),
            };
        }
        match err {
            alloy::transports::RpcError::NullResp => RpcError::NotFound,
            alloy::transports::RpcError::DeserError { err, .. } => RpcError::Decode {
                method: "response".to_string(),
                reason: err.to_string(),
            },
            other => RpcError::Transport(other.to_string()),
        }
    }
}
