//! RPC metrics.
//!
//! # Metrics
//! - `eth_wallet_rpc_requests_total` (counter): calls by method, outcome
//! - `eth_wallet_rpc_request_duration_seconds` (histogram): latency by method

use std::time::Instant;

use crate::rpc::types::{RpcError, RpcResult};

pub const RPC_REQUESTS_TOTAL: &str = "eth_wallet_rpc_requests_total";
pub const RPC_REQUEST_DURATION_SECONDS: &str = "eth_wallet_rpc_request_duration_seconds";

/// Outcome label of one RPC call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcOutcome {
    Ok,
    NotFound,
    Timeout,
    Error,
}

impl RpcOutcome {
    /// Classify a finished call. Timeouts are labelled by the caller, which
    /// is the only place that knows the deadline fired.
    pub fn of<T>(result: &RpcResult<T>) -> Self {
        match result {
            Ok(_) => RpcOutcome::Ok,
            Err(RpcError::NotFound) => RpcOutcome::NotFound,
            Err(_) => RpcOutcome::Error,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RpcOutcome::Ok => "ok",
            RpcOutcome::NotFound => "not_found",
            RpcOutcome::Timeout => "timeout",
            RpcOutcome::Error => "error",
        }
    }
}

/// Record one finished RPC call.
pub fn record_rpc_call(method: &'static str, outcome: RpcOutcome, start: Instant) {
    ::metrics::counter!(
        RPC_REQUESTS_TOTAL,
        "method" => method,
        "outcome" => outcome.as_str()
    )
    .increment(1);
    ::metrics::histogram!(RPC_REQUEST_DURATION_SECONDS, "method" => method)
        .record(start.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_classification() {
        assert_eq!(RpcOutcome::of(&Ok::<_, RpcError>(1)), RpcOutcome::Ok);
        assert_eq!(RpcOutcome::of::<()>(&Err(RpcError::NotFound)), RpcOutcome::NotFound);
        assert_eq!(RpcOutcome::of::<()>(&Err(RpcError::Closed)), RpcOutcome::Error);
        assert_eq!(RpcOutcome::Timeout.as_str(), "timeout");
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_rpc_call("eth_gasPrice", RpcOutcome::Ok, Instant::now());
    }
}
