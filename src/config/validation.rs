//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the RPC URL is parseable with a supported scheme
//! - Check the request timeout is non-zero
//!
//! Returns all validation errors, not just the first.

use thiserror::Error;
use url::Url;

use crate::config::schema::WalletConfig;

/// A single semantic problem in a parsed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("eth_rpc_url is empty")]
    EmptyRpcUrl,

    #[error("eth_rpc_url '{url}' is invalid: {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    #[error("max_request_time must be at least 1 second")]
    ZeroRequestTime,
}

const SUPPORTED_SCHEMES: [&str; 4] = ["http", "https", "ws", "wss"];

/// Validate a parsed configuration.
pub fn validate_config(config: &WalletConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = validate_rpc_url(&config.eth_rpc_url) {
        errors.push(e);
    }

    if config.max_request_time == 0 {
        errors.push(ValidationError::ZeroRequestTime);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_rpc_url(raw: &str) -> Result<(), ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::EmptyRpcUrl);
    }

    // IPC endpoints are plain filesystem paths.
    if raw.ends_with(".ipc") {
        return Ok(());
    }

    let url = Url::parse(raw).map_err(|e| ValidationError::InvalidRpcUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
        return Err(ValidationError::InvalidRpcUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(())
}
