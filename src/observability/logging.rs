//! Structured logging.
//!
//! # Responsibilities
//! - Install the global `tracing` subscriber for the CLI
//! - Honour `RUST_LOG`, falling back to a crate-level default
//!
//! Output goes to stderr so command results on stdout stay machine-readable.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "eth_wallet=info";

/// Install a registry with an env filter and a fmt layer.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(default_filter: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}
