//! Process-wide configuration handle.
//!
//! Readers take an `Arc<WalletConfig>` snapshot per operation. Reload
//! replaces the whole snapshot atomically; a snapshot is never mutated in
//! place, so an in-flight call keeps the values it started with.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::mpsc;

use crate::config::loader::ConfigError;
use crate::config::schema::WalletConfig;

/// Cheaply cloneable handle to the current configuration snapshot.
#[derive(Debug, Clone)]
pub struct SharedConfig {
    inner: Arc<ArcSwap<WalletConfig>>,
}

impl SharedConfig {
    pub fn new(config: WalletConfig) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(config)),
        }
    }

    /// The snapshot in effect right now.
    pub fn snapshot(&self) -> Arc<WalletConfig> {
        self.inner.load_full()
    }

    /// Install a new snapshot.
    pub fn replace(&self, config: WalletConfig) {
        self.inner.store(Arc::new(config));
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::new(WalletConfig::default())
    }
}

/// Apply reloads from the watcher until the channel closes.
///
/// A failed reload is fatal: the error is returned immediately and the
/// previous snapshot stays in place only until the caller shuts down.
pub async fn apply_reloads(
    shared: SharedConfig,
    mut updates: mpsc::UnboundedReceiver<Result<WalletConfig, ConfigError>>,
) -> Result<(), ConfigError> {
    while let Some(update) = updates.recv().await {
        match update {
            Ok(config) => {
                tracing::info!(
                    name = %config.name,
                    eth_rpc_url = %config.eth_rpc_url,
                    max_request_time = config.max_request_time,
                    "Configuration reloaded"
                );
                shared.replace(config);
            }
            Err(e) => {
                tracing::error!(error = %e, "Configuration reload failed");
                return Err(e);
            }
        }
    }
    Ok(())
}
