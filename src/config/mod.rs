//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → WalletConfig (validated, immutable)
//!     → shared.rs (ArcSwap handle given to the RPC client)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → shared.rs apply_reloads swaps the snapshot
//!     → a failed reload ends apply_reloads with the error (fatal)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod shared;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{ChainIdTable, Network, WalletConfig};
pub use shared::{apply_reloads, SharedConfig};
pub use watcher::ConfigWatcher;
