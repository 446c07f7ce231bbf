//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! rpc::NodeClient, config reloads, CLI commands produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (RPC counters and latency histograms via `metrics`)
//!
//! Consumers:
//!     → stderr (fmt layer, filtered by RUST_LOG)
//!     → whatever `metrics` recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - The library only emits; installing a subscriber or recorder is the
//!   binary's job
//! - Without a recorder, metric calls are no-ops
//! - Private keys and raw signed payloads are never logged

pub mod logging;
pub mod metrics;
