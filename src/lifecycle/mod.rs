//! Lifecycle management for long-running commands.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT / SIGTERM → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → every subscriber (head poller, reload applier) stops
//! ```
//!
//! # Design Decisions
//! - One-shot commands never touch this; only `watch-head` runs until stopped
//! - A fatal config reload also triggers shutdown, so both paths exit the
//!   same way

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_signal;
