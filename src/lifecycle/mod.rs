//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (binary):
//!     Load config → Validate → Create balancer (spawns health monitor)
//!
//! Shutdown (shutdown.rs):
//!     Trigger → health monitor leaves its loop at the next select → join
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - A single shared signal cancels every background task
//! - In-flight provider calls are never aborted, only future ticks

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
