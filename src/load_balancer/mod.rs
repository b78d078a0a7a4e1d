//! Load balancing subsystem.
//!
//! # Data Flow
//! ```text
//! register / unregister
//!     → balancer.rs (write lock)
//!     → registry.rs (append / remove, capacity check)
//!
//! get
//!     → balancer.rs (read lock)
//!     → registry.rs → round_robin.rs (advance cursor, skip unhealthy)
//!     → release lock
//!     → provider fetch_identity (exactly one provider contacted)
//! ```
//!
//! # Design Decisions
//! - One reader-writer lock guards entries, cursor and health fields
//! - Selection is read-heavy and only takes the shared lock
//! - Unhealthy providers excluded from selection
//! - Removal never reorders survivors; re-registration appends at the tail

pub mod balancer;
pub mod entry;
pub mod error;
pub mod registry;
pub mod round_robin;

pub use balancer::Balancer;
pub use error::BalancerError;

use std::fmt;
use entry::ProviderEntry;

/// Selection strategy over the registry entries.
pub trait LoadBalancer: Send + Sync + fmt::Debug {
    /// Index of the entry to serve the next request, or `None` when no entry
    /// is eligible.
    fn next_index(&self, entries: &[ProviderEntry]) -> Option<usize>;
}
