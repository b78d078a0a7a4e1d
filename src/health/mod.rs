//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Active health checks (active.rs):
//!     Periodic timer
//!     → Take registry write lock
//!     → Probe each provider
//!     → Update entry state (state.rs)
//!
//! State machine (state.rs):
//!     Healthy ←→ Unhealthy
//!     With a pass threshold to prevent flapping back in
//! ```
//!
//! # Design Decisions
//! - One sweep is atomic with respect to selection
//! - Health state is per-entry, independent of other entries
//! - Probe failures never surface as errors to callers
//! - No probe timeout; a hanging probe stalls the sweep

pub mod active;
pub mod state;

pub use active::{HealthMonitor, SweepReport};
pub use state::HealthState;
