//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Balancer and health monitor produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape), optional
//! ```
//!
//! # Design Decisions
//! - The library only emits events; the binary installs subscribers
//! - Metrics are cheap and safe to record with no exporter installed

pub mod logging;
pub mod metrics;
