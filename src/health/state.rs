//! Provider health state machine.
//!
//! # States
//! - Healthy: provider is eligible for round-robin selection
//! - Unhealthy: provider is skipped by the selector
//!
//! # State Transitions
//! ```text
//! Healthy → Unhealthy: any failed probe (immediate)
//! Unhealthy → Healthy: consecutive passes >= healthy_threshold
//! ```
//!
//! Hysteresis only applies on the way up. Entries start Healthy on
//! registration.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    Healthy,
    Unhealthy,
}

impl HealthState {
    pub fn is_healthy(self) -> bool {
        matches!(self, HealthState::Healthy)
    }
}

impl From<bool> for HealthState {
    fn from(healthy: bool) -> Self {
        if healthy {
            HealthState::Healthy
        } else {
            HealthState::Unhealthy
        }
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthState::Healthy => f.write_str("healthy"),
            HealthState::Unhealthy => f.write_str("unhealthy"),
        }
    }
}
