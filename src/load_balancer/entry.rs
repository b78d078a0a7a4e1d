//! Registry entry.
//!
//! # Responsibilities
//! - Wrap a single provider with its health bookkeeping
//! - Apply probe outcomes to the health state machine

use std::sync::Arc;
use crate::health::state::HealthState;
use crate::provider::{Provider, ProviderId};

/// A registered provider plus the health fields the monitor maintains.
///
/// Health fields are plain values: they are only mutated while the registry
/// write lock is held.
#[derive(Debug, Clone)]
pub struct ProviderEntry {
    provider: Arc<dyn Provider>,
    healthy: bool,
    consecutive_passes: u32,
}

impl ProviderEntry {
    /// Wrap a provider. New entries are optimistically healthy.
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            healthy: true,
            consecutive_passes: 0,
        }
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    pub fn id(&self) -> &ProviderId {
        self.provider.id()
    }

    pub fn is_healthy(&self) -> bool {
        self.healthy
    }

    pub fn state(&self) -> HealthState {
        HealthState::from(self.healthy)
    }

    pub fn consecutive_passes(&self) -> u32 {
        self.consecutive_passes
    }

    /// Report a successful probe. Returns the new state if it changed.
    pub fn mark_success(&mut self, healthy_threshold: u32) -> Option<HealthState> {
        self.consecutive_passes = self.consecutive_passes.saturating_add(1);

        if self.consecutive_passes >= healthy_threshold && !self.healthy {
            self.healthy = true;
            return Some(HealthState::Healthy);
        }
        None
    }

    /// Report a failed probe. Demotion is immediate.
    pub fn mark_failure(&mut self) -> Option<HealthState> {
        self.consecutive_passes = 0;

        if self.healthy {
            self.healthy = false;
            return Some(HealthState::Unhealthy);
        }
        None
    }
}
