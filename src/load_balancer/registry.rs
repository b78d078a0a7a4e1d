//! Provider registry.
//!
//! # Responsibilities
//! - Hold registered providers in insertion (rotation) order
//! - Enforce the configured capacity atomically
//! - Own the selection cursor so it is guarded by the same lock as the entries

use std::sync::Arc;
use parking_lot::RwLock;
use crate::health::state::HealthState;
use crate::load_balancer::{
    LoadBalancer,
    entry::ProviderEntry,
    error::BalancerError,
    round_robin::RoundRobin,
};
use crate::provider::{Provider, ProviderId};

/// Registry shared between the balancer facade and the health monitor.
pub type SharedRegistry = Arc<RwLock<Registry>>;

/// Point-in-time view of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderStatus {
    pub id: ProviderId,
    pub state: HealthState,
    pub consecutive_passes: u32,
}

/// Ordered, bounded collection of provider entries.
#[derive(Debug)]
pub struct Registry {
    entries: Vec<ProviderEntry>,
    capacity: usize,
    selector: Box<dyn LoadBalancer>,
}

impl Registry {
    /// Create an empty registry with round-robin selection.
    pub fn new(capacity: usize) -> Self {
        Self::with_selector(capacity, Box::new(RoundRobin::new()))
    }

    pub fn with_selector(capacity: usize, selector: Box<dyn LoadBalancer>) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
            selector,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> &[ProviderEntry] {
        &self.entries
    }

    /// Mutable access for the health monitor. Requires the write lock.
    pub fn entries_mut(&mut self) -> &mut [ProviderEntry] {
        &mut self.entries
    }

    /// Append providers to the end of the rotation.
    ///
    /// Either every provider is appended or none is. Identities are not
    /// de-duplicated: registering the same id twice yields two entries.
    pub fn register(&mut self, providers: Vec<Arc<dyn Provider>>) -> Result<(), BalancerError> {
        let current = self.entries.len();
        let incoming = providers.len();

        // current never exceeds capacity
        if incoming > self.capacity - current {
            return Err(BalancerError::CapacityExceeded {
                capacity: self.capacity,
                current,
                incoming,
            });
        }

        self.entries.extend(providers.into_iter().map(ProviderEntry::new));
        Ok(())
    }

    /// Remove the first entry whose provider has the given identity.
    ///
    /// Matches on the stable id, so disabled providers can be removed too.
    /// Survivors keep their relative order.
    pub fn unregister(&mut self, id: &str) -> Result<Arc<dyn Provider>, BalancerError> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.id() == id)
            .ok_or_else(|| BalancerError::NotFound(id.to_string()))?;

        let entry = self.entries.remove(position);
        Ok(entry.provider().clone())
    }

    /// Pick the next healthy provider. Only needs the read lock.
    pub fn select(&self) -> Result<Arc<dyn Provider>, BalancerError> {
        if self.entries.is_empty() {
            return Err(BalancerError::NoProviders);
        }

        self.selector
            .next_index(&self.entries)
            .map(|index| self.entries[index].provider().clone())
            .ok_or(BalancerError::NoHealthyProviders)
    }

    pub fn snapshot(&self) -> Vec<ProviderStatus> {
        self.entries
            .iter()
            .map(|entry| ProviderStatus {
                id: entry.id().clone(),
                state: entry.state(),
                consecutive_passes: entry.consecutive_passes(),
            })
            .collect()
    }
}
