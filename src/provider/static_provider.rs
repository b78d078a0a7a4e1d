//! In-process provider that answers with its own identifier.

use std::sync::atomic::{AtomicBool, Ordering};
use crate::provider::{Provider, ProviderError, ProviderId};

/// A provider identified by a fixed id that can be toggled on and off.
///
/// Disabling it makes both `fetch_identity` and `probe_health` fail, which is
/// how the health monitor learns to evict it.
#[derive(Debug)]
pub struct StaticProvider {
    id: ProviderId,
    enabled: AtomicBool,
}

impl StaticProvider {
    /// Create a new, enabled provider.
    pub fn new(id: impl Into<ProviderId>) -> Self {
        Self {
            id: id.into(),
            enabled: AtomicBool::new(true),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

impl Provider for StaticProvider {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    fn fetch_identity(&self) -> Result<ProviderId, ProviderError> {
        if !self.is_enabled() {
            return Err(ProviderError::NotEnabled(self.id.clone()));
        }
        Ok(self.id.clone())
    }

    fn probe_health(&self) -> bool {
        self.is_enabled()
    }

    fn enable(&self) {
        self.enabled.store(true, Ordering::Release);
    }

    fn disable(&self) {
        self.enabled.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_identity_follows_enabled_flag() {
        let p = StaticProvider::new("p-0");
        assert_eq!(p.fetch_identity().unwrap(), "p-0");
        assert!(p.probe_health());

        p.disable();
        assert_eq!(
            p.fetch_identity(),
            Err(ProviderError::NotEnabled(ProviderId::from("p-0")))
        );
        assert!(!p.probe_health());
        // Identity stays readable while disabled
        assert_eq!(p.id(), "p-0");

        p.enable();
        assert_eq!(p.fetch_identity().unwrap(), "p-0");
    }
}
