//! Balancer facade.
//!
//! # Responsibilities
//! - Own the shared registry for its whole lifetime
//! - Spawn the health monitor on construction when enabled
//! - Expose register / unregister / get to concurrent callers

use std::sync::Arc;
use parking_lot::{Mutex, RwLock};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use crate::config::BalancerConfig;
use crate::config::loader::ConfigError;
use crate::config::validation::validate_config;
use crate::health::HealthMonitor;
use crate::lifecycle::Shutdown;
use crate::load_balancer::{
    error::BalancerError,
    registry::{ProviderStatus, Registry, SharedRegistry},
};
use crate::observability::metrics;
use crate::provider::{Provider, ProviderId};

/// Round-robin balancer over a bounded, health-checked set of providers.
#[derive(Debug)]
pub struct Balancer {
    registry: SharedRegistry,
    monitor: Mutex<Option<JoinHandle<()>>>,
}

impl Balancer {
    /// Create a balancer from validated configuration.
    ///
    /// When health checks are enabled the monitor is spawned onto the current
    /// Tokio runtime and stops once `shutdown` is triggered. Without a runtime
    /// this fails with [`ConfigError::NoRuntime`].
    pub fn new(config: &BalancerConfig, shutdown: &Shutdown) -> Result<Self, ConfigError> {
        validate_config(config).map_err(ConfigError::Validation)?;

        let registry: SharedRegistry = Arc::new(RwLock::new(Registry::new(config.capacity)));

        let monitor = if config.health_check.enabled {
            let runtime = Handle::try_current().map_err(|_| ConfigError::NoRuntime)?;
            let monitor = HealthMonitor::new(registry.clone(), config.health_check.clone());
            Some(runtime.spawn(monitor.run(shutdown.subscribe())))
        } else {
            tracing::info!("Active health checks disabled");
            None
        };

        tracing::info!(capacity = config.capacity, "Balancer created");

        Ok(Self {
            registry,
            monitor: Mutex::new(monitor),
        })
    }

    /// Register one or more providers at the tail of the rotation.
    pub fn register<I>(&self, providers: I) -> Result<(), BalancerError>
    where
        I: IntoIterator<Item = Arc<dyn Provider>>,
    {
        let providers: Vec<Arc<dyn Provider>> = providers.into_iter().collect();
        let mut registry = self.registry.write();

        if let Err(e) = registry.register(providers.clone()) {
            tracing::warn!(error = %e, "Provider registration rejected");
            return Err(e);
        }

        for provider in &providers {
            tracing::debug!(provider = %provider.id(), "Provider registered");
        }
        metrics::record_registered(registry.len());
        Ok(())
    }

    /// Remove the first provider with the given identity.
    pub fn unregister(&self, id: &str) -> Result<(), BalancerError> {
        let mut registry = self.registry.write();
        registry.unregister(id)?;

        tracing::debug!(provider = %id, registered = registry.len(), "Provider unregistered");
        metrics::record_registered(registry.len());
        Ok(())
    }

    /// Route one unit of work to the next healthy provider.
    ///
    /// Contacts at most one provider; its failure is returned, not retried.
    pub fn get(&self) -> Result<ProviderId, BalancerError> {
        let selected = self.registry.read().select();

        let provider = match selected {
            Ok(provider) => provider,
            Err(e) => {
                metrics::record_selection(&e);
                tracing::debug!(error = %e, "No provider selected");
                return Err(e);
            }
        };

        let result = provider.fetch_identity().map_err(BalancerError::from);
        match &result {
            Ok(_) => metrics::record_selection_ok(),
            Err(e) => {
                metrics::record_selection(e);
                tracing::warn!(provider = %provider.id(), error = %e, "Selected provider failed");
            }
        }
        result
    }

    pub fn len(&self) -> usize {
        self.registry.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.registry.read().capacity()
    }

    /// Health view of every registered provider, in rotation order.
    pub fn snapshot(&self) -> Vec<ProviderStatus> {
        self.registry.read().snapshot()
    }

    /// Wait for the health monitor task to exit.
    ///
    /// Call after triggering shutdown. Returns immediately if the monitor was
    /// never started or has already been joined.
    pub async fn join_monitor(&self) {
        let handle = self.monitor.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Health monitor task failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::StaticProvider;

    fn balancer(capacity: usize) -> Balancer {
        let mut config = BalancerConfig::default();
        config.capacity = capacity;
        config.health_check.enabled = false;
        Balancer::new(&config, &Shutdown::new()).unwrap()
    }

    fn provider(id: &str) -> Arc<dyn Provider> {
        Arc::new(StaticProvider::new(id))
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = BalancerConfig::default();
        config.capacity = 0;
        config.health_check.enabled = false;

        let err = Balancer::new(&config, &Shutdown::new()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_health_checks_need_a_runtime() {
        let err = Balancer::new(&BalancerConfig::default(), &Shutdown::new()).unwrap_err();
        assert!(matches!(err, ConfigError::NoRuntime));
    }

    #[tokio::test]
    async fn test_health_checks_spawn_inside_runtime() {
        let shutdown = Shutdown::new();
        let lb = Balancer::new(&BalancerConfig::default(), &shutdown).unwrap();
        shutdown.trigger();
        lb.join_monitor().await;
    }

    #[test]
    fn test_huge_capacity_is_accepted() {
        let config = crate::config::loader::parse_config(
            "capacity = 9223372036854775807\n[health_check]\nenabled = false",
        )
        .unwrap();
        let lb = Balancer::new(&config, &Shutdown::new()).unwrap();
        assert_eq!(lb.capacity(), 9223372036854775807);

        lb.register([provider("a")]).unwrap();
        assert_eq!(lb.get().unwrap(), "a");
    }

    #[test]
    fn test_get_round_robin() {
        let lb = balancer(3);
        lb.register([provider("a"), provider("b")]).unwrap();

        assert_eq!(lb.get().unwrap(), "a");
        assert_eq!(lb.get().unwrap(), "b");
        assert_eq!(lb.get().unwrap(), "a");
    }

    #[test]
    fn test_get_empty() {
        let lb = balancer(3);
        assert_eq!(lb.get().unwrap_err(), BalancerError::NoProviders);
    }

    #[test]
    fn test_get_disabled_provider_surfaces_error() {
        let lb = balancer(3);
        let p = Arc::new(StaticProvider::new("a"));
        lb.register([p.clone() as Arc<dyn Provider>, provider("b")]).unwrap();

        // Disabled before any sweep: still selected, failure propagated
        p.disable();
        assert!(matches!(lb.get(), Err(BalancerError::Provider(_))));
        assert_eq!(lb.get().unwrap(), "b");
    }

    #[test]
    fn test_len_and_capacity() {
        let lb = balancer(2);
        assert!(lb.is_empty());
        lb.register([provider("a")]).unwrap();
        assert_eq!(lb.len(), 1);
        assert_eq!(lb.capacity(), 2);
    }
}
