//! Active health checking.
//!
//! # Responsibilities
//! - Periodically probe every registered provider
//! - Update provider health state based on results

use tokio::time::{self, Instant, MissedTickBehavior};
use crate::config::HealthCheckConfig;
use crate::health::state::HealthState;
use crate::lifecycle::ShutdownSignal;
use crate::load_balancer::registry::SharedRegistry;
use crate::observability::metrics;
use crate::provider::ProviderId;

/// Transitions caused by one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Number of entries probed.
    pub probed: usize,
    pub promoted: Vec<ProviderId>,
    pub demoted: Vec<ProviderId>,
}

pub struct HealthMonitor {
    registry: SharedRegistry,
    config: HealthCheckConfig,
}

impl HealthMonitor {
    pub fn new(registry: SharedRegistry, config: HealthCheckConfig) -> Self {
        Self { registry, config }
    }

    pub async fn run(self, mut shutdown: ShutdownSignal) {
        if !self.config.enabled {
            tracing::info!("Active health checks disabled");
            return;
        }

        tracing::info!(
            interval_ms = self.config.interval_ms,
            healthy_threshold = self.config.healthy_threshold,
            "Health monitor starting"
        );

        // First sweep happens one full interval after start.
        let interval = self.config.interval();
        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            // Shutdown wins over a tick that is ready at the same time.
            tokio::select! {
                biased;

                _ = shutdown.recv() => {
                    tracing::info!("Health monitor received shutdown signal, exiting loop");
                    break;
                }
                _ = ticker.tick() => {
                    self.sweep();
                }
            }
        }
    }

    /// Probe every entry once under the registry write lock.
    ///
    /// Selection never observes a half-applied sweep. A slow probe delays the
    /// whole sweep and blocks `get` for its duration.
    pub fn sweep(&self) -> SweepReport {
        let mut registry = self.registry.write();
        let threshold = self.config.healthy_threshold;
        let mut report = SweepReport::default();

        for entry in registry.entries_mut() {
            report.probed += 1;

            let transition = if entry.provider().probe_health() {
                entry.mark_success(threshold)
            } else {
                entry.mark_failure()
            };

            match transition {
                Some(HealthState::Healthy) => {
                    tracing::info!(
                        provider = %entry.id(),
                        passes = entry.consecutive_passes(),
                        "Provider back in rotation"
                    );
                    report.promoted.push(entry.id().clone());
                }
                Some(HealthState::Unhealthy) => {
                    tracing::warn!(provider = %entry.id(), "Health probe failed, provider excluded");
                    report.demoted.push(entry.id().clone());
                }
                None => {}
            }

            metrics::record_provider_health(entry.id().as_str(), entry.is_healthy());
        }

        // Refresh the size gauge so it outlives the exporter idle timeout
        metrics::record_registered(registry.len());
        tracing::trace!(probed = report.probed, "Health sweep complete");
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use parking_lot::RwLock;
    use crate::load_balancer::registry::Registry;
    use crate::provider::{Provider, StaticProvider};

    fn setup(threshold: u32) -> (HealthMonitor, SharedRegistry, Vec<Arc<StaticProvider>>) {
        let registry: SharedRegistry = Arc::new(RwLock::new(Registry::new(4)));
        let providers: Vec<Arc<StaticProvider>> = (0..3)
            .map(|i| Arc::new(StaticProvider::new(format!("p-{}", i))))
            .collect();
        registry
            .write()
            .register(providers.iter().map(|p| p.clone() as Arc<dyn Provider>).collect())
            .unwrap();

        let config = HealthCheckConfig {
            enabled: true,
            interval_ms: 1000,
            healthy_threshold: threshold,
        };
        (HealthMonitor::new(registry.clone(), config), registry, providers)
    }

    #[test]
    fn test_sweep_demotes_failed_probe() {
        let (monitor, registry, providers) = setup(2);
        providers[1].disable();

        let report = monitor.sweep();
        assert_eq!(report.probed, 3);
        assert_eq!(report.demoted, vec![ProviderId::from("p-1")]);
        assert!(report.promoted.is_empty());

        let registry = registry.read();
        assert!(registry.entries()[0].is_healthy());
        assert!(!registry.entries()[1].is_healthy());
    }

    #[test]
    fn test_sweep_promotes_after_threshold() {
        let (monitor, registry, providers) = setup(2);
        providers[0].disable();
        monitor.sweep();
        providers[0].enable();

        assert!(monitor.sweep().promoted.is_empty());
        assert!(!registry.read().entries()[0].is_healthy());

        let report = monitor.sweep();
        assert_eq!(report.promoted, vec![ProviderId::from("p-0")]);
        assert!(registry.read().entries()[0].is_healthy());
    }

    #[test]
    fn test_sweep_of_healthy_registry_reports_nothing() {
        let (monitor, _registry, _providers) = setup(1);
        let report = monitor.sweep();
        assert_eq!(report.probed, 3);
        assert!(report.promoted.is_empty());
        assert!(report.demoted.is_empty());
    }
}
