//! Metrics collection and exposition.
//!
//! # Metrics
//! - `balancer_selections_total` (counter): `get` outcomes by `outcome` label
//! - `balancer_registered_providers` (gauge): current registry size
//! - `balancer_provider_health` (gauge): 1=healthy, 0=unhealthy, per provider
//!
//! Without an installed recorder every call is a no-op.
//!
//! Gauges expire once nothing refreshes them for a few sweeps, so an
//! unregistered provider stops reporting its last health value.

use std::net::SocketAddr;
use std::time::Duration;
use metrics_exporter_prometheus::PrometheusBuilder;
use metrics_util::MetricKindMask;
use crate::config::HealthCheckConfig;
use crate::load_balancer::BalancerError;

/// Sweeps a gauge may miss before the exporter drops it.
const GAUGE_IDLE_SWEEPS: u32 = 3;

/// Idle timeout for gauges, or `None` when no sweep refreshes them.
pub fn gauge_idle_timeout(health: &HealthCheckConfig) -> Option<Duration> {
    if !health.enabled {
        return None;
    }
    Some(health.interval().saturating_mul(GAUGE_IDLE_SWEEPS))
}

/// Install the Prometheus recorder and its scrape endpoint.
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr, gauge_idle_timeout: Option<Duration>) {
    let builder = PrometheusBuilder::new()
        .with_http_listener(addr)
        .idle_timeout(MetricKindMask::GAUGE, gauge_idle_timeout);

    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

fn outcome_label(error: &BalancerError) -> &'static str {
    match error {
        BalancerError::NoProviders => "no_providers",
        BalancerError::NoHealthyProviders => "no_healthy_providers",
        BalancerError::Provider(_) => "provider_error",
        BalancerError::CapacityExceeded { .. } | BalancerError::NotFound(_) => "error",
    }
}

pub fn record_selection_ok() {
    metrics::counter!("balancer_selections_total", "outcome" => "ok").increment(1);
}

pub fn record_selection(error: &BalancerError) {
    metrics::counter!("balancer_selections_total", "outcome" => outcome_label(error)).increment(1);
}

pub fn record_registered(count: usize) {
    metrics::gauge!("balancer_registered_providers").set(count as f64);
}

pub fn record_provider_health(provider: &str, healthy: bool) {
    let value = if healthy { 1.0 } else { 0.0 };
    metrics::gauge!("balancer_provider_health", "provider" => provider.to_string()).set(value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ProviderError, ProviderId};

    #[test]
    fn test_gauge_idle_timeout_spans_several_sweeps() {
        let mut health = HealthCheckConfig::default();
        health.interval_ms = 1000;
        assert_eq!(gauge_idle_timeout(&health), Some(Duration::from_secs(3)));

        health.enabled = false;
        assert_eq!(gauge_idle_timeout(&health), None);
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(outcome_label(&BalancerError::NoProviders), "no_providers");
        assert_eq!(outcome_label(&BalancerError::NoHealthyProviders), "no_healthy_providers");
        assert_eq!(
            outcome_label(&BalancerError::Provider(ProviderError::NotEnabled(ProviderId::from("p")))),
            "provider_error"
        );
    }
}
