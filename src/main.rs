//! Provider balancer driver.
//!
//! Registers a set of in-process providers, then routes one request per
//! interval until SIGINT/SIGTERM.
//!
//! ```text
//!   caller ──get()──▶ Balancer ──▶ RoundRobin ──▶ Provider
//!                        ▲
//!                        │ sweep every interval
//!                  HealthMonitor
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use provider_balancer::config::{load_config, BalancerConfig};
use provider_balancer::lifecycle::signals::wait_for_signal;
use provider_balancer::observability::{logging, metrics};
use provider_balancer::{Balancer, BalancerError, Provider, Shutdown, StaticProvider};

#[derive(Parser)]
#[command(name = "provider-balancer")]
#[command(about = "Round-robin balancer over health-checked providers", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of providers to register (named p-0, p-1, ...).
    #[arg(short, long, default_value_t = 10)]
    providers: usize,

    /// Delay between routed requests, in milliseconds.
    #[arg(short, long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    request_interval_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BalancerConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!("provider-balancer v0.1.0 starting");

    tracing::info!(
        capacity = config.capacity,
        health_checks = config.health_check.enabled,
        interval_ms = config.health_check.interval_ms,
        healthy_threshold = config.health_check.healthy_threshold,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Address already validated by load_config
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr, metrics::gauge_idle_timeout(&config.health_check));
        }
    }

    let shutdown = Shutdown::new();
    let balancer = Balancer::new(&config, &shutdown)?;

    register_providers(&balancer, cli.providers);
    tracing::info!(registered = balancer.len(), capacity = balancer.capacity(), "Providers registered");

    if let Some(e) = register_past_capacity(&balancer) {
        tracing::info!(error = %e, "Extra provider rejected");
    }

    let mut ticker = tokio::time::interval(Duration::from_millis(cli.request_interval_ms));
    let signal = wait_for_signal();
    tokio::pin!(signal);

    loop {
        tokio::select! {
            _ = ticker.tick() => match balancer.get() {
                Ok(id) => tracing::info!(provider = %id, "Request served"),
                Err(e) => tracing::warn!(error = %e, "Request failed"),
            },
            _ = &mut signal => break,
        }
    }

    shutdown.trigger();
    balancer.join_monitor().await;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Register `p-0` .. `p-(count-1)`, one call each.
fn register_providers(balancer: &Balancer, count: usize) {
    for i in 0..count {
        let provider: Arc<dyn Provider> = Arc::new(StaticProvider::new(format!("p-{}", i)));
        if let Err(e) = balancer.register([provider]) {
            tracing::warn!(error = %e, "Provider not added");
        }
    }
}

/// Once the registry is full, show that one more registration is refused.
fn register_past_capacity(balancer: &Balancer) -> Option<BalancerError> {
    if balancer.len() < balancer.capacity() {
        return None;
    }
    let extra: Arc<dyn Provider> =
        Arc::new(StaticProvider::new(format!("p-{}", balancer.capacity())));
    balancer.register([extra]).err()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balancer(capacity: usize) -> Balancer {
        let mut config = BalancerConfig::default();
        config.capacity = capacity;
        config.health_check.enabled = false;
        Balancer::new(&config, &Shutdown::new()).unwrap()
    }

    #[test]
    fn test_full_registry_rejects_extra_provider() {
        let lb = balancer(3);
        register_providers(&lb, 3);

        let err = register_past_capacity(&lb);
        assert!(matches!(err, Some(BalancerError::CapacityExceeded { capacity: 3, current: 3, incoming: 1 })));
        assert_eq!(lb.len(), 3);
    }

    #[test]
    fn test_partial_registry_skips_extra_provider() {
        let lb = balancer(3);
        register_providers(&lb, 2);
        assert!(register_past_capacity(&lb).is_none());
        assert_eq!(lb.len(), 2);
    }

    #[test]
    fn test_zero_request_interval_rejected() {
        assert!(Cli::try_parse_from(["provider-balancer", "--request-interval-ms", "0"]).is_err());

        let cli = Cli::try_parse_from(["provider-balancer", "-r", "5"]).unwrap();
        assert_eq!(cli.request_interval_ms, 5);
        assert_eq!(cli.providers, 10);
    }
}
