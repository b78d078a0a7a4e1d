//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use provider_balancer::{Balancer, BalancerConfig, Provider, Shutdown, StaticProvider};

/// Create providers named `p-0` .. `p-(n-1)`.
pub fn providers(n: usize) -> Vec<Arc<StaticProvider>> {
    (0..n)
        .map(|i| Arc::new(StaticProvider::new(format!("p-{}", i))))
        .collect()
}

pub fn as_dyn(provider: &Arc<StaticProvider>) -> Arc<dyn Provider> {
    provider.clone()
}

/// Balancer with the given capacity and health checks switched off.
pub fn balancer_without_health(capacity: usize) -> Balancer {
    let mut config = BalancerConfig::default();
    config.capacity = capacity;
    config.health_check.enabled = false;
    Balancer::new(&config, &Shutdown::new()).unwrap()
}

/// Register every provider, one call each.
pub fn register_all(balancer: &Balancer, providers: &[Arc<StaticProvider>]) {
    for p in providers {
        balancer.register([as_dyn(p)]).unwrap();
    }
}

/// Call `get` `n` times and collect the identities as strings.
pub fn take(balancer: &Balancer, n: usize) -> Vec<String> {
    (0..n)
        .map(|_| balancer.get().unwrap().to_string())
        .collect()
}

/// Expected identities for the given provider indexes.
pub fn ids(indexes: &[usize]) -> Vec<String> {
    indexes.iter().map(|i| format!("p-{}", i)).collect()
}
