//! Configuration validation.
//!
//! Serde handles syntax; this checks value ranges. Every problem is
//! reported, not just the first.

use std::net::SocketAddr;
use thiserror::Error;
use crate::config::schema::BalancerConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("capacity must be greater than zero")]
    ZeroCapacity,

    #[error("health_check.interval_ms must be greater than zero")]
    ZeroInterval,

    #[error("health_check.healthy_threshold must be greater than zero")]
    ZeroThreshold,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

pub fn validate_config(config: &BalancerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.capacity == 0 {
        errors.push(ValidationError::ZeroCapacity);
    }

    // Interval and threshold only matter when the monitor runs
    if config.health_check.enabled {
        if config.health_check.interval_ms == 0 {
            errors.push(ValidationError::ZeroInterval);
        }
        if config.health_check.healthy_threshold == 0 {
            errors.push(ValidationError::ZeroThreshold);
        }
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
