//! Load balancer error definitions.

use thiserror::Error;
use crate::provider::ProviderError;

/// Errors returned by balancer operations. All are recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalancerError {
    /// Registration would grow the registry past its capacity.
    #[error("providers limit reached: capacity {capacity}, registered {current}, incoming {incoming}")]
    CapacityExceeded {
        capacity: usize,
        current: usize,
        incoming: usize,
    },

    /// No registered provider has the requested identity.
    #[error("provider with id '{0}' not found")]
    NotFound(String),

    /// The registry is empty.
    #[error("no providers registered")]
    NoProviders,

    /// Providers are registered but none is currently healthy.
    #[error("no healthy providers")]
    NoHealthyProviders,

    /// The selected provider failed to serve the request.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
}
