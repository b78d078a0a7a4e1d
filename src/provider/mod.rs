//! Provider abstraction.
//!
//! # Responsibilities
//! - Define the capability set the balancer needs from a backend
//! - Give every provider a stable identity, independent of enabled state
//!
//! # Design Decisions
//! - Providers own their internal synchronization; all methods take `&self`
//! - The balancer shares providers via `Arc<dyn Provider>` and never drives
//!   their lifecycle, only their registry membership
//! - Real transports (HTTP, gRPC) would be further implementors of the trait

pub mod static_provider;

use std::fmt;
use thiserror::Error;

pub use static_provider::StaticProvider;

/// Stable identity of a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderId(pub String);

impl ProviderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProviderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProviderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for ProviderId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ProviderId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors reported by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider was administratively disabled when called.
    #[error("provider {0} is not enabled")]
    NotEnabled(ProviderId),
}

/// Capabilities the balancer requires from a backend.
pub trait Provider: Send + Sync + fmt::Debug {
    /// Identity used for registry membership. Must not depend on enabled state.
    fn id(&self) -> &ProviderId;

    /// Serve one unit of work by returning the provider's identity.
    /// Fails when the provider is disabled.
    fn fetch_identity(&self) -> Result<ProviderId, ProviderError>;

    /// Lightweight liveness check used by the health monitor.
    fn probe_health(&self) -> bool;

    fn enable(&self);

    fn disable(&self);
}
