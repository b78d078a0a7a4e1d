//! Round-robin provider balancer with background health checking.

pub mod config;
pub mod health;
pub mod lifecycle;
pub mod load_balancer;
pub mod observability;
pub mod provider;

pub use config::BalancerConfig;
pub use lifecycle::Shutdown;
pub use load_balancer::{Balancer, BalancerError};
pub use provider::{Provider, ProviderError, ProviderId, StaticProvider};
