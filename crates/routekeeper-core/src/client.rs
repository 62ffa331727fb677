//! The registry interface consumed by registration tasks.

use async_trait::async_trait;

use crate::{RegistryResult, Route};

/// A client for a shared route registry.
///
/// The client is shared across the process; a registration task holds a
/// reference to it and never closes or destroys it.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Inserts a route, or refreshes it if the registry already holds it.
    ///
    /// Idempotent: safe to call repeatedly with the same value.
    async fn save_route(&self, route: &Route) -> RegistryResult<()>;

    /// Removes a route from the registry.
    async fn delete_route(&self, route: &Route) -> RegistryResult<()>;
}
