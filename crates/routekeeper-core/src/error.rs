//! Registry error taxonomy.

use thiserror::Error;

/// Result type for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur talking to a route registry.
///
/// `Clone` lets a task report the same error through more than one channel
/// (readiness and terminal result, for example).
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// Transport-level failure reaching the registry.
    #[error("registry unreachable: {0}")]
    Unreachable(String),

    /// The registry does not hold the route.
    #[error("route not found: {0}")]
    NotFound(String),

    /// The registry has reached its maximum route capacity.
    #[error("registry is full (max: {max} routes)")]
    Full {
        /// Maximum number of routes allowed
        max: usize,
    },

    /// The registry, or the task talking to it, has shut down.
    #[error("registry channel closed")]
    ChannelClosed,
}
