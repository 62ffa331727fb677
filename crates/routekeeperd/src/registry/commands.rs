//! Registry actor commands and events.

use tokio::sync::oneshot;

use routekeeper_core::{RegistryError, Route};

/// Commands sent to the registry actor.
///
/// Request/response commands carry a oneshot channel for the reply.
#[derive(Debug)]
pub enum RegistryCommand {
    /// Insert a route, or refresh an existing one (resets its expiry).
    ///
    /// # Errors
    /// - `RegistryError::Full` if the registry is at maximum capacity
    Upsert {
        /// The route to insert or refresh
        route: Route,
        /// Channel to send the result
        respond_to: oneshot::Sender<Result<(), RegistryError>>,
    },

    /// Remove a route.
    ///
    /// # Errors
    /// - `RegistryError::NotFound` if the registry does not hold the route
    Remove {
        /// The route to remove
        route: Route,
        /// Channel to send the result
        respond_to: oneshot::Sender<Result<(), RegistryError>>,
    },

    /// List all currently registered routes.
    List {
        /// Channel to send the results
        respond_to: oneshot::Sender<Vec<Route>>,
    },

    /// Drop routes whose TTL deadline has passed.
    ///
    /// Fire-and-forget, sent by the periodic sweep task.
    SweepExpired,
}

/// Events published by the registry to subscribers.
#[derive(Debug, Clone)]
pub enum RouteEvent {
    /// A route was inserted (not merely refreshed).
    Registered {
        /// The newly registered route
        route: Route,
    },

    /// A route was removed from the table.
    Removed {
        /// The removed route
        route: Route,
        /// Why the route was removed
        reason: RemovalReason,
    },
}

/// Why a route left the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    /// A client explicitly deregistered the route.
    Explicit,

    /// The route's TTL deadline passed without a refresh.
    Expired,
}

impl std::fmt::Display for RemovalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit => write!(f, "explicitly deregistered"),
            Self::Expired => write!(f, "ttl expired"),
        }
    }
}
