//! Registry actor - owns the route table and processes commands.
//!
//! The `RouteTable` is the single owner of route state. It receives
//! commands via an mpsc channel and publishes events via broadcast. All
//! state mutations happen within one task, so no locking is needed.

use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc};
use tokio::time::{Duration, Instant};
use tracing::{debug, info, warn};

use routekeeper_core::{RegistryError, Route};

use super::commands::{RegistryCommand, RemovalReason, RouteEvent};

/// Maximum number of routes the registry can hold.
pub const MAX_ROUTES: usize = 1024;

/// One table slot: the route plus its expiry deadline.
#[derive(Debug, Clone)]
struct RouteEntry {
    route: Route,
    /// `None` for routes registered without a TTL hint.
    expires_at: Option<Instant>,
}

/// The registry actor.
///
/// Upserting a route refreshes its expiry deadline; the periodic sweep
/// removes entries whose deadline has passed. An upsert of an existing key
/// never counts against capacity.
pub struct RouteTable {
    /// Command receiver
    receiver: mpsc::Receiver<RegistryCommand>,

    /// Route storage, keyed by `Route::key()`
    routes: HashMap<String, RouteEntry>,

    /// Event publisher for subscribers
    event_publisher: broadcast::Sender<RouteEvent>,
}

impl RouteTable {
    /// Creates a new registry actor.
    pub fn new(
        receiver: mpsc::Receiver<RegistryCommand>,
        event_publisher: broadcast::Sender<RouteEvent>,
    ) -> Self {
        Self {
            receiver,
            routes: HashMap::new(),
            event_publisher,
        }
    }

    /// Runs the actor event loop.
    ///
    /// Processes commands until the channel closes (all senders dropped).
    pub async fn run(mut self) {
        info!("route registry starting");

        while let Some(cmd) = self.receiver.recv().await {
            self.handle_command(cmd);
        }

        info!(routes = self.routes.len(), "route registry stopped");
    }

    /// Dispatches a command to the appropriate handler.
    fn handle_command(&mut self, cmd: RegistryCommand) {
        match cmd {
            RegistryCommand::Upsert { route, respond_to } => {
                let result = self.handle_upsert(route);
                // Ignore send error - client may have dropped the receiver
                let _ = respond_to.send(result);
            }
            RegistryCommand::Remove { route, respond_to } => {
                let result = self.handle_remove(&route);
                let _ = respond_to.send(result);
            }
            RegistryCommand::List { respond_to } => {
                let _ = respond_to.send(self.handle_list());
            }
            RegistryCommand::SweepExpired => {
                self.handle_sweep_expired();
            }
        }
    }

    fn handle_upsert(&mut self, route: Route) -> Result<(), RegistryError> {
        let key = route.key();
        let expires_at = route
            .ttl
            .map(|secs| Instant::now() + Duration::from_secs(secs));

        if let Some(entry) = self.routes.get_mut(&key) {
            entry.route = route;
            entry.expires_at = expires_at;
            debug!(route = %entry.route, "route refreshed");
            return Ok(());
        }

        if self.routes.len() >= MAX_ROUTES {
            warn!(
                route = %route,
                current = self.routes.len(),
                max = MAX_ROUTES,
                "registry is full, rejecting route"
            );
            return Err(RegistryError::Full { max: MAX_ROUTES });
        }

        info!(
            route = %route,
            ttl = ?route.ttl,
            total_routes = self.routes.len() + 1,
            "route registered"
        );

        // Publish event (ignore if no subscribers)
        let _ = self.event_publisher.send(RouteEvent::Registered {
            route: route.clone(),
        });

        self.routes.insert(key, RouteEntry { route, expires_at });

        Ok(())
    }

    fn handle_remove(&mut self, route: &Route) -> Result<(), RegistryError> {
        match self.routes.remove(&route.key()) {
            Some(entry) => {
                info!(
                    route = %entry.route,
                    remaining = self.routes.len(),
                    "route deregistered"
                );

                let _ = self.event_publisher.send(RouteEvent::Removed {
                    route: entry.route,
                    reason: RemovalReason::Explicit,
                });

                Ok(())
            }
            None => Err(RegistryError::NotFound(route.to_string())),
        }
    }

    fn handle_list(&self) -> Vec<Route> {
        self.routes.values().map(|e| e.route.clone()).collect()
    }

    /// Removes routes whose TTL deadline has passed.
    fn handle_sweep_expired(&mut self) {
        let now = Instant::now();

        let expired: Vec<String> = self
            .routes
            .iter()
            .filter_map(|(key, entry)| match entry.expires_at {
                Some(deadline) if deadline <= now => Some(key.clone()),
                _ => None,
            })
            .collect();

        if expired.is_empty() {
            debug!("no expired routes");
            return;
        }

        for key in expired {
            if let Some(entry) = self.routes.remove(&key) {
                // warn! so expiry shows up without RUST_LOG=debug
                warn!(
                    route = %entry.route,
                    reason = %RemovalReason::Expired,
                    "route removed by sweep"
                );

                let _ = self.event_publisher.send(RouteEvent::Removed {
                    route: entry.route,
                    reason: RemovalReason::Expired,
                });
            }
        }
    }

    // ========================================================================
    // Accessors (for testing)
    // ========================================================================

    /// Returns the number of routes currently registered.
    #[cfg(test)]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}
