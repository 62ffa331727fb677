//! Client interface for the registry actor.
//!
//! The `RegistryHandle` is a cheap-to-clone handle for sending commands to
//! the actor and subscribing to route events. It also implements
//! [`RegistryClient`], which is how registration tasks talk to it.

use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc, oneshot};

use routekeeper_core::{RegistryClient, RegistryError, RegistryResult, Route};

use super::commands::{RegistryCommand, RouteEvent};

/// Handle for interacting with the registry actor.
///
/// All request/response methods communicate with the actor via channels;
/// channel failures are mapped to `RegistryError::ChannelClosed`.
#[derive(Clone)]
pub struct RegistryHandle {
    /// Command sender to the actor
    sender: mpsc::Sender<RegistryCommand>,

    /// Event broadcaster for subscribing to updates
    event_sender: broadcast::Sender<RouteEvent>,
}

impl RegistryHandle {
    /// Creates a new registry handle.
    pub fn new(
        sender: mpsc::Sender<RegistryCommand>,
        event_sender: broadcast::Sender<RouteEvent>,
    ) -> Self {
        Self {
            sender,
            event_sender,
        }
    }

    /// Inserts a route, or refreshes its expiry if it already exists.
    ///
    /// # Errors
    ///
    /// - `RegistryError::Full` if the registry is at maximum capacity
    /// - `RegistryError::ChannelClosed` if the actor has shut down
    pub async fn upsert(&self, route: Route) -> Result<(), RegistryError> {
        let (tx, rx) = oneshot::channel();

        self.sender
            .send(RegistryCommand::Upsert {
                route,
                respond_to: tx,
            })
            .await
            .map_err(|_| RegistryError::ChannelClosed)?;

        rx.await.map_err(|_| RegistryError::ChannelClosed)?
    }

    /// Removes a route from the registry.
    ///
    /// # Errors
    ///
    /// - `RegistryError::NotFound` if the registry does not hold the route
    /// - `RegistryError::ChannelClosed` if the actor has shut down
    pub async fn remove(&self, route: Route) -> Result<(), RegistryError> {
        let (tx, rx) = oneshot::channel();

        self.sender
            .send(RegistryCommand::Remove {
                route,
                respond_to: tx,
            })
            .await
            .map_err(|_| RegistryError::ChannelClosed)?;

        rx.await.map_err(|_| RegistryError::ChannelClosed)?
    }

    /// Lists all currently registered routes.
    ///
    /// Returns an empty vector if the actor has shut down.
    pub async fn list(&self) -> Vec<Route> {
        let (tx, rx) = oneshot::channel();

        if self
            .sender
            .send(RegistryCommand::List { respond_to: tx })
            .await
            .is_err()
        {
            return Vec::new();
        }

        rx.await.unwrap_or_default()
    }

    /// Triggers an expiry sweep.
    ///
    /// Fire-and-forget: does not wait for the sweep or return a result.
    pub async fn sweep_expired(&self) {
        // Ignore send errors - the actor may be shutting down
        let _ = self.sender.send(RegistryCommand::SweepExpired).await;
    }

    /// Subscribes to route events.
    ///
    /// This is a synchronous operation - it does not talk to the actor.
    pub fn subscribe(&self) -> broadcast::Receiver<RouteEvent> {
        self.event_sender.subscribe()
    }

    /// Returns `true` if the command channel is still open.
    pub fn is_connected(&self) -> bool {
        !self.sender.is_closed()
    }
}

#[async_trait]
impl RegistryClient for RegistryHandle {
    async fn save_route(&self, route: &Route) -> RegistryResult<()> {
        self.upsert(route.clone()).await
    }

    async fn delete_route(&self, route: &Route) -> RegistryResult<()> {
        self.remove(route.clone()).await
    }
}
