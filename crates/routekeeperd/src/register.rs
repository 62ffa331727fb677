//! Route registration task.
//!
//! Keeps a single route present in a shared registry for as long as the
//! owning process runs: one registration at startup (fatal if it fails),
//! a refresh on every ticker tick (failures logged and swallowed), and a
//! single deregistration on shutdown.

use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Interval;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use routekeeper_core::{RegistryClient, RegistryError, Route};

/// A supervised task that keeps one route registered.
///
/// Owns the route value (never mutated) and the ticker (stopped when the
/// task exits). The registry client is shared with the rest of the process
/// and is never closed here.
pub struct RouteRegister<R> {
    registry: Arc<R>,
    route: Route,
    ticker: Interval,
}

impl<R> RouteRegister<R>
where
    R: RegistryClient + 'static,
{
    /// Creates the task in its idle state.
    ///
    /// Nothing is validated here; all failure is deferred to run time.
    /// The ticker's schedule belongs to the caller - note that
    /// `tokio::time::interval` fires immediately, so callers that want the
    /// first refresh one period after startup should use `interval_at`.
    pub fn new(registry: Arc<R>, route: Route, ticker: Interval) -> Self {
        Self {
            registry,
            route,
            ticker,
        }
    }

    /// Starts the task on the tokio runtime.
    ///
    /// The returned handle signals readiness once the startup registration
    /// has completed, delivers the termination signal, and yields the
    /// terminal result.
    pub fn spawn(self) -> RegisterHandle {
        let cancel = CancellationToken::new();
        let (ready_tx, ready_rx) = oneshot::channel();
        let task = tokio::spawn(self.run(cancel.clone(), ready_tx));

        RegisterHandle {
            cancel,
            ready: ready_rx,
            task,
        }
    }

    async fn run(
        mut self,
        cancel: CancellationToken,
        ready: oneshot::Sender<Result<(), RegistryError>>,
    ) -> Result<(), RegistryError> {
        // The startup registration is the one fatal path: the task is not
        // ready until the route exists in the registry.
        if let Err(err) = self.registry.save_route(&self.route).await {
            let _ = ready.send(Err(err.clone()));
            return Err(err);
        }
        let _ = ready.send(Ok(()));
        debug!(route = %self.route, "route registered");

        // One registry call at a time: a tick-triggered save completes
        // before cancellation is observed at the next iteration.
        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => break,

                _ = self.ticker.tick() => {
                    // Refresh failures are transient: log and wait for the
                    // next tick. No backoff, no failure counting.
                    if let Err(err) = self.registry.save_route(&self.route).await {
                        warn!(error = %err, route = %self.route, "route refresh failed");
                    }
                }
            }
        }

        // Best-effort deregistration, exactly once; the outcome never
        // changes the exit path.
        match self.registry.delete_route(&self.route).await {
            Ok(()) => debug!(route = %self.route, "route deregistered"),
            Err(err) => {
                warn!(error = %err, route = %self.route, "route deregistration failed");
            }
        }

        Ok(())
    }
}

/// Supervisor-facing handle for a running [`RouteRegister`].
pub struct RegisterHandle {
    cancel: CancellationToken,
    ready: oneshot::Receiver<Result<(), RegistryError>>,
    task: JoinHandle<Result<(), RegistryError>>,
}

impl RegisterHandle {
    /// Waits for the startup registration to complete.
    ///
    /// Returns `Ok(())` once the route is registered, or the startup error
    /// if the first save failed (the task has already terminated then).
    pub async fn ready(&mut self) -> Result<(), RegistryError> {
        match (&mut self.ready).await {
            Ok(result) => result,
            Err(_) => Err(RegistryError::ChannelClosed),
        }
    }

    /// Delivers the termination signal: deregister once, then exit.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Waits for the task to exit and returns its terminal result.
    ///
    /// `Ok(())` for a signal-triggered shutdown, the startup error if the
    /// first registration failed.
    pub async fn wait(self) -> Result<(), RegistryError> {
        match self.task.await {
            Ok(result) => result,
            Err(_) => Err(RegistryError::ChannelClosed),
        }
    }
}
