//! In-memory route registry using the actor pattern.
//!
//! The registry is the single owner of the route table. It receives
//! commands via a tokio mpsc channel, processes them sequentially, and
//! publishes [`RouteEvent`]s via broadcast. Routes registered with a TTL
//! are dropped by a periodic sweep once their deadline passes without a
//! refresh.

use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, Duration};
use tracing::debug;

mod actor;
mod commands;
mod handle;

pub use actor::{RouteTable, MAX_ROUTES};
pub use commands::{RegistryCommand, RemovalReason, RouteEvent};
pub use handle::RegistryHandle;

/// Channel buffer sizes
const COMMAND_BUFFER: usize = 100;
const EVENT_BUFFER: usize = 100;

/// Spawns the registry actor and its periodic expiry sweep, returning a
/// handle for client use.
pub fn spawn_registry(sweep_interval: Duration) -> RegistryHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_BUFFER);
    let (event_tx, _) = broadcast::channel(EVENT_BUFFER);

    let actor = RouteTable::new(cmd_rx, event_tx.clone());
    tokio::spawn(actor.run());

    let handle = RegistryHandle::new(cmd_tx.clone(), event_tx);

    spawn_sweep_task(cmd_tx, sweep_interval);

    handle
}

/// Spawns a background task that triggers periodic expiry sweeps.
///
/// Exits when the command channel closes (actor stopped).
fn spawn_sweep_task(sender: mpsc::Sender<RegistryCommand>, sweep_interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = interval(sweep_interval);

        loop {
            ticker.tick().await;

            if sender.send(RegistryCommand::SweepExpired).await.is_err() {
                debug!("sweep task stopping: registry channel closed");
                break;
            }
        }
    });
}
