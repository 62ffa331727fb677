//! routekeeperd - keeps a route registered in the route registry.
//!
//! The daemon hosts an in-memory route registry and runs a registration
//! task that keeps the configured route present in it: one registration at
//! startup, a refresh on every interval tick, and a deregistration on
//! shutdown.
//!
//! # Usage
//!
//! ```bash
//! # Route from flags
//! routekeeperd --url api.example.com --ip 10.0.0.1 --port 3000 --ttl 120
//!
//! # Route from a config file
//! routekeeperd --config /etc/routekeeper.toml
//!
//! # Enable debug logging
//! RUST_LOG=routekeeperd=debug routekeeperd --config /etc/routekeeper.toml
//! ```
//!
//! # Signal Handling
//!
//! - SIGTERM/SIGINT: deregister the route and shut down.

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use routekeeperd::config::{Args, Config};
use routekeeperd::register::RouteRegister;
use routekeeperd::registry::spawn_registry;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args).context("invalid configuration")?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("routekeeperd=info".parse()?)
                .add_directive("routekeeper_core=info".parse()?),
        )
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        pid = process::id(),
        route = %config.route,
        "routekeeperd starting"
    );

    // Spawn the route registry and log its events in the background
    let registry = spawn_registry(config.sweep_interval);
    let mut events = registry.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            debug!(?event, "registry event");
        }
    });

    // The startup registration covers t=0; the first refresh lands one
    // period later.
    let period = config.register_interval;
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let register = RouteRegister::new(Arc::new(registry), config.route.clone(), ticker);
    let mut handle = register.spawn();

    handle
        .ready()
        .await
        .context("initial route registration failed")?;
    info!(
        route = %config.route,
        interval_secs = period.as_secs(),
        "route registration active"
    );

    wait_for_shutdown_signal().await?;
    info!("shutdown signal received");

    handle.shutdown();
    handle.wait().await.context("route register task failed")?;

    info!("routekeeperd stopped");
    Ok(())
}

/// Waits for a shutdown signal (SIGTERM or SIGINT).
async fn wait_for_shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;

        tokio::select! {
            _ = sigterm.recv() => {
                info!("received SIGTERM");
            }
            _ = sigint.recv() => {
                info!("received SIGINT");
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        info!("received Ctrl+C");
    }

    Ok(())
}
