//! routekeeperd - route registration daemon.
//!
//! This crate provides the daemon's infrastructure:
//! - `register` - supervised task that keeps one route registered
//! - `registry` - in-memory route registry (actor pattern)
//! - `config` - CLI and TOML configuration
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     routekeeperd                         │
//! ├──────────────────────────────────────────────────────────┤
//! │                                                          │
//! │  ┌────────────────┐   save/delete   ┌─────────────────┐  │
//! │  │  RouteRegister │────────────────▶│   RouteTable    │  │
//! │  │ (periodic task)│                 │ (route registry)│  │
//! │  └───────┬────────┘                 └────────┬────────┘  │
//! │          │ ticker + cancellation             │ events    │
//! │          ▼                                   ▼           │
//! │  ┌────────────────┐                 ┌─────────────────┐  │
//! │  │ RegisterHandle │                 │ broadcast::Sender│ │
//! │  │  (supervisor)  │                 │  (subscribers)  │  │
//! │  └────────────────┘                 └─────────────────┘  │
//! │                                                          │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod register;
pub mod registry;
