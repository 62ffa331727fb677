//! Core domain types for routekeeper.
//!
//! This crate provides the types shared between the daemon (`routekeeperd`)
//! and any process embedding a registration task:
//! - [`Route`] - immutable value describing one routing entry
//! - [`RegistryClient`] - the narrow interface a registration task consumes
//! - [`RegistryError`] - the registry error taxonomy

pub mod client;
pub mod error;
pub mod route;

// Re-exports for convenience
pub use client::RegistryClient;
pub use error::{RegistryError, RegistryResult};
pub use route::Route;
