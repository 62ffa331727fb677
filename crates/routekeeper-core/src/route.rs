//! Route value object.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One routing entry: the externally visible URL, the backend address it
/// maps to, a correlation id for log lines, and an optional time-to-live
/// hint the registry uses to expire entries that stop being refreshed.
///
/// The value is immutable once handed to a registration task: the same
/// value is re-asserted on every refresh and used for the final
/// deregistration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Externally visible URL of the route.
    pub url: String,

    /// Backend port.
    pub port: u16,

    /// Backend IP address.
    pub ip: String,

    /// Opaque correlation id attached to log lines for this route.
    pub log_guid: String,

    /// Time-to-live hint in seconds. `None` means no expiry hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
}

impl Route {
    /// Identity of the route inside a registry table.
    ///
    /// Two routes with the same URL but different backends are distinct
    /// entries.
    pub fn key(&self) -> String {
        format!("{}|{}|{}", self.url, self.ip, self.port)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}:{}", self.url, self.ip, self.port)
    }
}
