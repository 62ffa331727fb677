//! Daemon configuration.
//!
//! Settings come from an optional TOML file merged with command-line
//! flags; flags win. The route's `url`, `port`, and `ip` are required
//! after merging, everything else has a default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use routekeeper_core::Route;

/// Default seconds between route refreshes.
pub const DEFAULT_REGISTER_INTERVAL_SECS: u64 = 20;

/// Default seconds between registry expiry sweeps.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 30;

/// Errors producing a usable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file is not valid TOML
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A required setting is absent from both the file and the CLI
    #[error("missing required setting: {0}")]
    Missing(&'static str),

    /// An interval was set to zero
    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),
}

/// routekeeperd - keeps a route registered in the route registry
#[derive(Parser, Debug, Default)]
#[command(name = "routekeeperd", version, about)]
pub struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Externally visible URL of the route to maintain
    #[arg(long)]
    pub url: Option<String>,

    /// Backend port
    #[arg(long)]
    pub port: Option<u16>,

    /// Backend IP address
    #[arg(long)]
    pub ip: Option<String>,

    /// Correlation id attached to log lines for this route
    #[arg(long)]
    pub log_guid: Option<String>,

    /// Route time-to-live in seconds
    #[arg(long)]
    pub ttl: Option<u64>,

    /// Seconds between route refreshes
    #[arg(long)]
    pub register_interval_secs: Option<u64>,

    /// Seconds between registry expiry sweeps
    #[arg(long)]
    pub sweep_interval_secs: Option<u64>,
}

/// On-disk configuration file shape.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    route: Option<RouteSection>,
    register_interval_secs: Option<u64>,
    sweep_interval_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RouteSection {
    url: Option<String>,
    port: Option<u16>,
    ip: Option<String>,
    log_guid: Option<String>,
    ttl: Option<u64>,
}

/// Final, validated daemon configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// The route the daemon keeps registered
    pub route: Route,

    /// Interval between route refreshes
    pub register_interval: Duration,

    /// Interval between registry expiry sweeps
    pub sweep_interval: Duration,
}

impl Config {
    /// Builds the configuration from CLI args, reading the config file if
    /// one was given.
    pub fn load(args: Args) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => read_file(path)?,
            None => FileConfig::default(),
        };
        let route_file = file.route.unwrap_or_default();

        let url = args
            .url
            .or(route_file.url)
            .ok_or(ConfigError::Missing("route url"))?;
        let port = args
            .port
            .or(route_file.port)
            .ok_or(ConfigError::Missing("route port"))?;
        let ip = args
            .ip
            .or(route_file.ip)
            .ok_or(ConfigError::Missing("route ip"))?;
        let log_guid = args.log_guid.or(route_file.log_guid).unwrap_or_default();
        let ttl = args.ttl.or(route_file.ttl);

        let register_secs = args
            .register_interval_secs
            .or(file.register_interval_secs)
            .unwrap_or(DEFAULT_REGISTER_INTERVAL_SECS);
        if register_secs == 0 {
            return Err(ConfigError::ZeroInterval("register_interval_secs"));
        }

        let sweep_secs = args
            .sweep_interval_secs
            .or(file.sweep_interval_secs)
            .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS);
        if sweep_secs == 0 {
            return Err(ConfigError::ZeroInterval("sweep_interval_secs"));
        }

        Ok(Self {
            route: Route {
                url,
                port,
                ip,
                log_guid,
                ttl,
            },
            register_interval: Duration::from_secs(register_secs),
            sweep_interval: Duration::from_secs(sweep_secs),
        })
    }
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("routekeeper.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_from_args_only() {
        let args = Args {
            url: Some("api.example.com".to_string()),
            port: Some(3000),
            ip: Some("10.0.0.1".to_string()),
            ..Default::default()
        };

        let config = Config::load(args).unwrap();
        assert_eq!(config.route.url, "api.example.com");
        assert_eq!(config.route.port, 3000);
        assert_eq!(config.route.ip, "10.0.0.1");
        assert_eq!(config.route.log_guid, "");
        assert_eq!(config.route.ttl, None);
        assert_eq!(
            config.register_interval,
            Duration::from_secs(DEFAULT_REGISTER_INTERVAL_SECS)
        );
        assert_eq!(
            config.sweep_interval,
            Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS)
        );
    }

    #[test]
    fn test_load_from_file_only() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
            register_interval_secs = 5
            sweep_interval_secs = 10

            [route]
            url = "api.example.com"
            port = 3000
            ip = "10.0.0.1"
            log_guid = "guid-1"
            ttl = 120
            "#,
        );

        let args = Args {
            config: Some(path),
            ..Default::default()
        };

        let config = Config::load(args).unwrap();
        assert_eq!(config.route.url, "api.example.com");
        assert_eq!(config.route.log_guid, "guid-1");
        assert_eq!(config.route.ttl, Some(120));
        assert_eq!(config.register_interval, Duration::from_secs(5));
        assert_eq!(config.sweep_interval, Duration::from_secs(10));
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
            register_interval_secs = 5

            [route]
            url = "file.example.com"
            port = 3000
            ip = "10.0.0.1"
            "#,
        );

        let args = Args {
            config: Some(path),
            url: Some("cli.example.com".to_string()),
            register_interval_secs: Some(7),
            ..Default::default()
        };

        let config = Config::load(args).unwrap();
        assert_eq!(config.route.url, "cli.example.com");
        assert_eq!(config.route.port, 3000);
        assert_eq!(config.register_interval, Duration::from_secs(7));
    }

    #[test]
    fn test_missing_url_fails() {
        let args = Args {
            port: Some(3000),
            ip: Some("10.0.0.1".to_string()),
            ..Default::default()
        };

        let err = Config::load(args).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("route url")));
    }

    #[test]
    fn test_zero_interval_fails() {
        let args = Args {
            url: Some("api.example.com".to_string()),
            port: Some(3000),
            ip: Some("10.0.0.1".to_string()),
            register_interval_secs: Some(0),
            ..Default::default()
        };

        let err = Config::load(args).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ZeroInterval("register_interval_secs")
        ));
    }

    #[test]
    fn test_unknown_file_setting_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
            registr_interval_secs = 5

            [route]
            url = "api.example.com"
            port = 3000
            ip = "10.0.0.1"
            "#,
        );

        let args = Args {
            config: Some(path),
            ..Default::default()
        };

        let err = Config::load(args).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_fails() {
        let args = Args {
            config: Some(PathBuf::from("/nonexistent/routekeeper.toml")),
            ..Default::default()
        };

        let err = Config::load(args).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
