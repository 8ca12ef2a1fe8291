//! Configuration management for the hello service
//!
//! The platform hands the service its port through the `PORT` environment
//! variable. Resolution is lenient: a missing or unparsable value falls back to
//! [`DEFAULT_PORT`] instead of aborting startup.

use crate::cli::Cli;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Environment variable carrying the listening port
pub const PORT_ENV: &str = "PORT";

/// Port used when `PORT` is unset or unparsable
pub const DEFAULT_PORT: u16 = 8080;

/// Default tracing level when `RUST_LOG` is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
    pub observability: ObservabilityConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Build configuration from parsed command-line arguments
    ///
    /// `cli.port` already reflects the `PORT` environment variable when no
    /// `--port` flag was given.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            server: ServerConfig {
                host: cli.host,
                port: resolve_port(cli.port.as_deref()),
            },
            observability: ObservabilityConfig {
                log_level: cli.log_level.clone(),
            },
        }
    }

    /// Address the listener binds to
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }
}

/// Parse a raw port value
///
/// Surrounding whitespace is ignored. Returns `None` for anything that is not
/// an integer in `0..=65535`.
pub fn parse_port(raw: &str) -> Option<u16> {
    raw.trim().parse().ok()
}

/// Resolve a raw port value, falling back to [`DEFAULT_PORT`]
pub fn resolve_port(raw: Option<&str>) -> u16 {
    raw.and_then(parse_port).unwrap_or(DEFAULT_PORT)
}
