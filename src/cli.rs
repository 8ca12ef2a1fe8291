//! Command-line interface for the hello service
//!
//! Every flag has a default, so the binary runs unmodified under a
//! scale-to-zero platform that only sets `PORT`.

use crate::config::{DEFAULT_LOG_LEVEL, PORT_ENV};
use clap::Parser;
use std::net::IpAddr;

/// Minimal HTTP function with health and Prometheus metrics endpoints
#[derive(Debug, Parser)]
#[command(name = "hello-service")]
#[command(version)]
#[command(about = "Minimal HTTP function with health and Prometheus metrics endpoints")]
pub struct Cli {
    /// Port to listen on (invalid values fall back to 8080)
    ///
    /// Kept as a raw string so an unparsable value degrades to the default
    /// instead of failing argument parsing.
    #[arg(short, long, env = PORT_ENV)]
    pub port: Option<String>,

    /// IP address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Default log level, used when RUST_LOG is not set
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}
