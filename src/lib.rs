//! hello-service - minimal HTTP function for scale-to-zero platforms
//!
//! Serves a greeting on every path, a health check on `/healthz` and
//! Prometheus metrics on `/metrics`, counting requests per method and path
//! and recording their durations.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod telemetry;
