//! HTTP request handlers for the hello service

use crate::metrics::Metrics;
use std::sync::Arc;

pub mod greeting;
pub mod health;
pub mod json;
pub mod metrics;

/// Application state shared across all handlers and middleware
///
/// Holds the metrics registry created at startup. Cloning is a cheap Arc
/// clone; every clone records into the same collectors.
#[derive(Clone)]
pub struct AppState {
    metrics: Arc<Metrics>,
}

impl AppState {
    /// Create state with a fresh metrics registry
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics cannot be registered.
    pub fn new() -> Result<Self, prometheus::Error> {
        Ok(Self::with_metrics(Metrics::new()?))
    }

    /// Create state around an existing metrics registry
    pub fn with_metrics(metrics: Metrics) -> Self {
        Self {
            metrics: Arc::new(metrics),
        }
    }

    /// Get reference to the metrics collector
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
