//! Prometheus metrics endpoint
//!
//! Exposes metrics in Prometheus text format for scraping.

use axum::{
    extract::State,
    http::{StatusCode, header},
};

use crate::error::AppResult;
use crate::handlers::AppState;

/// Content type of the `/metrics` response
pub const CONTENT_TYPE: &str = "text/plain";

/// Metrics handler for Prometheus scraping
///
/// Returns a snapshot of the registry taken before this request is itself
/// recorded, so a scrape first shows up in the next one.
///
/// # Response
///
/// - `200 OK` with metrics in Prometheus text format
/// - `500 Internal Server Error` if the encoder fails
///
/// # Example
///
/// ```bash
/// curl http://localhost:8080/metrics
/// # HELP hello_requests_total Total requests
/// # TYPE hello_requests_total counter
/// hello_requests_total{method="GET",endpoint="/"} 1.0
/// ```
pub async fn handler(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, [(header::HeaderName, &'static str); 1], String)> {
    let output = state.metrics().gather().inspect_err(|e| {
        tracing::error!(error = %e, "Failed to gather metrics for Prometheus scraping");
    })?;

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], output))
}
