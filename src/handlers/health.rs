//! Health check endpoint
//!
//! Liveness/readiness check target for the hosting platform.

use serde::Serialize;

use crate::handlers::json::SpacedJson;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: &'static str,
}

/// Health check handler
///
/// Returns 200 OK with `{"status": "healthy"}`. The process has no
/// dependencies to check, so being able to answer is the whole check.
pub async fn handler() -> SpacedJson<HealthResponse> {
    SpacedJson(HealthResponse { status: "healthy" })
}
