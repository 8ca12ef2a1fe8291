//! Greeting endpoint
//!
//! Answers every path that is not `/metrics` or `/healthz`.

use serde::Serialize;

use crate::handlers::json::SpacedJson;

/// Message returned by the greeting endpoint
pub const GREETING: &str = "Hello from Python Knative function!";

/// Greeting response
#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    pub message: &'static str,
}

/// Greeting handler
///
/// Always returns 200 OK with `{"message": "Hello from Python Knative function!"}`.
pub async fn handler() -> SpacedJson<GreetingResponse> {
    SpacedJson(GreetingResponse { message: GREETING })
}
