//! HTTP application assembly
//!
//! | Path       | Handler                      |
//! |------------|------------------------------|
//! | `/metrics` | [`handlers::metrics::handler`]  |
//! | `/healthz` | [`handlers::health::handler`]   |
//! | any other  | [`handlers::greeting::handler`] |
//!
//! Every path only answers GET. HEAD and all other methods get
//! `405 Method Not Allowed` with `Allow: GET` and are not counted.

use axum::{
    Router, middleware,
    routing::{MethodRouter, get},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, AppState};
use crate::middleware::{request_id_middleware, require_get, track_metrics};

/// Build the service router with all routes and middleware
pub fn router(state: AppState) -> Router {
    let greeting: MethodRouter = get(handlers::greeting::handler);

    Router::new()
        .route("/metrics", get(handlers::metrics::handler))
        .route("/healthz", get(handlers::health::handler))
        .fallback_service(greeting)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(middleware::from_fn_with_state(state.clone(), track_metrics))
                .layer(middleware::from_fn(require_get)),
        )
        .with_state(state)
}
