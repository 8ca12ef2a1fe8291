//! GET-only method gate
//!
//! Every route answers GET and nothing else. axum's method router would also
//! serve HEAD for a `get` route, so the gate runs before routing and rejects
//! every other method with `405 Method Not Allowed` and `Allow: GET`.

use axum::{
    extract::Request,
    http::{Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Value of the `Allow` header on rejected requests
pub const ALLOWED_METHODS: &str = "GET";

/// Reject any request whose method is not GET
pub async fn require_get(request: Request, next: Next) -> Response {
    if request.method() == Method::GET {
        return next.run(request).await;
    }

    tracing::debug!(
        method = %request.method(),
        path = %request.uri().path(),
        "Rejecting non-GET request"
    );

    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, ALLOWED_METHODS)],
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, middleware, routing::any};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/", any(|| async { "served" }))
            .layer(middleware::from_fn(require_get))
    }

    async fn send(method: Method) -> Response {
        app()
            .oneshot(
                axum::http::Request::builder()
                    .method(method)
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_passes_through() {
        let response = send(Method::GET).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::ALLOW).is_none());
    }

    #[tokio::test]
    async fn test_head_is_rejected_even_when_route_accepts_it() {
        let response = send(Method::HEAD).await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get(header::ALLOW).unwrap(), "GET");
    }

    #[tokio::test]
    async fn test_other_methods_rejected() {
        for method in [
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ] {
            let response = send(method.clone()).await;
            assert_eq!(
                response.status(),
                StatusCode::METHOD_NOT_ALLOWED,
                "{} should be rejected",
                method
            );
            assert_eq!(response.headers().get(header::ALLOW).unwrap(), "GET");
        }
    }
}
