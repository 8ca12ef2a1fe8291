//! HTTP method handling
//!
//! Only GET is served. Every other method, HEAD included, gets 405 Method Not
//! Allowed with `Allow: GET` on every path and leaves the metrics untouched.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use hello_service::{app, handlers::AppState};
use tower::ServiceExt;

fn create_test_app() -> (Router, AppState) {
    let state = AppState::new().expect("AppState::new should succeed");
    (app::router(state.clone()), state)
}

async fn send(app: &Router, method: Method, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_non_get_methods_rejected_on_every_path() {
    let (app, _) = create_test_app();

    for method in [
        Method::HEAD,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::PATCH,
        Method::OPTIONS,
    ] {
        for uri in ["/", "/anything", "/healthz", "/metrics"] {
            let response = send(&app, method.clone(), uri).await;
            assert_eq!(
                response.status(),
                StatusCode::METHOD_NOT_ALLOWED,
                "{} {} should be rejected",
                method,
                uri
            );
        }
    }
}

#[tokio::test]
async fn test_method_not_allowed_lists_get() {
    let (app, _) = create_test_app();

    let response = send(&app, Method::POST, "/").await;

    let allow = response
        .headers()
        .get(header::ALLOW)
        .expect("405 should carry an Allow header")
        .to_str()
        .unwrap();
    assert_eq!(allow, "GET");
}

#[tokio::test]
async fn test_rejected_requests_are_not_recorded() {
    let (app, state) = create_test_app();

    send(&app, Method::POST, "/").await;
    send(&app, Method::PUT, "/healthz").await;
    send(&app, Method::DELETE, "/metrics").await;

    assert_eq!(state.metrics().requests_total(), 0);
    assert_eq!(state.metrics().duration_sample_count(), 0);

    let response = send(&app, Method::GET, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(state.metrics().requests_total(), 1);
    assert_eq!(state.metrics().duration_sample_count(), 1);
}

#[tokio::test]
async fn test_head_is_rejected_and_not_recorded() {
    let (app, state) = create_test_app();

    for uri in ["/", "/healthz", "/metrics"] {
        let response = send(&app, Method::HEAD, uri).await;

        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "HEAD {} should be rejected",
            uri
        );
        assert_eq!(response.headers().get(header::ALLOW).unwrap(), "GET");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    assert_eq!(state.metrics().requests_count("HEAD", "/"), 0);
    assert_eq!(state.metrics().requests_count("HEAD", "/healthz"), 0);
    assert_eq!(state.metrics().requests_total(), 0);
    assert_eq!(state.metrics().duration_sample_count(), 0);
}

#[tokio::test]
async fn test_rejected_responses_keep_request_id() {
    let (app, _) = create_test_app();

    let response = send(&app, Method::HEAD, "/").await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(
        response
            .headers()
            .contains_key(hello_service::middleware::REQUEST_ID_HEADER)
    );
}
