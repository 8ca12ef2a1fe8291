//! Per-request metric recording
//!
//! Every request that reaches a route increments `hello_requests_total` once
//! and adds one `hello_request_duration_seconds` sample. The sample spans from
//! the start of processing until the response body has been fully written, so
//! recording is attached to the body rather than done when the handler
//! returns. A `/metrics` body is rendered before that point and never includes
//! the scrape that produced it.

use axum::{
    body::{Body, Bytes, HttpBody},
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};
use http_body::{Frame, SizeHint};
use std::{
    pin::Pin,
    task::{Context, Poll, ready},
    time::Instant,
};

use crate::handlers::AppState;

/// Record request count and duration for every served request
///
/// Requests rejected with `405 Method Not Allowed` were never served by a
/// route and are not recorded. Recording failures are logged and never alter
/// the response.
pub async fn track_metrics(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let endpoint = request.uri().path().to_owned();

    let response = next.run(request).await;

    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        tracing::debug!(
            method = %method,
            endpoint = %endpoint,
            "Method not allowed, skipping metrics"
        );
        return response;
    }

    let completion = Completion {
        state,
        method,
        endpoint,
        start,
    };

    response.map(|inner| {
        Body::new(TrackedBody {
            inner,
            completion: Some(completion),
        })
    })
}

/// Metric update pending until the response body is done
struct Completion {
    state: AppState,
    method: Method,
    endpoint: String,
    start: Instant,
}

impl Completion {
    fn record(self) {
        let metrics = self.state.metrics();
        let elapsed = self.start.elapsed().as_secs_f64();

        if let Err(e) = metrics.record_request(self.method.as_str(), &self.endpoint) {
            tracing::warn!(
                error = %e,
                method = %self.method,
                endpoint = %self.endpoint,
                "Failed to record request counter"
            );
        }
        if let Err(e) = metrics.record_duration(elapsed) {
            tracing::warn!(
                error = %e,
                duration_seconds = elapsed,
                "Failed to record request duration"
            );
        }
    }
}

/// Response body that records its [`Completion`] exactly once
///
/// Recording happens when the last frame has been handed out. A body that is
/// never polled to the end (empty bodies, aborted writes) records on drop.
struct TrackedBody {
    inner: Body,
    completion: Option<Completion>,
}

impl TrackedBody {
    fn finish(&mut self) {
        if let Some(completion) = self.completion.take() {
            completion.record();
        }
    }
}

impl HttpBody for TrackedBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = &mut *self;
        let frame = ready!(Pin::new(&mut this.inner).poll_frame(cx));

        if frame.is_none() || this.inner.is_end_stream() {
            this.finish();
        }

        Poll::Ready(frame)
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

impl Drop for TrackedBody {
    fn drop(&mut self) {
        self.finish();
    }
}
