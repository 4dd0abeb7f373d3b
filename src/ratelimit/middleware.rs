//! Admission middleware wrapping the whole dispatch table.
//!
//! Composed as a tower layer outside the router, so every request — named
//! routes, static assets, the 404 fallback — passes through exactly once
//! before any handler runs.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::observability::metrics;

use super::limiter::{Decision, RateLimiter};
use super::store::ClientKey;

/// Check admission for one request, then either delegate to the wrapped
/// handler or short-circuit with `429 Too Many Requests`.
///
/// This middleware never fails the pipeline: a request whose remote address
/// cannot be derived is counted under the shared fallback key instead of
/// being let through unchecked.
pub async fn admission(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let key = ClientKey::from_request(&request);

    match limiter.check(key.clone()) {
        Decision::Admitted { .. } => next.run(request).await,
        Decision::Rejected { retry_after } => {
            // Expected traffic under load, not an error.
            tracing::debug!(client = %key, path = %request.uri().path(), "Request rejected by rate limiter");
            metrics::record_rate_limited("window_exhausted");

            let retry_secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            let mut response = Response::new(Body::from("Too many requests"));
            *response.status_mut() = StatusCode::TOO_MANY_REQUESTS;
            if let Ok(value) = HeaderValue::from_str(&retry_secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
            response
        }
    }
}
