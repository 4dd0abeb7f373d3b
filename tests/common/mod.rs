//! Shared helpers for driving the composed application in tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::routing::any;
use axum::Router;
use tower::ServiceExt;

use forum_server::config::ForumConfig;
use forum_server::http::HttpServer;
use forum_server::routing::HandlerSet;

/// Default config with the admission tunables overridden.
pub fn test_config(max_requests: u32, window_secs: u64) -> ForumConfig {
    let mut config = ForumConfig::default();
    config.rate_limit.max_requests = max_requests;
    config.rate_limit.window_secs = window_secs;
    config
}

/// The fully composed application over a counting stub handler set.
///
/// The counter observes how many requests actually reached a handler, so
/// tests can assert that rejected requests never made it past admission.
pub fn counting_app(config: ForumConfig) -> (Router, Arc<AtomicU32>) {
    let hits = Arc::new(AtomicU32::new(0));
    let recorder = hits.clone();
    let handler = any(move || {
        let recorder = recorder.clone();
        async move {
            recorder.fetch_add(1, Ordering::SeqCst);
            StatusCode::OK
        }
    });
    let server = HttpServer::new(config, HandlerSet::uniform(handler));
    (server.app(), hits)
}

/// A request carrying connection info, as the TLS listener would attach it.
pub fn request_from(addr: &str, path: &str) -> Request<Body> {
    let mut request = Request::builder().uri(path).body(Body::empty()).unwrap();
    let addr: SocketAddr = addr.parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(addr));
    request
}

/// A request with no usable remote address.
pub fn anonymous_request(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
