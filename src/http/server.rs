//! HTTP server setup and composition.
//!
//! # Responsibilities
//! - Construct the rate limiter and the dispatch table
//! - Compose the middleware stack as explicit layers
//! - Bind the TLS listener and serve until shutdown
//! - Spawn the limiter's eviction sweep
//!
//! # Design Decisions
//! - The admission layer wraps the whole router: named routes, static
//!   assets and the 404 fallback are all counted
//! - Composition order is a visible construction step, not hidden wiring

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ForumConfig;
use crate::error::ServerError;
use crate::lifecycle::Shutdown;
use crate::net::tls;
use crate::ratelimit::{admission, RateLimiter};
use crate::routing::{forum_router, HandlerSet};

/// Budget for one request once admitted.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Drain window for in-flight requests at shutdown.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// The forum's HTTPS server.
pub struct HttpServer {
    app: Router,
    config: ForumConfig,
    limiter: Arc<RateLimiter>,
}

impl HttpServer {
    /// Build the server: one process-wide limiter, one immutable dispatch
    /// table, composed once.
    pub fn new(config: ForumConfig, handlers: HandlerSet) -> Self {
        let limiter = Arc::new(RateLimiter::new(&config.rate_limit));
        let app = Self::build_app(&config, handlers, limiter.clone());
        Self {
            app,
            config,
            limiter,
        }
    }

    /// Compose the middleware stack around the dispatch table.
    ///
    /// Outermost first: request-id → trace → admission → timeout. The
    /// limiter therefore sees every request exactly once, before any
    /// routing decision, and a rejection never reaches a handler.
    fn build_app(config: &ForumConfig, handlers: HandlerSet, limiter: Arc<RateLimiter>) -> Router {
        forum_router(handlers, &config.assets).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(limiter, admission))
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
    }

    /// The composed application. Tests drive requests through this without
    /// binding a socket.
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// The shared limiter (e.g. to inspect `tracked_clients`).
    pub fn limiter(&self) -> Arc<RateLimiter> {
        self.limiter.clone()
    }

    /// Serve HTTPS until the shutdown signal fires.
    ///
    /// Startup order: parse the bind address, load TLS material, spawn the
    /// eviction sweep, then bind. Any failure before the bind aborts
    /// startup with a typed error.
    pub async fn run(self, shutdown: &Shutdown) -> Result<(), ServerError> {
        let addr: SocketAddr =
            self.config
                .listener
                .bind_address
                .parse()
                .map_err(|source| ServerError::BindAddress {
                    addr: self.config.listener.bind_address.clone(),
                    source,
                })?;

        let tls_config = tls::load_tls_config(&self.config.listener.tls)?;

        // Keeps the store bounded under client churn.
        tokio::spawn(self.limiter.clone().run_eviction(shutdown.subscribe()));

        let handle = axum_server::Handle::new();
        let drain_handle = handle.clone();
        let mut shutdown_rx = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = shutdown_rx.recv().await;
            drain_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        });

        tracing::info!(
            address = %addr,
            max_requests = self.config.rate_limit.max_requests,
            window_secs = self.config.rate_limit.window_secs,
            "HTTPS server starting"
        );

        axum_server::bind_rustls(addr, tls_config)
            .handle(handle)
            .serve(
                self.app
                    .into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}
