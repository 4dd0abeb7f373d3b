//! Forum server core.
//!
//! The bootstrap and routing layer of the forum: a TLS HTTP server, the
//! URL-to-handler dispatch table, and the process-wide admission layer
//! (rate limiter) every request passes through exactly once before routing.
//! The forum's CRUD/auth/moderation handlers are supplied by the
//! application as an opaque [`routing::HandlerSet`].

// Core subsystems
pub mod config;
pub mod http;
pub mod net;
pub mod ratelimit;
pub mod routing;

// Cross-cutting concerns
pub mod error;
pub mod lifecycle;
pub mod observability;

pub use config::ForumConfig;
pub use error::ServerError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use ratelimit::RateLimiter;
pub use routing::HandlerSet;
