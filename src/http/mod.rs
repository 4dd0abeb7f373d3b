//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TLS connection
//!     → server.rs (layer composition, axum-server bind)
//!     → request-id + trace layers
//!     → admission layer (ratelimit subsystem)
//!     → dispatch table (routing subsystem)
//! ```

pub mod server;

pub use server::HttpServer;
